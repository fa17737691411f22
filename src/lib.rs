//! turnpair - turn exported chat history into supervised training pairs.
//!
//! The core is a pure four-stage pipeline ([`pipeline`]) that segments a
//! time-ordered two-party message stream into turns and pairs each
//! local-author turn with the counterpart turn it replies to. Everything
//! around it (the JSONL log format, config, output naming) is glue for the
//! CLI; library users can feed [`records::RawMessage`] sequences from any
//! source.

pub mod config;
pub mod files;
pub mod pipeline;
pub mod records;

pub use config::Config;
pub use pipeline::{Example, Pipeline, PipelineConfig, PipelineOutput, PipelineStats};
pub use records::{MessageLog, RawMessage, RecordError, Transform};
