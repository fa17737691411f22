//! Segmentation-and-pairing pipeline for two-party message history.
//!
//! Four stages over an ordered raw message sequence, strictly forward:
//!
//! 1. Normalize: clean text, drop empty messages ([`normalize`])
//! 2. Group: collapse same-author runs into turns, per conversation ([`group`])
//! 3. Pair: match local-author turns with their nearest preceding
//!    counterpart turn ([`pair`])
//! 4. Format: render flat labeled examples ([`format`])
//!
//! Each run is a pure batch transform with only local state, so independent
//! conversations are processed in parallel and merged back into a
//! deterministic order (response timestamp, ties by arrival).

mod config;
mod format;
mod group;
mod normalize;
mod pair;
mod types;

pub use config::PipelineConfig;
pub use format::{ExampleFormatter, CONTEXT_ROLE, EXAMPLE_LABEL};
pub use group::{group_turns, partition_by_conversation, Conversation};
pub use normalize::{CleanText, DropEmptyMessages};
pub use pair::pair_turns;
pub use types::{Example, PipelineStats, Turn, TurnPair};

use rayon::prelude::*;
use tracing::debug;

use crate::records::{RawMessage, Transform};

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Examples ordered by response turn start timestamp (arrival order on ties)
    pub examples: Vec<Example>,
    pub stats: PipelineStats,
}

/// The full extraction pipeline.
///
/// Holds no state across runs; `run` consumes its input and returns fresh
/// output, so one `Pipeline` may serve any number of invocations.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, mut messages: Vec<RawMessage>) -> PipelineOutput {
        let messages_in = messages.len();

        CleanText::new(
            self.config.strip_control_chars,
            self.config.collapse_whitespace,
        )
        .transform(&mut messages);

        let mut filter = DropEmptyMessages::new();
        filter.transform(&mut messages);
        let messages_dropped = filter.dropped();

        let conversations = partition_by_conversation(messages);
        debug!(
            messages = messages_in - messages_dropped,
            dropped = messages_dropped,
            conversations = conversations.len(),
            "normalized message log"
        );

        let grouped: Vec<Vec<Turn>> = conversations.par_iter().map(group_turns).collect();
        let turns: usize = grouped.iter().map(Vec::len).sum();

        let mut pairs: Vec<TurnPair> = grouped
            .iter()
            .flat_map(|conversation_turns| pair_turns(conversation_turns))
            .collect();

        // Deterministic merge across conversations: response timestamp first,
        // arrival order breaks ties
        pairs.sort_by_key(|pair| (pair.response.start_timestamp, pair.response.arrival_index));

        let unpaired = pairs.iter().filter(|pair| pair.context.is_none()).count();
        if self.config.skip_unpaired {
            pairs.retain(|pair| pair.context.is_some());
        }

        let formatter = ExampleFormatter::new(
            self.config.context_role.clone(),
            self.config.response_role.clone(),
        );
        let examples: Vec<Example> = pairs.iter().map(|pair| formatter.format_pair(pair)).collect();

        let stats = PipelineStats {
            messages_in,
            messages_dropped,
            conversations: conversations.len(),
            turns,
            unpaired,
            examples: examples.len(),
        };
        debug!(
            turns,
            unpaired, examples = stats.examples, "extraction complete"
        );

        PipelineOutput { examples, stats }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
