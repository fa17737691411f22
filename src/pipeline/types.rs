//! Data structures for turns, pairs and rendered examples.

use serde::{Deserialize, Serialize};

/// A maximal run of consecutive same-author messages within one conversation,
/// merged into a single text block.
///
/// Adjacent turns in a conversation never share `is_local_author`; the
/// grouper closes a run as soon as authorship flips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub conversation_id: String,
    pub is_local_author: bool,
    /// Newline-joined text of the contributing messages, in timestamp order
    pub text: String,
    /// Timestamp of the first contributing message
    pub start_timestamp: i64,
    /// Input position of the first contributing message. Keeps the final
    /// ordering stable when timestamps tie across conversations.
    pub arrival_index: usize,
}

/// A local-author turn matched with its nearest preceding counterpart turn.
///
/// `context` is `None` when no counterpart turn strictly precedes the
/// response within the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnPair {
    pub context: Option<Turn>,
    pub response: Turn,
}

/// One rendered training example.
///
/// The `text` framing (`person: <context>\n<role>: <response>`) is the
/// persisted contract consumed by downstream training code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub text: String,
    pub label: u8,
}

/// Counters collected over one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Messages received before normalization
    pub messages_in: usize,
    /// Messages dropped for empty/absent text
    pub messages_dropped: usize,
    /// Distinct conversations seen
    pub conversations: usize,
    /// Turns produced by the grouper
    pub turns: usize,
    /// Local-author turns with no preceding counterpart turn
    pub unpaired: usize,
    /// Examples emitted
    pub examples: usize,
}
