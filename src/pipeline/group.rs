//! Turn grouping: collapse maximal same-author message runs into turns.
//!
//! The original system expressed this as a SQL window query (`LAG` over
//! authorship, a running boundary sum, `group_concat`). Here it is the
//! equivalent sequential state machine: walk the conversation in order,
//! accumulate the current run, close it whenever authorship flips. One pass,
//! O(n) in total messages.

use std::collections::HashMap;

use crate::pipeline::types::Turn;
use crate::records::RawMessage;

/// All messages of one conversation, tagged with their input positions.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub id: String,
    /// (arrival index, message), in input order
    pub messages: Vec<(usize, RawMessage)>,
}

/// Splits a message sequence into per-conversation slices.
///
/// Conversations appear in first-seen order and each slice preserves the
/// input order of its messages, so interleaved conversations are handled
/// without ever merging their runs.
pub fn partition_by_conversation(messages: Vec<RawMessage>) -> Vec<Conversation> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut conversations: Vec<Conversation> = Vec::new();

    for (index, message) in messages.into_iter().enumerate() {
        let slot = *slots
            .entry(message.conversation_id.clone())
            .or_insert_with(|| {
                conversations.push(Conversation {
                    id: message.conversation_id.clone(),
                    messages: Vec::new(),
                });
                conversations.len() - 1
            });
        conversations[slot].messages.push((index, message));
    }

    conversations
}

/// Open run accumulator: the turn being built.
struct Run {
    is_local_author: bool,
    text: String,
    start_timestamp: i64,
    arrival_index: usize,
}

impl Run {
    fn open(index: usize, message: &RawMessage) -> Self {
        Self {
            is_local_author: message.is_local_author,
            text: message.content().to_string(),
            start_timestamp: message.timestamp,
            arrival_index: index,
        }
    }

    fn append(&mut self, message: &RawMessage) {
        self.text.push('\n');
        self.text.push_str(message.content());
    }

    fn close(self, conversation_id: &str) -> Turn {
        Turn {
            conversation_id: conversation_id.to_string(),
            is_local_author: self.is_local_author,
            text: self.text,
            start_timestamp: self.start_timestamp,
            arrival_index: self.arrival_index,
        }
    }
}

/// Collapses one conversation's messages into ordered turns.
///
/// Messages with equal timestamps are processed in input order, so a sender
/// switch on a tied timestamp still opens a new run in arrival order.
pub fn group_turns(conversation: &Conversation) -> Vec<Turn> {
    let mut turns = Vec::new();
    let mut run: Option<Run> = None;

    for (index, message) in &conversation.messages {
        // Normalization drops empty messages; skip any stragglers so they
        // neither break a run nor produce stray separators
        if message.content().is_empty() {
            continue;
        }

        match run.as_mut() {
            Some(current) if current.is_local_author == message.is_local_author => {
                current.append(message);
            }
            _ => {
                if let Some(finished) = run.take() {
                    turns.push(finished.close(&conversation.id));
                }
                run = Some(Run::open(*index, message));
            }
        }
    }

    if let Some(finished) = run {
        turns.push(finished.close(&conversation.id));
    }

    turns
}
