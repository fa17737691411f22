//! Raw message records and the JSONL log format.
//!
//! A message log is a plain-text file with one JSON object per line, ordered
//! by conversation and by timestamp within each conversation:
//!
//! ```text
//! {"conversation_id":"chat-1","is_local_author":false,"text":"hi","timestamp":100}
//! {"conversation_id":"chat-1","is_local_author":true,"text":"hey","timestamp":101}
//! ```
//!
//! How the log was produced (iMessage export, Telegram dump, ...) is the
//! exporter's concern; this module only parses the ordered sequence.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors that can occur while reading a message log.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Failed to open message log: {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read line {line}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// A single message as exported from a chat history.
///
/// `timestamp` is an opaque ordering value (the exporter's epoch); within a
/// conversation it is non-decreasing in file order, ties keep file order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMessage {
    /// Identifier of the thread this message belongs to
    pub conversation_id: String,
    /// True if the local user wrote the message, false for the counterpart
    pub is_local_author: bool,
    /// Message body; may be absent (attachment-only messages export as null)
    #[serde(default)]
    pub text: Option<String>,
    /// Send order within the conversation
    pub timestamp: i64,
}

impl RawMessage {
    pub fn new(
        conversation_id: impl Into<String>,
        is_local_author: bool,
        text: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            is_local_author,
            text: Some(text.into()),
            timestamp,
        }
    }

    /// Message from the local user (the person being modeled)
    pub fn local(conversation_id: impl Into<String>, text: impl Into<String>, timestamp: i64) -> Self {
        Self::new(conversation_id, true, text, timestamp)
    }

    /// Message from the other party
    pub fn counterpart(
        conversation_id: impl Into<String>,
        text: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self::new(conversation_id, false, text, timestamp)
    }

    /// Body text, or the empty string when absent
    pub fn content(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// In-place transformation pass over an ordered message sequence.
///
/// Transforms may rewrite message text or remove messages, but must preserve
/// the relative order of the messages they keep.
pub trait Transform {
    fn transform(&mut self, messages: &mut Vec<RawMessage>);
}

/// A parsed message log: the ordered raw message sequence.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    pub messages: Vec<RawMessage>,
}

impl MessageLog {
    /// Parse a message log from a path.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self, RecordError> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|source| RecordError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse_reader(BufReader::new(file))
    }

    /// Parse a message log from a reader.
    ///
    /// Blank lines are skipped. An empty log is valid and yields an empty
    /// message sequence.
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<Self, RecordError> {
        let mut messages = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result.map_err(|source| RecordError::Read {
                line: line_num + 1,
                source,
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let message: RawMessage =
                serde_json::from_str(&line).map_err(|source| RecordError::Parse {
                    line: line_num + 1,
                    source,
                })?;
            messages.push(message);
        }

        Ok(MessageLog { messages })
    }

    /// Parse from a string.
    pub fn parse_str(content: &str) -> Result<Self, RecordError> {
        Self::parse_reader(BufReader::new(content.as_bytes()))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
