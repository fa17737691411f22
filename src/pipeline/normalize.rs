//! Message text cleaning and empty-message filtering.
//!
//! These passes run before grouping. Cleaning keeps embedded newlines so the
//! grouper can still join messages on `\n`; newlines are only flattened at
//! the final formatting step.

use crate::records::{RawMessage, Transform};

/// Cleans message text in place.
///
/// - Strips control characters (carriage returns, NULs, escape bytes)
///   while preserving `\n`
/// - Collapses runs of spaces and tabs to a single space
/// - Trims leading and trailing whitespace
pub struct CleanText {
    strip_control_chars: bool,
    collapse_whitespace: bool,
}

impl CleanText {
    pub fn new(strip_control_chars: bool, collapse_whitespace: bool) -> Self {
        Self {
            strip_control_chars,
            collapse_whitespace,
        }
    }

    fn clean(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut prev_space = false;

        for c in text.chars() {
            if c == '\n' {
                result.push(c);
                prev_space = false;
            } else if c == ' ' || c == '\t' {
                if self.collapse_whitespace {
                    if !prev_space {
                        result.push(' ');
                        prev_space = true;
                    }
                } else {
                    result.push(c);
                }
            } else if c.is_control() {
                if !self.strip_control_chars {
                    result.push(c);
                }
                // Stripped control bytes do not reset the space run: "a \x00 b"
                // still collapses to "a b"
            } else {
                result.push(c);
                prev_space = false;
            }
        }

        result.trim().to_string()
    }
}

impl Default for CleanText {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl Transform for CleanText {
    fn transform(&mut self, messages: &mut Vec<RawMessage>) {
        for message in messages.iter_mut() {
            if let Some(text) = message.text.take() {
                message.text = Some(self.clean(&text));
            }
        }
    }
}

/// Removes messages with no content.
///
/// Dropping is silent data reduction, not failure: an attachment-only or
/// whitespace-only message simply contributes nothing to any turn.
pub struct DropEmptyMessages {
    dropped: usize,
}

impl DropEmptyMessages {
    pub fn new() -> Self {
        Self { dropped: 0 }
    }

    /// Number of messages removed so far.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl Default for DropEmptyMessages {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for DropEmptyMessages {
    fn transform(&mut self, messages: &mut Vec<RawMessage>) {
        let before = messages.len();
        messages.retain(|message| !message.content().trim().is_empty());
        self.dropped += before - messages.len();
    }
}
