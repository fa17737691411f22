//! Example rendering: the persisted two-line training text contract.

use crate::pipeline::types::{Example, TurnPair};

/// Fixed discriminant for the single supervised class in this domain.
pub const EXAMPLE_LABEL: u8 = 0;

/// Default role label for the counterpart side. Part of the persisted
/// contract; downstream training code matches on it byte-for-byte, so only
/// configure something else if the consumers change too.
pub const CONTEXT_ROLE: &str = "person";

/// Renders turn pairs into flat labeled examples.
///
/// Internal turn text keeps its newlines up to this point (they mark message
/// boundaries within a turn); rendering flattens each of them to a single
/// space, exactly like the original export did.
pub struct ExampleFormatter {
    context_role: String,
    response_role: String,
}

impl ExampleFormatter {
    pub fn new(context_role: impl Into<String>, response_role: impl Into<String>) -> Self {
        Self {
            context_role: context_role.into(),
            response_role: response_role.into(),
        }
    }

    pub fn format_pair(&self, pair: &TurnPair) -> Example {
        let context = pair
            .context
            .as_ref()
            .map(|turn| flatten(&turn.text))
            .unwrap_or_default();
        let response = flatten(&pair.response.text);

        Example {
            text: format!(
                "{}: {}\n{}: {}",
                self.context_role, context, self.response_role, response
            ),
            label: EXAMPLE_LABEL,
        }
    }
}

fn flatten(text: &str) -> String {
    text.replace('\n', " ")
}
