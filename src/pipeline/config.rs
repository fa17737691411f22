//! Configuration for the extraction pipeline.

use super::format::CONTEXT_ROLE;

/// Configuration for the extraction pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Strip control characters from message text (always true)
    pub strip_control_chars: bool,
    /// Collapse runs of spaces and tabs to a single space
    pub collapse_whitespace: bool,
    /// Role label rendered for the counterpart side of each example
    pub context_role: String,
    /// Role label rendered for the local author's side of each example
    pub response_role: String,
    /// Drop examples whose context is empty instead of emitting them
    pub skip_unpaired: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            strip_control_chars: true,
            collapse_whitespace: true,
            context_role: CONTEXT_ROLE.to_string(),
            response_role: "me".to_string(),
            skip_unpaired: false,
        }
    }
}
