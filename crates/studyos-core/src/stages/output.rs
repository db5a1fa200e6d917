//! Stage results.

use std::borrow::Cow;

use serde::{Serialize, Serializer};

use crate::generation::GenerationError;

/// Prefix that marks a stage's text as an error rather than generated content.
pub const ERROR_MARKER: &str = "Error: ";

/// What a stage produced.
///
/// Internally a failure stays distinguishable from real output. Everywhere
/// the text leaves the stage (the next prompt, the serialized bundle) it is
/// flattened by [`StageOutput::as_text`], which renders a failure as
/// `"Error: <reason>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutput {
    Generated(String),
    Failed { reason: String },
}

impl StageOutput {
    /// Text form: generated text verbatim, or the error-marker string.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            StageOutput::Generated(text) => Cow::Borrowed(text),
            StageOutput::Failed { reason } => Cow::Owned(format!("{ERROR_MARKER}{reason}")),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StageOutput::Failed { .. })
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            StageOutput::Failed { reason } => Some(reason),
            StageOutput::Generated(_) => None,
        }
    }
}

impl From<Result<String, GenerationError>> for StageOutput {
    fn from(result: Result<String, GenerationError>) -> Self {
        match result {
            Ok(text) => StageOutput::Generated(text),
            Err(e) => StageOutput::Failed {
                reason: e.to_string(),
            },
        }
    }
}

impl Serialize for StageOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_text_is_passed_through() {
        let out = StageOutput::from(Ok("  plan\n".to_string()));
        assert_eq!(out.as_text(), "  plan\n");
        assert!(!out.is_failed());
        assert_eq!(out.failure_reason(), None);
    }

    #[test]
    fn failure_renders_with_error_marker() {
        let out = StageOutput::from(Err(GenerationError::Service("boom".to_string())));
        assert!(out.is_failed());
        assert_eq!(out.failure_reason(), Some("boom"));
        assert_eq!(out.as_text(), "Error: boom");
    }

    #[test]
    fn serializes_as_plain_string() {
        let failed = StageOutput::Failed {
            reason: "quota".to_string(),
        };
        assert_eq!(serde_json::to_value(&failed).unwrap(), serde_json::json!("Error: quota"));

        let ok = StageOutput::Generated("tasks".to_string());
        assert_eq!(serde_json::to_value(&ok).unwrap(), serde_json::json!("tasks"));
    }
}
