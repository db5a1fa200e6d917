//! The three pipeline stages and their shared output type.
//!
//! Each stage is a pure prompt builder plus one generation call. A stage
//! never parses what the model returns; the text is handed to the next
//! stage verbatim.

pub mod context;
pub mod output;
pub mod strategy;
pub mod tasks;

use std::fmt;

use crate::generation::GenerationClient;

pub use output::{ERROR_MARKER, StageOutput};

/// Identifies a pipeline stage in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Context,
    Strategy,
    Planning,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 3] = [Stage::Context, Stage::Strategy, Stage::Planning];

    /// Name recorded as the `agent` of activity-log entries.
    pub fn agent_name(self) -> &'static str {
        match self {
            Stage::Context => "Context Agent",
            Stage::Strategy => "Strategy Agent",
            Stage::Planning => "Planning Agent",
        }
    }

    /// Activity-log message appended right before the stage runs.
    pub fn start_message(self) -> &'static str {
        match self {
            Stage::Context => "Context stage starting: building student world model",
            Stage::Strategy => "Strategy stage starting: creating long-term strategy",
            Stage::Planning => "Planning stage starting: generating daily tasks",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Context => "context",
            Stage::Strategy => "strategy",
            Stage::Planning => "planning",
        };
        f.write_str(s)
    }
}

/// Send `prompt` through `client` and wrap the outcome.
///
/// Generation failures are recorded in the returned [`StageOutput`], never
/// raised.
pub(crate) async fn generate_stage(
    stage: Stage,
    client: &dyn GenerationClient,
    prompt: String,
) -> StageOutput {
    tracing::debug!(%stage, client = client.name(), prompt_len = prompt.len(), "stage prompt built");
    let output = StageOutput::from(client.generate(&prompt).await);
    match &output {
        StageOutput::Generated(text) => {
            tracing::info!(%stage, output_len = text.len(), "stage completed");
        }
        StageOutput::Failed { reason } => {
            tracing::warn!(%stage, %reason, "generation failed, continuing with error text");
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_run_in_fixed_order() {
        assert_eq!(Stage::ALL, [Stage::Context, Stage::Strategy, Stage::Planning]);
    }

    #[test]
    fn start_messages_name_the_stage() {
        for stage in Stage::ALL {
            assert!(stage.start_message().contains("starting"));
        }
        assert_eq!(Stage::Planning.to_string(), "planning");
        assert_eq!(Stage::Strategy.agent_name(), "Strategy Agent");
    }
}
