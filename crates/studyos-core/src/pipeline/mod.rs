//! The orchestrator: runs the three stages in fixed order.
//!
//! ```text
//! profile --> Context --world model--> Strategy --strategy--> Planning --tasks--> ResultBundle
//!    |            |                        |                      |
//!    validate     log "starting"           log "starting"         log "starting", then "ready"
//! ```
//!
//! Under the default [`FailurePolicy::Propagate`], a failed generation call
//! does not stop the run: its error text becomes the next stage's input.
//! The only hard failure is an invalid profile, which aborts before any
//! stage runs.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::activity::{ActivityEntry, ActivityLog};
use crate::generation::GenerationClient;
use crate::profile::{ProfileError, StudentProfile};
use crate::stages::{Stage, StageOutput, context, strategy, tasks};

/// Agent name for entries the orchestrator itself appends.
pub const ORCHESTRATOR_AGENT: &str = "Orchestrator";

/// Message of the terminal activity-log entry.
pub const READY_MESSAGE: &str = "System ready";

/// What to do when a stage's generation call fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Keep going; later stages see the error text as their input.
    #[default]
    Propagate,
    /// Abort the run at the first failed stage.
    Halt,
}

#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub failure_policy: FailurePolicy,
}

/// Reasons a run produces no [`ResultBundle`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid student profile: {0}")]
    InvalidProfile(#[from] ProfileError),

    /// Only returned under [`FailurePolicy::Halt`].
    #[error("{stage} stage failed: {reason}")]
    StageFailed { stage: Stage, reason: String },
}

/// Everything one run produced.
///
/// Serializes to `{world_model, strategy, tasks, logs}`; failed stages
/// appear as their error-marker text.
#[derive(Debug, Clone, Serialize)]
pub struct ResultBundle {
    pub world_model: StageOutput,
    pub strategy: StageOutput,
    pub tasks: StageOutput,
    pub logs: Vec<ActivityEntry>,
}

impl ResultBundle {
    /// True if any stage's generation call failed.
    pub fn has_failures(&self) -> bool {
        [&self.world_model, &self.strategy, &self.tasks]
            .iter()
            .any(|o| o.is_failed())
    }
}

/// Runs the context, strategy and planning stages against one client.
///
/// A `Pipeline` holds no per-run state, so one instance can serve
/// concurrent runs; each run gets its own [`ActivityLog`].
#[derive(Clone)]
pub struct Pipeline {
    client: Arc<dyn GenerationClient>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self::with_config(client, PipelineConfig::default())
    }

    pub fn with_config(client: Arc<dyn GenerationClient>, config: PipelineConfig) -> Self {
        Self { client, config }
    }

    /// Run all three stages for `profile`.
    ///
    /// Returns either a complete bundle or an error, never a partial bundle.
    pub async fn run(&self, profile: &StudentProfile) -> Result<ResultBundle, PipelineError> {
        let span = tracing::info_span!("pipeline_run", run_id = %Uuid::new_v4());
        self.run_inner(profile).instrument(span).await
    }

    async fn run_inner(&self, profile: &StudentProfile) -> Result<ResultBundle, PipelineError> {
        profile.validate()?;
        tracing::info!(exam = %profile.exam, client = self.client.name(), "pipeline run started");

        let client = self.client.as_ref();
        let mut log = ActivityLog::new();

        log_start(&mut log, Stage::Context);
        let world_model = context::build_world_model(client, profile).await;
        self.check(Stage::Context, &world_model)?;

        log_start(&mut log, Stage::Strategy);
        let strategy = strategy::create_strategy(client, &world_model, profile).await;
        self.check(Stage::Strategy, &strategy)?;

        log_start(&mut log, Stage::Planning);
        let tasks = tasks::create_daily_tasks(client, &strategy, profile).await;
        self.check(Stage::Planning, &tasks)?;

        log.append(ORCHESTRATOR_AGENT, READY_MESSAGE);

        let bundle = ResultBundle {
            world_model,
            strategy,
            tasks,
            logs: log.snapshot(),
        };
        tracing::info!(failures = bundle.has_failures(), "pipeline run finished");
        Ok(bundle)
    }

    fn check(&self, stage: Stage, output: &StageOutput) -> Result<(), PipelineError> {
        match (self.config.failure_policy, output.failure_reason()) {
            (FailurePolicy::Halt, Some(reason)) => Err(PipelineError::StageFailed {
                stage,
                reason: reason.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

fn log_start(log: &mut ActivityLog, stage: Stage) {
    log.append(stage.agent_name(), stage.start_message());
}
