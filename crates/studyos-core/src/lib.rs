//! Core of the StudyOS planner.
//!
//! A fixed three-stage pipeline turns a [`StudentProfile`] into a study
//! plan: the context stage builds a world model, the strategy stage turns
//! it into a six-week plan, and the task stage picks today's three tasks.
//! Every stage is one call to a [`GenerationClient`]; the
//! [`Pipeline`] threads each output into the next prompt and records each
//! transition in an [`ActivityLog`].
//!
//! The [`roadmap`] module adds model-free planning: a week-by-week learning
//! journey and a weightage-driven daily task list.

pub mod activity;
pub mod generation;
pub mod pipeline;
pub mod profile;
pub mod roadmap;
pub mod stages;

pub use activity::{ActivityEntry, ActivityLog};
pub use generation::{GeminiClient, GeminiConfig, GenerationClient, GenerationError};
pub use pipeline::{FailurePolicy, Pipeline, PipelineConfig, PipelineError, ResultBundle};
pub use profile::{ProfileError, StudentProfile};
pub use roadmap::{
    DailyTask, DailyTasksRequest, JourneyRequest, JourneyWeek, StudyStyle, daily_tasks,
    learning_journey,
};
pub use stages::{Stage, StageOutput};
