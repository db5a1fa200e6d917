//! Deterministic study roadmap: a week-by-week learning journey and a
//! weightage-driven daily task list.
//!
//! Unlike the generation stages, nothing here calls a model. Both builders
//! are pure functions of their request, so the same request always yields
//! the same plan.

pub mod daily;
pub mod journey;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use daily::{DailyTask, DailyTasksRequest, daily_tasks};
pub use journey::{JourneyRequest, JourneyWeek, WeekStatus, learning_journey};

/// How hard the student wants to push. Unknown names fall back to
/// [`StudyStyle::Balanced`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum StudyStyle {
    Intensive,
    #[default]
    Balanced,
    Relaxed,
}

impl From<String> for StudyStyle {
    fn from(name: String) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "intensive" => Self::Intensive,
            "relaxed" => Self::Relaxed,
            _ => Self::Balanced,
        }
    }
}

/// Workload level of a week or task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        })
    }
}
