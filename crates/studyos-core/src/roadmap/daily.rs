//! Daily task list allocated from exam weightages.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Intensity;

/// Most subjects scheduled on a single day.
pub const MAX_DAILY_SUBJECTS: usize = 5;
/// Allocations shorter than this are dropped.
pub const MIN_TASK_MINUTES: u32 = 10;
/// Weightage assumed for a subject missing from the weightage table.
pub const DEFAULT_WEIGHTAGE: u32 = 25;
/// Denominator used when the weightage table is empty or all zero.
const FALLBACK_TOTAL_WEIGHTAGE: u32 = 100;
/// Subject label of the closing mini-test.
pub const MINI_TEST_SUBJECT: &str = "Test";

/// Input of [`daily_tasks`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTasksRequest {
    pub subjects: Vec<String>,
    /// Exam weightage per subject, in percent.
    #[serde(default)]
    pub subject_weightages: HashMap<String, u32>,
    pub study_hours: u32,
    #[serde(default)]
    pub weak_areas: String,
}

/// One item of today's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTask {
    pub id: u32,
    pub text: String,
    pub effort: Intensity,
    pub reason: String,
    pub subject: String,
    pub weightage: u32,
}

/// Build today's tasks for `req`.
///
/// Subjects are taken heaviest weightage first (ties keep input order), up
/// to [`MAX_DAILY_SUBJECTS`]. Each gets a share of the study time in
/// proportion to its weightage; shares under [`MIN_TASK_MINUTES`] are
/// skipped. A mini-test always closes the list.
pub fn daily_tasks(req: &DailyTasksRequest) -> Vec<DailyTask> {
    let weights = &req.subject_weightages;
    let mut ordered: Vec<&String> = req.subjects.iter().collect();
    ordered.sort_by_key(|s| std::cmp::Reverse(weights.get(*s).copied().unwrap_or(0)));

    let total = match weights.values().fold(0u32, |acc, w| acc.saturating_add(*w)) {
        0 => FALLBACK_TOTAL_WEIGHTAGE,
        sum => sum,
    };
    let weak_areas = req.weak_areas.to_lowercase();

    let mut tasks: Vec<DailyTask> = ordered
        .into_iter()
        .take(MAX_DAILY_SUBJECTS)
        .filter_map(|subject| {
            let weightage = weights.get(subject).copied().unwrap_or(DEFAULT_WEIGHTAGE);
            let minutes = allocate_minutes(weightage, total, req.study_hours);
            if minutes < MIN_TASK_MINUTES {
                return None;
            }
            let is_weak = !weak_areas.is_empty() && weak_areas.contains(&subject.to_lowercase());
            let effort = if weightage > 30 || is_weak {
                Intensity::High
            } else if weightage > 20 {
                Intensity::Medium
            } else {
                Intensity::Low
            };
            let reason = if is_weak {
                "Identified as weak area".to_string()
            } else {
                format!("{weightage}% exam weightage")
            };
            Some((subject, weightage, minutes, effort, reason))
        })
        .zip(1..)
        .map(|((subject, weightage, minutes, effort, reason), id)| DailyTask {
            id,
            text: format!("{subject}: Core concepts practice ({minutes} min)"),
            effort,
            reason,
            subject: subject.clone(),
            weightage,
        })
        .collect();

    let id = tasks.len() as u32 + 1;
    tasks.push(DailyTask {
        id,
        text: format!(
            "Daily Mini-Test: {} questions (15 min)",
            req.subjects.len().min(MAX_DAILY_SUBJECTS)
        ),
        effort: Intensity::Medium,
        reason: "Daily assessment and progress tracking".to_string(),
        subject: MINI_TEST_SUBJECT.to_string(),
        weightage: 0,
    });
    tasks
}

/// Minutes for a subject of `weightage` out of `total`, rounded half to even.
fn allocate_minutes(weightage: u32, total: u32, study_hours: u32) -> u32 {
    let minutes = f64::from(weightage) / f64::from(total) * f64::from(study_hours) * 60.0;
    minutes.round_ties_even() as u32
}
