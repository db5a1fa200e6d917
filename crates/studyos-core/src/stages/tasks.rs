//! Task stage: pick today's concrete, time-boxed study tasks.

use crate::generation::GenerationClient;
use crate::profile::StudentProfile;

use super::{Stage, StageOutput, generate_stage};

/// Number of daily tasks requested.
pub const DAILY_TASK_COUNT: usize = 3;

/// Prompt embedding the strategy verbatim plus the profile.
pub fn build_prompt(strategy: &str, profile: &StudentProfile) -> String {
    format!(
        "Based on this strategy: {strategy}\n\
         \n\
         Create {DAILY_TASK_COUNT} daily study tasks for today ({exam}, {deadline} days remaining) focusing on:\n\
         - Weak areas: {weak}\n\
         - Subjects: {subjects}\n\
         - Time available: {hours} hours\n\
         \n\
         Format each task as: \"Subject: Topic (duration)\" with effort level and reason.\n",
        exam = profile.exam,
        deadline = profile.deadline,
        weak = profile.weak_areas_text(),
        subjects = profile.subjects_list(),
        hours = profile.study_hours,
    )
}

/// Run the task stage on the strategy stage's output.
pub async fn create_daily_tasks(
    client: &dyn GenerationClient,
    strategy: &StageOutput,
    profile: &StudentProfile,
) -> StageOutput {
    let prompt = build_prompt(&strategy.as_text(), profile);
    generate_stage(Stage::Planning, client, prompt).await
}
