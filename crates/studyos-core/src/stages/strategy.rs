//! Strategy stage: turn the world model into a six-week, three-phase plan.

use crate::generation::GenerationClient;
use crate::profile::StudentProfile;

use super::{Stage, StageOutput, generate_stage};

/// Length of the strategic plan.
pub const STRATEGY_WEEKS: u32 = 6;

/// Named phases the plan is split into, in order.
pub const PHASES: [&str; 3] = ["Foundation", "Application", "Mastery"];

/// Prompt embedding the world model verbatim plus the profile.
pub fn build_prompt(world_model: &str, profile: &StudentProfile) -> String {
    format!(
        "Based on this student context: {world_model}\n\
         \n\
         Create a {STRATEGY_WEEKS}-week strategic learning plan for {exam}.\n\
         Subjects: {subjects}\n\
         Deadline: {deadline} days\n\
         Focus on weak areas: {weak}\n\
         Available time: {hours} hours/day\n\
         \n\
         Return {count} main phases ({phases}) with brief goals.\n",
        exam = profile.exam,
        subjects = profile.subjects_list(),
        deadline = profile.deadline,
        weak = profile.weak_areas_text(),
        hours = profile.study_hours,
        count = PHASES.len(),
        phases = PHASES.join(", "),
    )
}

/// Run the strategy stage on the context stage's output.
pub async fn create_strategy(
    client: &dyn GenerationClient,
    world_model: &StageOutput,
    profile: &StudentProfile,
) -> StageOutput {
    let prompt = build_prompt(&world_model.as_text(), profile);
    generate_stage(Stage::Strategy, client, prompt).await
}
