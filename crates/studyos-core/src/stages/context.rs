//! Context stage: build the student's "world model".

use crate::generation::GenerationClient;
use crate::profile::StudentProfile;

use super::{Stage, StageOutput, generate_stage};

/// Prompt asking for a situational analysis of the profile.
pub fn build_prompt(profile: &StudentProfile) -> String {
    format!(
        "Analyze this student profile and create a structured world model:\n\
         Exam: {exam}\n\
         Deadline: {deadline} days\n\
         Subjects: {subjects}\n\
         Study Hours: {hours} hours/day\n\
         Weak Areas: {weak}\n\
         \n\
         Return a brief analysis of their situation.\n",
        exam = profile.exam,
        deadline = profile.deadline,
        subjects = profile.subjects_list(),
        hours = profile.study_hours,
        weak = profile.weak_areas_text(),
    )
}

/// Run the context stage.
pub async fn build_world_model(
    client: &dyn GenerationClient,
    profile: &StudentProfile,
) -> StageOutput {
    generate_stage(Stage::Context, client, build_prompt(profile)).await
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::generation::GenerationError;

    fn profile() -> StudentProfile {
        StudentProfile {
            exam: "JEE Advanced".to_string(),
            deadline: 120,
            subjects: vec![
                "Chemistry".to_string(),
                "Math".to_string(),
                "Physics".to_string(),
            ],
            study_hours: 6,
            weak_areas: "Organic reactions, rotational dynamics".to_string(),
        }
    }

    #[test]
    fn prompt_embeds_every_profile_field() {
        let prompt = build_prompt(&profile());
        assert!(prompt.contains("Exam: JEE Advanced"));
        assert!(prompt.contains("Deadline: 120 days"));
        assert!(prompt.contains("Subjects: Chemistry, Math, Physics"));
        assert!(prompt.contains("Study Hours: 6 hours/day"));
        assert!(prompt.contains("Weak Areas: Organic reactions, rotational dynamics"));
    }

    struct EchoClient;

    #[async_trait]
    impl GenerationClient for EchoClient {
        fn name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            Ok(prompt.to_string())
        }
    }

    #[tokio::test]
    async fn world_model_is_client_output_verbatim() {
        let p = profile();
        let out = build_world_model(&EchoClient, &p).await;
        assert_eq!(out, StageOutput::Generated(build_prompt(&p)));
    }
}
