//! The student profile: the single immutable input of a pipeline run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound for `study_hours`; a day has no more hours than this.
pub const MAX_STUDY_HOURS: i64 = 24;

/// Prompt text used in place of a blank `weak_areas`.
pub const NO_WEAK_AREAS: &str = "none stated";

/// What a student is preparing for and how much time they have.
///
/// Field names match the inbound wire payload (`exam`, `deadline`,
/// `subjects`, `study_hours`, `weak_areas`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Exam name, e.g. "GATE".
    pub exam: String,
    /// Days remaining until the exam.
    pub deadline: i64,
    /// Subjects to cover, in the order the student listed them.
    pub subjects: Vec<String>,
    /// Hours available for study each day.
    pub study_hours: i64,
    /// Free-text description of the student's weak areas. May be empty.
    pub weak_areas: String,
}

/// Structural problems with a [`StudentProfile`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("exam name must not be empty")]
    EmptyExam,

    #[error("deadline must not be negative (got {0} days)")]
    NegativeDeadline(i64),

    #[error("at least one subject is required")]
    NoSubjects,

    #[error("subject at position {0} is empty")]
    EmptySubject(usize),

    #[error("study_hours must be between 1 and {max} (got {0})", max = MAX_STUDY_HOURS)]
    StudyHoursOutOfRange(i64),
}

impl StudentProfile {
    /// Check that every field can be used to build a prompt.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.exam.trim().is_empty() {
            return Err(ProfileError::EmptyExam);
        }
        if self.deadline < 0 {
            return Err(ProfileError::NegativeDeadline(self.deadline));
        }
        if self.subjects.is_empty() {
            return Err(ProfileError::NoSubjects);
        }
        if let Some(pos) = self.subjects.iter().position(|s| s.trim().is_empty()) {
            return Err(ProfileError::EmptySubject(pos));
        }
        if !(1..=MAX_STUDY_HOURS).contains(&self.study_hours) {
            return Err(ProfileError::StudyHoursOutOfRange(self.study_hours));
        }
        Ok(())
    }

    /// Weak areas as they appear in prompts; blank becomes [`NO_WEAK_AREAS`].
    pub fn weak_areas_text(&self) -> &str {
        match self.weak_areas.trim() {
            "" => NO_WEAK_AREAS,
            weak => weak,
        }
    }

    /// Subjects joined for prompt inclusion, order preserved.
    pub fn subjects_list(&self) -> String {
        self.subjects.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate_profile() -> StudentProfile {
        StudentProfile {
            exam: "GATE".to_string(),
            deadline: 30,
            subjects: vec!["Math".to_string(), "Physics".to_string()],
            study_hours: 4,
            weak_areas: "Calculus".to_string(),
        }
    }

    #[test]
    fn valid_profile_passes() {
        assert_eq!(gate_profile().validate(), Ok(()));
    }

    #[test]
    fn zero_deadline_is_allowed() {
        let profile = StudentProfile {
            deadline: 0,
            ..gate_profile()
        };
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn blank_exam_is_rejected() {
        let profile = StudentProfile {
            exam: "   ".to_string(),
            ..gate_profile()
        };
        assert_eq!(profile.validate(), Err(ProfileError::EmptyExam));
    }

    #[test]
    fn negative_deadline_is_rejected() {
        let profile = StudentProfile {
            deadline: -3,
            ..gate_profile()
        };
        assert_eq!(profile.validate(), Err(ProfileError::NegativeDeadline(-3)));
    }

    #[test]
    fn empty_subjects_are_rejected() {
        let profile = StudentProfile {
            subjects: vec![],
            ..gate_profile()
        };
        assert_eq!(profile.validate(), Err(ProfileError::NoSubjects));

        let profile = StudentProfile {
            subjects: vec!["Math".to_string(), "".to_string()],
            ..gate_profile()
        };
        assert_eq!(profile.validate(), Err(ProfileError::EmptySubject(1)));
    }

    #[test]
    fn study_hours_bounds() {
        for hours in [0, -1, 25] {
            let profile = StudentProfile {
                study_hours: hours,
                ..gate_profile()
            };
            assert_eq!(
                profile.validate(),
                Err(ProfileError::StudyHoursOutOfRange(hours)),
                "hours = {hours}"
            );
        }
        let profile = StudentProfile {
            study_hours: 24,
            ..gate_profile()
        };
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn blank_weak_areas_are_accepted() {
        for weak in ["", "  "] {
            let profile = StudentProfile {
                weak_areas: weak.to_string(),
                ..gate_profile()
            };
            assert_eq!(profile.validate(), Ok(()), "weak_areas = {weak:?}");
            assert_eq!(profile.weak_areas_text(), NO_WEAK_AREAS);
        }
        assert_eq!(gate_profile().weak_areas_text(), "Calculus");
    }

    #[test]
    fn subjects_list_preserves_order() {
        assert_eq!(gate_profile().subjects_list(), "Math, Physics");
    }

    #[test]
    fn missing_field_fails_to_deserialize() {
        let json = r#"{"exam":"GATE","deadline":30,"subjects":["Math"],"study_hours":4}"#;
        let err = serde_json::from_str::<StudentProfile>(json).unwrap_err();
        assert!(err.to_string().contains("weak_areas"), "got: {err}");
    }
}
