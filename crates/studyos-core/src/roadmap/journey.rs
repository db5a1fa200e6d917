//! Week-by-week learning journey sized to the deadline.

use serde::{Deserialize, Serialize};

use super::{Intensity, StudyStyle};

/// Shortest journey, used for any deadline under five weeks.
pub const MIN_WEEKS: u32 = 4;
/// Longest journey; longer deadlines are capped here.
pub const MAX_WEEKS: u32 = 16;
/// Journeys up to this length get one deep-dive week per subject.
const STANDARD_WEEKS: u32 = 8;
/// Subjects that get their own deep-dive week in a standard journey.
const DEEP_DIVE_SUBJECTS: usize = 4;

/// Input of [`learning_journey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyRequest {
    /// Days remaining until the exam.
    pub deadline: u32,
    pub subjects: Vec<String>,
    #[serde(default)]
    pub study_style: StudyStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStatus {
    Current,
    Upcoming,
}

/// One week of the journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyWeek {
    /// 1-based week number.
    pub week: u32,
    pub focus: String,
    pub status: WeekStatus,
    pub topics: String,
    pub intensity: Intensity,
}

/// Per-phase intensities for a study style.
struct PhaseIntensity {
    foundation: Intensity,
    practice: Intensity,
    mastery: Intensity,
    revision: Intensity,
}

impl PhaseIntensity {
    fn for_style(style: StudyStyle) -> Self {
        use Intensity::*;
        let [foundation, practice, mastery, revision] = match style {
            StudyStyle::Intensive => [High, VeryHigh, VeryHigh, Medium],
            StudyStyle::Balanced => [Medium, High, High, Medium],
            StudyStyle::Relaxed => [Low, Medium, Medium, Low],
        };
        Self {
            foundation,
            practice,
            mastery,
            revision,
        }
    }
}

/// Number of weeks a journey spans for `deadline_days`.
pub fn journey_weeks(deadline_days: u32) -> u32 {
    (deadline_days / 7).clamp(MIN_WEEKS, MAX_WEEKS)
}

/// Build the journey for `req`.
///
/// Short deadlines get a fixed four-week crash plan, mid-range deadlines
/// one deep-dive week per subject followed by practice and rest, and long
/// deadlines a foundation/practice/mastery/revision split. The result
/// never has more than [`journey_weeks`] entries, and only week 1 is
/// [`WeekStatus::Current`].
pub fn learning_journey(req: &JourneyRequest) -> Vec<JourneyWeek> {
    let weeks = journey_weeks(req.deadline);
    let phases = if weeks <= MIN_WEEKS {
        crash_plan(req.subjects.len())
    } else if weeks <= STANDARD_WEEKS {
        standard_plan(&req.subjects, &PhaseIntensity::for_style(req.study_style))
    } else {
        extended_plan(weeks, &req.subjects, &PhaseIntensity::for_style(req.study_style))
    };

    phases
        .into_iter()
        .take(weeks as usize)
        .zip(1..)
        .map(|((focus, topics, intensity), week)| JourneyWeek {
            week,
            focus,
            status: if week == 1 {
                WeekStatus::Current
            } else {
                WeekStatus::Upcoming
            },
            topics,
            intensity,
        })
        .collect()
}

type Phase = (String, String, Intensity);

fn phase(focus: impl Into<String>, topics: impl Into<String>, intensity: Intensity) -> Phase {
    (focus.into(), topics.into(), intensity)
}

fn crash_plan(subject_count: usize) -> Vec<Phase> {
    vec![
        phase(
            "Rapid Foundation Building",
            format!("Core concepts - All {subject_count} subjects"),
            Intensity::High,
        ),
        phase("Problem Solving Sprint", "Practice and application", Intensity::VeryHigh),
        phase("Mock Tests & Analysis", "Full-length practice tests", Intensity::High),
        phase("Final Revision", "Weak areas + key concepts", Intensity::Medium),
    ]
}

fn standard_plan(subjects: &[String], level: &PhaseIntensity) -> Vec<Phase> {
    let mut phases: Vec<Phase> = subjects
        .iter()
        .take(DEEP_DIVE_SUBJECTS)
        .map(|s| phase(format!("{s} Deep Dive"), "Comprehensive coverage", level.foundation))
        .collect();
    phases.push(phase("Integration & Practice", "Cross-topic problems", level.practice));
    phases.push(phase("Mock Test Series", "Exam simulation", level.mastery));
    phases.push(phase("Final Prep & Rest", "Light revision + recovery", level.revision));
    phases
}

fn extended_plan(weeks: u32, subjects: &[String], level: &PhaseIntensity) -> Vec<Phase> {
    let foundation = (weeks / 3).max(2);
    let practice = (weeks / 4).max(2);
    let mastery = (weeks / 5).max(2);
    let revision = weeks.saturating_sub(foundation + practice + mastery);

    let mut phases = Vec::with_capacity(weeks as usize);
    for i in 0..foundation as usize {
        let focus = match subjects.get(i % subjects.len().max(1)) {
            Some(subject) => format!("Foundation: {subject}"),
            None => "Foundation: All subjects".to_string(),
        };
        phases.push(phase(focus, "Fundamentals and basics", level.foundation));
    }
    for i in 1..=practice {
        phases.push(phase(
            format!("Advanced Practice Week {i}"),
            "Problem-solving and application",
            level.practice,
        ));
    }
    for i in 1..=mastery {
        phases.push(phase(format!("Mastery Week {i}"), "Mock tests and analysis", level.mastery));
    }
    for i in 1..=revision {
        if i == revision {
            phases.push(phase("Final Prep & Rest", "Light review + recovery", Intensity::Low));
        } else {
            phases.push(phase(
                format!("Revision Sprint {i}"),
                "Comprehensive revision",
                level.revision,
            ));
        }
    }
    phases
}
