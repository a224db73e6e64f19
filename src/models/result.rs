use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedAnswer {
    pub question_id: String,
    pub step: usize,
    pub selected: Option<usize>,
    pub correct_option_index: usize,
    pub is_correct: bool,
}

/// Outcome of a submitted session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub quiz_id: String,
    pub correct_count: usize,
    pub total_questions: usize,
    /// Integer percentage in `0..=100`.
    pub score: u8,
    pub passed: bool,
    pub graded: Vec<GradedAnswer>,
    pub submitted_at: DateTime<Utc>,
}

impl QuizResult {
    pub fn unanswered_count(&self) -> usize {
        self.graded.iter().filter(|g| g.selected.is_none()).count()
    }
}

/// What gets handed to the persistence collaborator after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub lesson_id: String,
    pub quiz_id: String,
    pub score: u8,
    pub passed: bool,
    pub recorded_at: DateTime<Utc>,
}

impl ScoreRecord {
    pub fn from_result(lesson_id: impl Into<String>, result: &QuizResult) -> Self {
        Self {
            lesson_id: lesson_id.into(),
            quiz_id: result.quiz_id.clone(),
            score: result.score,
            passed: result.passed,
            recorded_at: result.submitted_at,
        }
    }
}
