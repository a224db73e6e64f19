pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Quiz has no questions")]
    EmptyQuiz,

    #[error("Invalid selection: option {option} for question {step} (question has {option_count} options)")]
    InvalidSelection {
        step: usize,
        option: usize,
        option_count: usize,
    },

    #[error("Step {step} is outside the quiz (0..{len})")]
    StepOutOfRange { step: usize, len: usize },

    #[error("Question {step} must be answered before moving on")]
    UnansweredQuestion { step: usize },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Question not found: {0}")]
    QuestionNotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
