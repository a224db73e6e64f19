pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;

pub use crate::error::{Error, Result};
pub use crate::models::question::Question;
pub use crate::models::quiz::Quiz;
pub use crate::models::result::{GradedAnswer, QuizResult, ScoreRecord};
pub use crate::models::session::{QuizSession, SessionPhase};

use crate::config::Config;
use crate::services::{import_service::QuestionImporter, quiz_engine::QuizEngine};

/// The engine and importer configured from one `Config`.
#[derive(Debug, Clone)]
pub struct QuizToolkit {
    pub engine: QuizEngine,
    pub importer: QuestionImporter,
}

impl QuizToolkit {
    pub fn new(config: &Config) -> Self {
        Self {
            engine: QuizEngine::from_config(config),
            importer: QuestionImporter::from_config(config),
        }
    }

    pub fn from_global_config() -> Self {
        Self::new(crate::config::get_config())
    }
}
