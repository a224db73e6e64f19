use crate::error::Result;
use crate::models::result::ScoreRecord;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Receives finished scores. Storage and transport belong to the
/// implementor; the engine only hands over the record.
#[cfg_attr(test, mockall::automock)]
pub trait ScoreSink {
    fn record(&mut self, record: ScoreRecord) -> Result<()>;
}

/// One learner's score map, merged as `{lessonId: score}` with the latest
/// submission for a lesson winning.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScoreBook {
    scores: BTreeMap<String, u8>,
    history: Vec<ScoreRecord>,
}

impl InMemoryScoreBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score_for(&self, lesson_id: &str) -> Option<u8> {
        self.scores.get(lesson_id).copied()
    }

    pub fn history(&self) -> &[ScoreRecord] {
        &self.history
    }

    pub fn to_json(&self) -> Result<JsonValue> {
        Ok(serde_json::to_value(&self.scores)?)
    }
}

impl ScoreSink for InMemoryScoreBook {
    fn record(&mut self, record: ScoreRecord) -> Result<()> {
        tracing::debug!(
            lesson_id = %record.lesson_id,
            quiz_id = %record.quiz_id,
            score = record.score,
            "Recording quiz score"
        );
        self.scores.insert(record.lesson_id.clone(), record.score);
        self.history.push(record);
        Ok(())
    }
}
