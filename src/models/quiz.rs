use crate::error::{Error, Result};
use crate::models::question::Question;
use crate::utils::validation::validate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// The question bank attached to a lesson. Question order is the
/// presentation order during play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default)]
    #[validate(nested)]
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            questions: Vec::new(),
        }
    }

    pub fn with_questions(mut self, questions: Vec<Question>) -> Self {
        self.questions = questions;
        self
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, step: usize) -> Option<&Question> {
        self.questions.get(step)
    }

    pub fn add_question(&mut self, question: Question) -> Result<&Question> {
        validate(&question)?;
        let idx = self.questions.len();
        self.questions.push(question);
        self.questions
            .get(idx)
            .ok_or_else(|| Error::InvalidState("question was not stored".to_string()))
    }

    /// Appends already-validated questions in order. No deduplication is
    /// performed, so importing the same text twice yields duplicates.
    pub fn append_questions<I>(&mut self, questions: I) -> usize
    where
        I: IntoIterator<Item = Question>,
    {
        let before = self.questions.len();
        self.questions.extend(questions);
        self.questions.len() - before
    }

    pub fn update_question(
        &mut self,
        id: &str,
        text: impl Into<String>,
        options: Vec<String>,
        correct_option_index: usize,
    ) -> Result<&Question> {
        let idx = self.position(id)?;
        let updated = Question {
            id: id.to_string(),
            text: text.into(),
            options,
            correct_option_index,
        };
        validate(&updated)?;
        self.questions[idx] = updated;
        Ok(&self.questions[idx])
    }

    pub fn remove_question(&mut self, id: &str) -> Result<Question> {
        let idx = self.position(id)?;
        Ok(self.questions.remove(idx))
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.questions
            .iter()
            .position(|q| q.id == id)
            .ok_or_else(|| Error::QuestionNotFound(id.to_string()))
    }
}
