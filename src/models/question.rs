use crate::utils::id::new_question_id;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const OPTION_COUNT: usize = 4;

const OPTION_LABELS: [char; OPTION_COUNT] = ['A', 'B', 'C', 'D'];

/// A multiple-choice question with exactly four options.
///
/// Option order is part of the answer key: `correct_option_index` points into
/// `options` by position, so options are never reordered once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "crate::utils::validation::correct_index_in_range"))]
pub struct Question {
    pub id: String,
    #[validate(length(min = 1, message = "Question text must not be empty"))]
    pub text: String,
    #[validate(length(equal = 4, message = "A question needs exactly four options"))]
    pub options: Vec<String>,
    pub correct_option_index: usize,
}

impl Question {
    /// Builds a question with a freshly generated id. Call `validate` before
    /// handing it to a quiz.
    pub fn new(text: impl Into<String>, options: Vec<String>, correct_option_index: usize) -> Self {
        Self {
            id: new_question_id(),
            text: text.into(),
            options,
            correct_option_index,
        }
    }

    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_option_index
    }

    pub fn option_label(idx: usize) -> Option<char> {
        OPTION_LABELS.get(idx).copied()
    }

    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_option_index).map(String::as_str)
    }
}
