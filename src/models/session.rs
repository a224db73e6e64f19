use crate::models::question::Question;
use crate::models::quiz::Quiz;
use crate::models::result::QuizResult;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    InProgress,
    Submitted,
}

/// One learner's attempt at one quiz. Created by `QuizEngine::start` and
/// dropped when the learner leaves; nothing here outlives the attempt.
#[derive(Debug, Clone)]
pub struct QuizSession<'q> {
    pub(crate) quiz: &'q Quiz,
    pub(crate) selected_answers: BTreeMap<usize, usize>,
    pub(crate) current_step: usize,
    pub(crate) phase: SessionPhase,
    pub(crate) result: Option<QuizResult>,
    /// Set once a `ScoreSink` has accepted this attempt's score.
    pub(crate) recorded: bool,
    pub(crate) started_at: DateTime<Utc>,
}

impl<'q> QuizSession<'q> {
    pub(crate) fn new(quiz: &'q Quiz) -> Self {
        Self {
            quiz,
            selected_answers: BTreeMap::new(),
            current_step: 0,
            phase: SessionPhase::InProgress,
            result: None,
            recorded: false,
            started_at: Utc::now(),
        }
    }

    pub(crate) fn reset(&mut self) {
        self.selected_answers.clear();
        self.current_step = 0;
        self.phase = SessionPhase::InProgress;
        self.result = None;
        self.recorded = false;
        self.started_at = Utc::now();
    }

    pub fn quiz(&self) -> &'q Quiz {
        self.quiz
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn current_question(&self) -> Option<&'q Question> {
        self.quiz.question(self.current_step)
    }

    pub fn selected_answer(&self, step: usize) -> Option<usize> {
        self.selected_answers.get(&step).copied()
    }

    pub fn selected_answers(&self) -> &BTreeMap<usize, usize> {
        &self.selected_answers
    }

    pub fn answered_count(&self) -> usize {
        self.selected_answers.len()
    }

    pub fn is_current_answered(&self) -> bool {
        self.selected_answers.contains_key(&self.current_step)
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step + 1 >= self.quiz.len()
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == SessionPhase::Submitted
    }

    /// The result view is active exactly when the session is submitted.
    pub fn show_result(&self) -> bool {
        self.is_submitted()
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    pub fn is_recorded(&self) -> bool {
        self.recorded
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
