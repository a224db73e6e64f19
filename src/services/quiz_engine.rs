use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::quiz::Quiz;
use crate::models::result::{GradedAnswer, QuizResult, ScoreRecord};
use crate::models::session::{QuizSession, SessionPhase};
use crate::services::score_sink::ScoreSink;
use crate::utils::validation::validate;
use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

/// Minimum score (inclusive) that counts as a pass. Fixed for every quiz.
pub const PASS_THRESHOLD: u8 = 50;

/// `round(100 * correct / total)` with halves rounded up. An empty quiz
/// scores 0.
pub fn score_percentage(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total);
    let pct = Decimal::from(correct) * Decimal::ONE_HUNDRED / Decimal::from(total);
    pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u8()
        .unwrap_or(0)
}

pub fn is_passing(score: u8) -> bool {
    score >= PASS_THRESHOLD
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnginePolicy {
    /// When set, `next`, forward `go_to` and `submit` refuse to leave a
    /// question that has no recorded answer. Scoring itself never needs it:
    /// unanswered questions simply count as wrong.
    pub require_answer_before_advance: bool,
}

/// Drives a learner through a quiz. The engine holds no session state of its
/// own; every call works on the `QuizSession` the caller owns.
///
/// Misuse from a sloppy caller degrades to "no change" where possible:
/// navigation clamps, and `select`/`submit` after submission are no-ops.
/// Only genuinely invalid input (bad step or option index, restart before
/// submission, the answer gate) is reported as an error.
#[derive(Debug, Clone, Default)]
pub struct QuizEngine {
    policy: EnginePolicy,
}

impl QuizEngine {
    pub fn new(policy: EnginePolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(EnginePolicy {
            require_answer_before_advance: config.require_answer_before_advance,
        })
    }

    pub fn policy(&self) -> EnginePolicy {
        self.policy
    }

    pub fn start<'q>(&self, quiz: &'q Quiz) -> Result<QuizSession<'q>> {
        if quiz.is_empty() {
            tracing::warn!(quiz_id = %quiz.id, "Refusing to start a quiz without questions");
            return Err(Error::EmptyQuiz);
        }
        validate(quiz)?;

        tracing::info!(quiz_id = %quiz.id, questions = quiz.len(), "Quiz session started");
        Ok(QuizSession::new(quiz))
    }

    pub fn select(&self, session: &mut QuizSession<'_>, step: usize, option: usize) -> Result<()> {
        if session.is_submitted() {
            tracing::debug!(
                quiz_id = %session.quiz.id,
                step,
                "Ignoring selection on a submitted session"
            );
            return Ok(());
        }

        let len = session.quiz.len();
        let question = session
            .quiz
            .question(step)
            .ok_or(Error::StepOutOfRange { step, len })?;

        if option >= question.options.len() {
            return Err(Error::InvalidSelection {
                step,
                option,
                option_count: question.options.len(),
            });
        }

        session.selected_answers.insert(step, option);
        Ok(())
    }

    /// Moves to `step`, clamped to the last question. Returns the step the
    /// session ends up on.
    pub fn go_to(&self, session: &mut QuizSession<'_>, step: usize) -> Result<usize> {
        if session.is_submitted() {
            return Ok(session.current_step);
        }

        let last = session.quiz.len().saturating_sub(1);
        let target = step.min(last);

        if self.policy.require_answer_before_advance
            && target > session.current_step
            && !session.is_current_answered()
        {
            return Err(Error::UnansweredQuestion {
                step: session.current_step,
            });
        }

        session.current_step = target;
        Ok(target)
    }

    pub fn next(&self, session: &mut QuizSession<'_>) -> Result<usize> {
        let step = session.current_step.saturating_add(1);
        self.go_to(session, step)
    }

    pub fn previous(&self, session: &mut QuizSession<'_>) -> Result<usize> {
        let step = session.current_step.saturating_sub(1);
        self.go_to(session, step)
    }

    /// Grades the session. A second call returns the stored result without
    /// regrading.
    pub fn submit(&self, session: &mut QuizSession<'_>) -> Result<QuizResult> {
        if let Some(result) = &session.result {
            return Ok(result.clone());
        }

        if self.policy.require_answer_before_advance && !session.is_current_answered() {
            return Err(Error::UnansweredQuestion {
                step: session.current_step,
            });
        }

        let result = grade(session.quiz, &session.selected_answers);
        session.phase = SessionPhase::Submitted;
        session.result = Some(result.clone());

        tracing::info!(
            quiz_id = %result.quiz_id,
            score = result.score,
            correct = result.correct_count,
            total = result.total_questions,
            passed = result.passed,
            "Quiz submitted"
        );
        Ok(result)
    }

    /// Submits and hands the score to `sink`. The score is recorded once per
    /// attempt; a sink failure leaves it unrecorded so a later call retries.
    pub fn submit_and_record<S>(
        &self,
        session: &mut QuizSession<'_>,
        lesson_id: &str,
        sink: &mut S,
    ) -> Result<QuizResult>
    where
        S: ScoreSink + ?Sized,
    {
        let result = self.submit(session)?;
        if !session.recorded {
            sink.record(ScoreRecord::from_result(lesson_id, &result))?;
            session.recorded = true;
        }
        Ok(result)
    }

    pub fn restart(&self, session: &mut QuizSession<'_>) -> Result<()> {
        if !session.is_submitted() {
            return Err(Error::InvalidState(
                "restart is only available from the result view".to_string(),
            ));
        }

        session.reset();
        tracing::info!(quiz_id = %session.quiz.id, "Quiz session restarted");
        Ok(())
    }
}

fn grade(quiz: &Quiz, answers: &BTreeMap<usize, usize>) -> QuizResult {
    let mut graded = Vec::with_capacity(quiz.len());
    let mut correct_count = 0;

    for (step, q) in quiz.questions.iter().enumerate() {
        let selected = answers.get(&step).copied();
        let is_correct = selected.map_or(false, |opt| q.is_correct(opt));
        if is_correct {
            correct_count += 1;
        }
        graded.push(GradedAnswer {
            question_id: q.id.clone(),
            step,
            selected,
            correct_option_index: q.correct_option_index,
            is_correct,
        });
    }

    let score = score_percentage(correct_count, quiz.len());
    QuizResult {
        quiz_id: quiz.id.clone(),
        correct_count,
        total_questions: quiz.len(),
        score,
        passed: is_passing(score),
        graded,
        submitted_at: Utc::now(),
    }
}
