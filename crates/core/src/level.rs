use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use thiserror::Error;

use crate::generator::QuestionSet;
use crate::model::{Grade, Problem};
use crate::scoring::{ScoringEngine, ScoringError, Tally};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LevelError {
    #[error("level already completed")]
    Completed,

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

/// Read-only result of one submission, suitable for display.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub points_awarded: u32,
    pub correct_answer: f64,
    pub streak: u32,
    pub score: u32,
    /// 1-based number of the question that was just answered.
    pub question_number: usize,
    pub is_complete: bool,
}

/// Lifecycle of a level attempt once it has been started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    InProgress,
    Completed,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One attempt at a grade level.
///
/// Created in progress with a fresh question set and zeroed counters. Each
/// submission advances the question index; after the last question the
/// session is completed and becomes read-only. A new attempt always gets a new
/// `LevelSession`.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSession {
    questions: QuestionSet,
    tally: Tally,
    hint_shown: bool,
    hints_used: u32,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl LevelSession {
    /// Start an attempt over a prepared question set.
    #[must_use]
    pub fn start(questions: QuestionSet, started_at: DateTime<Utc>) -> Self {
        Self {
            questions,
            tally: Tally::default(),
            hint_shown: false,
            hints_used: 0,
            started_at,
            completed_at: None,
        }
    }

    /// Generate a question set for `grade` and start an attempt over it.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, grade: Grade, started_at: DateTime<Utc>) -> Self {
        Self::start(QuestionSet::generate(rng, grade), started_at)
    }

    #[must_use]
    pub fn grade(&self) -> Grade {
        self.questions.grade()
    }

    #[must_use]
    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    #[must_use]
    pub fn tally(&self) -> Tally {
        self.tally
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.tally.current_index
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.tally.score
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.tally.correct_count
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.tally.streak
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.tally.best_streak
    }

    /// Whether the hint was revealed for the current question.
    #[must_use]
    pub fn hint_shown(&self) -> bool {
        self.hint_shown
    }

    #[must_use]
    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.completed_at.is_some() {
            SessionPhase::Completed
        } else {
            SessionPhase::InProgress
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn current_problem(&self) -> Option<&Problem> {
        if self.is_complete() {
            return None;
        }
        self.questions.get(self.tally.current_index)
    }

    /// Wall time from start to completion, or to `now` while in progress.
    /// Never negative.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        let end = self.completed_at.unwrap_or(now);
        end.signed_duration_since(self.started_at)
            .max(Duration::zero())
    }

    /// Reveal the hint for the current question.
    ///
    /// # Errors
    ///
    /// Returns `LevelError::Completed` once every question has been answered.
    pub fn reveal_hint(&mut self) -> Result<&str, LevelError> {
        if self.is_complete() {
            return Err(LevelError::Completed);
        }
        let index = self.tally.current_index;
        let problem = self.questions.get(index).ok_or(LevelError::Completed)?;
        if !self.hint_shown {
            self.hint_shown = true;
            self.hints_used += 1;
        }
        Ok(problem.hint())
    }

    /// Parse and grade raw answer text for the current question.
    ///
    /// # Errors
    ///
    /// Returns `LevelError::Scoring` for non-numeric input (session untouched)
    /// and `LevelError::Completed` once the level is over.
    pub fn submit_answer(
        &mut self,
        engine: &ScoringEngine,
        raw: &str,
        answered_at: DateTime<Utc>,
    ) -> Result<AnswerFeedback, LevelError> {
        if self.is_complete() {
            return Err(LevelError::Completed);
        }
        let value = ScoringEngine::parse_answer(raw)?;
        self.submit_value(engine, value, answered_at)
    }

    /// Grade a numeric answer for the current question and advance.
    ///
    /// # Errors
    ///
    /// Returns `LevelError::Scoring` for non-finite values (session untouched)
    /// and `LevelError::Completed` once the level is over.
    pub fn submit_value(
        &mut self,
        engine: &ScoringEngine,
        value: f64,
        answered_at: DateTime<Utc>,
    ) -> Result<AnswerFeedback, LevelError> {
        if self.is_complete() {
            return Err(LevelError::Completed);
        }
        let problem = self
            .questions
            .get(self.tally.current_index)
            .ok_or(LevelError::Completed)?;

        let evaluation = engine.evaluate(value, problem, self.tally, self.hint_shown)?;
        let correct_answer = problem.correct_answer();

        self.tally = evaluation.tally;
        self.hint_shown = false;
        if self.tally.current_index >= self.questions.len() {
            self.completed_at = Some(answered_at);
        }

        Ok(AnswerFeedback {
            is_correct: evaluation.is_correct,
            points_awarded: evaluation.points_awarded,
            correct_answer,
            streak: self.tally.streak,
            score: self.tally.score,
            question_number: self.tally.current_index,
            is_complete: self.is_complete(),
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
