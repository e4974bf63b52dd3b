use thiserror::Error;

use crate::model::{Problem, ScoringRules};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors raised while grading a submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("please enter a number (got {0:?})")]
    InvalidInput(String),
}

//
// ─── TALLY ─────────────────────────────────────────────────────────────────────
//

/// Running counters of a level attempt.
///
/// Invariant: `correct_count <= current_index`, and `streak <= best_streak`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub current_index: usize,
    pub score: u32,
    pub correct_count: usize,
    pub streak: u32,
    pub best_streak: u32,
}

/// Outcome of grading one answer. `tally` is the state after the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub is_correct: bool,
    pub points_awarded: u32,
    pub tally: Tally,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Grades submissions and evolves the running tally.
///
/// A correct answer earns `base + bonus · streak_before - penalty(hint)`, never
/// less than the configured floor, and extends the streak. A wrong answer earns
/// nothing and resets the streak. Either way the question index advances by one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine {
    rules: ScoringRules,
}

impl ScoringEngine {
    #[must_use]
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Parse raw answer text into a number.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::InvalidInput` for empty, non-numeric, NaN or
    /// infinite input.
    pub fn parse_answer(raw: &str) -> Result<f64, ScoringError> {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ScoringError::InvalidInput(raw.to_string()))
    }

    /// Grade `submitted` against `problem`, returning the updated tally.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::InvalidInput` if `submitted` is not a finite
    /// number. The tally is left untouched in that case.
    pub fn evaluate(
        &self,
        submitted: f64,
        problem: &Problem,
        tally: Tally,
        hint_shown: bool,
    ) -> Result<Evaluation, ScoringError> {
        if !submitted.is_finite() {
            return Err(ScoringError::InvalidInput(submitted.to_string()));
        }

        let mut next = tally;
        next.current_index += 1;

        let is_correct = problem.accepts(submitted, self.rules.tolerance());
        let points_awarded = if is_correct {
            let points = self.rules.points_for(tally.streak, hint_shown);
            next.score = next.score.saturating_add(points);
            next.correct_count += 1;
            next.streak += 1;
            next.best_streak = next.best_streak.max(next.streak);
            points
        } else {
            next.streak = 0;
            0
        };

        Ok(Evaluation {
            is_correct,
            points_awarded,
            tally: next,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Template;

    fn problem(answer: i32) -> Problem {
        Problem::from_template(Template::OneStepAddition { x: answer, b: 3 })
    }

    #[test]
    fn correct_answer_with_streak_and_no_hint() {
        let engine = ScoringEngine::default();
        let tally = Tally {
            current_index: 2,
            score: 210,
            correct_count: 2,
            streak: 2,
            best_streak: 2,
        };

        let eval = engine.evaluate(6.0, &problem(6), tally, false).unwrap();

        assert!(eval.is_correct);
        assert_eq!(eval.points_awarded, 120);
        assert_eq!(eval.tally.score, 330);
        assert_eq!(eval.tally.correct_count, 3);
        assert_eq!(eval.tally.streak, 3);
        assert_eq!(eval.tally.best_streak, 3);
        assert_eq!(eval.tally.current_index, 3);
    }

    #[test]
    fn hint_penalty_is_applied() {
        let engine = ScoringEngine::default();
        let eval = engine
            .evaluate(4.0, &problem(4), Tally::default(), true)
            .unwrap();
        assert_eq!(eval.points_awarded, 80);
    }

    #[test]
    fn wrong_answer_resets_streak_and_still_advances() {
        let engine = ScoringEngine::default();
        let tally = Tally {
            current_index: 4,
            score: 400,
            correct_count: 4,
            streak: 4,
            best_streak: 4,
        };

        let eval = engine.evaluate(99.0, &problem(5), tally, false).unwrap();

        assert!(!eval.is_correct);
        assert_eq!(eval.points_awarded, 0);
        assert_eq!(eval.tally.streak, 0);
        assert_eq!(eval.tally.best_streak, 4);
        assert_eq!(eval.tally.correct_count, 4);
        assert_eq!(eval.tally.score, 400);
        assert_eq!(eval.tally.current_index, 5);
    }

    #[test]
    fn correct_answers_never_score_below_floor() {
        let rules = ScoringRules::new(60, 0, 50, 50, 0.01).unwrap();
        let engine = ScoringEngine::new(rules);
        let eval = engine
            .evaluate(3.0, &problem(3), Tally::default(), true)
            .unwrap();
        assert_eq!(eval.points_awarded, 50);

        let default_engine = ScoringEngine::default();
        for streak in 0..12 {
            for hint in [false, true] {
                let tally = Tally {
                    streak,
                    best_streak: streak,
                    ..Tally::default()
                };
                let eval = default_engine.evaluate(3.0, &problem(3), tally, hint).unwrap();
                assert!(eval.points_awarded >= 50);
            }
        }
    }

    #[test]
    fn decimal_answers_within_tolerance_count() {
        let engine = ScoringEngine::default();
        let eval = engine
            .evaluate(7.004, &problem(7), Tally::default(), false)
            .unwrap();
        assert!(eval.is_correct);
    }

    #[test]
    fn non_finite_submission_is_rejected() {
        let engine = ScoringEngine::default();
        let err = engine
            .evaluate(f64::NAN, &problem(1), Tally::default(), false)
            .unwrap_err();
        assert!(matches!(err, ScoringError::InvalidInput(_)));
    }

    #[test]
    fn parse_answer_accepts_numbers_only() {
        assert_eq!(ScoringEngine::parse_answer(" 12 ").unwrap(), 12.0);
        assert_eq!(ScoringEngine::parse_answer("-3.5").unwrap(), -3.5);
        assert!(ScoringEngine::parse_answer("abc").is_err());
        assert!(ScoringEngine::parse_answer("").is_err());
        assert!(ScoringEngine::parse_answer("NaN").is_err());
        assert!(ScoringEngine::parse_answer("inf").is_err());
    }
}
