use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::badges::BadgeEvaluator;
use crate::level::LevelSession;
use crate::model::{Badge, Grade, PlayerProfile};

/// Accuracy at or above this unlocks the next grade.
pub const NEXT_LEVEL_ACCURACY: u8 = 70;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReportError {
    #[error("level is still in progress")]
    NotCompleted,
}

//
// ─── TIERS ─────────────────────────────────────────────────────────────────────
//

/// Encouragement message tier chosen from accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encouragement {
    Perfect,
    Excellent,
    Great,
    Good,
    NiceTry,
    KeepGoing,
}

impl Encouragement {
    #[must_use]
    pub fn from_accuracy(accuracy: u8) -> Self {
        match accuracy {
            100.. => Self::Perfect,
            90..=99 => Self::Excellent,
            80..=89 => Self::Great,
            70..=79 => Self::Good,
            60..=69 => Self::NiceTry,
            _ => Self::KeepGoing,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Perfect => "Perfect! You're a true algebra master! 🌟",
            Self::Excellent => "Excellent work! You've got this! 🎉",
            Self::Great => "Great job! You're doing really well! 👏",
            Self::Good => "Good effort! Keep practicing and you'll improve! 💪",
            Self::NiceTry => "Nice try! Review the hints and try again! 📚",
            Self::KeepGoing => "Don't give up! Every mistake is a learning opportunity! 🌱",
        }
    }
}

/// Results screen headline tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Headline {
    Outstanding,
    GreatJob,
    KeepPracticing,
}

impl Headline {
    #[must_use]
    pub fn from_accuracy(accuracy: u8) -> Self {
        if accuracy >= 90 {
            Self::Outstanding
        } else if accuracy >= NEXT_LEVEL_ACCURACY {
            Self::GreatJob
        } else {
            Self::KeepPracticing
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Outstanding => "🌟 Outstanding! 🌟",
            Self::GreatJob => "🎉 Great Job! 🎉",
            Self::KeepPracticing => "Keep Practicing! 💪",
        }
    }
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

/// End-of-level summary handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelReport {
    grade: Grade,
    score: u32,
    correct_count: usize,
    total: usize,
    accuracy: u8,
    elapsed_secs: u64,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    new_badge: Option<Badge>,
    first_completion: bool,
}

impl LevelReport {
    /// Fold a completed session into the player's profile.
    ///
    /// Accrues the score, records the grade as completed, then awards at most
    /// one new badge. The caller persists `profile` afterwards.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::NotCompleted` if the session still has questions.
    pub fn settle(
        session: &LevelSession,
        profile: &mut PlayerProfile,
        evaluator: &BadgeEvaluator,
    ) -> Result<Self, ReportError> {
        let completed_at = session.completed_at().ok_or(ReportError::NotCompleted)?;
        let first_completion = profile.record_level(session.grade(), session.score());
        let new_badge = evaluator.award(session, profile);

        let elapsed_secs = u64::try_from(session.elapsed(completed_at).num_seconds()).unwrap_or(0);

        Ok(Self {
            grade: session.grade(),
            score: session.score(),
            correct_count: session.correct_count(),
            total: session.total(),
            accuracy: accuracy_percent(session.correct_count(), session.total()),
            elapsed_secs,
            started_at: session.started_at(),
            completed_at,
            new_badge,
            first_completion,
        })
    }

    #[must_use]
    pub fn grade(&self) -> Grade {
        self.grade
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Percentage of correct answers, rounded to the nearest whole number.
    #[must_use]
    pub fn accuracy(&self) -> u8 {
        self.accuracy
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn new_badge(&self) -> Option<&Badge> {
        self.new_badge.as_ref()
    }

    /// True when this was the first time the grade was completed.
    #[must_use]
    pub fn first_completion(&self) -> bool {
        self.first_completion
    }

    #[must_use]
    pub fn encouragement(&self) -> Encouragement {
        Encouragement::from_accuracy(self.accuracy)
    }

    #[must_use]
    pub fn headline(&self) -> Headline {
        Headline::from_accuracy(self.accuracy)
    }

    /// Grade offered as "next level", when accuracy is high enough.
    #[must_use]
    pub fn next_grade(&self) -> Option<Grade> {
        if self.accuracy >= NEXT_LEVEL_ACCURACY {
            self.grade.next()
        } else {
            None
        }
    }
}

fn accuracy_percent(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (correct * 100 + total / 2) / total;
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::QuestionSet;
    use crate::model::{Avatar, BadgeId};
    use crate::scoring::ScoringEngine;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn completed(grade: u8, correct: usize, secs: i64) -> LevelSession {
        let grade = Grade::new(grade).unwrap();
        let set = QuestionSet::generate(&mut rand::rng(), grade);
        let mut session = LevelSession::start(set, fixed_now());
        let engine = ScoringEngine::default();
        let done = fixed_now() + Duration::milliseconds(secs * 1_000 + 400);
        for i in 0..10 {
            let answer = session.current_problem().unwrap().correct_answer();
            let value = if i < correct { answer } else { answer + 1.0 };
            session.submit_value(&engine, value, done).unwrap();
        }
        session
    }

    #[test]
    fn settle_updates_profile_and_reports() {
        let mut profile = PlayerProfile::new("Ada", Avatar::Robot).unwrap();
        let session = completed(6, 8, 95);

        let report = LevelReport::settle(&session, &mut profile, &BadgeEvaluator::default()).unwrap();

        assert_eq!(report.accuracy(), 80);
        assert_eq!(report.elapsed_secs(), 95);
        assert_eq!(report.correct_count(), 8);
        assert_eq!(report.total(), 10);
        assert!(report.first_completion());
        assert_eq!(report.new_badge().map(Badge::id), Some(BadgeId::FirstSteps));
        assert_eq!(report.encouragement(), Encouragement::Great);
        assert_eq!(report.headline(), Headline::GreatJob);
        assert_eq!(report.next_grade(), Grade::new(7).ok());

        assert_eq!(profile.total_score(), u64::from(session.score()));
        assert_eq!(profile.completed_levels(), &[Grade::new(6).unwrap()]);
        assert!(profile.has_badge(BadgeId::FirstSteps));
    }

    #[test]
    fn low_accuracy_does_not_unlock_next_grade() {
        let mut profile = PlayerProfile::new("Ada", Avatar::Robot).unwrap();
        let session = completed(4, 6, 10);
        let report = LevelReport::settle(&session, &mut profile, &BadgeEvaluator::default()).unwrap();
        assert_eq!(report.accuracy(), 60);
        assert_eq!(report.encouragement(), Encouragement::NiceTry);
        assert_eq!(report.headline(), Headline::KeepPracticing);
        assert_eq!(report.next_grade(), None);
    }

    #[test]
    fn grade_eight_has_no_next_level() {
        let mut profile = PlayerProfile::new("Ada", Avatar::Robot).unwrap();
        let session = completed(8, 10, 10);
        let report = LevelReport::settle(&session, &mut profile, &BadgeEvaluator::default()).unwrap();
        assert_eq!(report.accuracy(), 100);
        assert_eq!(report.encouragement(), Encouragement::Perfect);
        assert_eq!(report.headline(), Headline::Outstanding);
        assert_eq!(report.next_grade(), None);
    }

    #[test]
    fn in_progress_session_cannot_settle() {
        let mut profile = PlayerProfile::new("Ada", Avatar::Robot).unwrap();
        let set = QuestionSet::generate(&mut rand::rng(), Grade::new(5).unwrap());
        let session = LevelSession::start(set, fixed_now());
        let err = LevelReport::settle(&session, &mut profile, &BadgeEvaluator::default()).unwrap_err();
        assert_eq!(err, ReportError::NotCompleted);
        assert_eq!(profile.total_score(), 0);
        assert!(profile.completed_levels().is_empty());
    }

    #[test]
    fn encouragement_tiers_match_thresholds() {
        assert_eq!(Encouragement::from_accuracy(100), Encouragement::Perfect);
        assert_eq!(Encouragement::from_accuracy(90), Encouragement::Excellent);
        assert_eq!(Encouragement::from_accuracy(89), Encouragement::Great);
        assert_eq!(Encouragement::from_accuracy(70), Encouragement::Good);
        assert_eq!(Encouragement::from_accuracy(60), Encouragement::NiceTry);
        assert_eq!(Encouragement::from_accuracy(59), Encouragement::KeepGoing);
        assert_eq!(accuracy_percent(2, 3), 67);
    }
}
