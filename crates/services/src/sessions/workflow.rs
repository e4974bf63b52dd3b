use std::sync::Arc;

use quest_core::model::{BadgeRules, Grade, LevelReport, PlayerProfile, ScoringRules};
use quest_core::{AnswerFeedback, BadgeEvaluator, LevelSession, ScoringEngine};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use storage::ProfileRepository;
use tracing::{debug, info, warn};

use super::view::{QuestionView, SessionProgress};
use crate::Clock;
use crate::config::QuestConfig;
use crate::error::QuestError;
use crate::presentation::PresentationGateway;

/// Result of answering the current question.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestAnswerResult {
    pub feedback: AnswerFeedback,
    /// Present once the answer finished the level and the profile was saved.
    pub report: Option<LevelReport>,
}

/// Drives one level at a time: start, hints, answers, then settles the
/// finished level into the profile and persists it.
#[derive(Clone)]
pub struct QuestLoopService {
    clock: Clock,
    profiles: Arc<dyn ProfileRepository>,
    presenter: Arc<dyn PresentationGateway>,
    engine: ScoringEngine,
    evaluator: BadgeEvaluator,
    seed: Option<u64>,
}

impl QuestLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        profiles: Arc<dyn ProfileRepository>,
        presenter: Arc<dyn PresentationGateway>,
    ) -> Self {
        Self {
            clock,
            profiles,
            presenter,
            engine: ScoringEngine::default(),
            evaluator: BadgeEvaluator::default(),
            seed: None,
        }
    }

    /// Build a loop over the configured file storage, seed and rules.
    #[must_use]
    pub fn from_config(
        config: &QuestConfig,
        clock: Clock,
        presenter: Arc<dyn PresentationGateway>,
    ) -> Self {
        Self::new(clock, config.storage().profiles, presenter)
            .with_seed(config.seed)
            .with_scoring_rules(config.scoring)
            .with_badge_rules(config.badges)
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_scoring_rules(mut self, rules: ScoringRules) -> Self {
        self.engine = ScoringEngine::new(rules);
        self
    }

    #[must_use]
    pub fn with_badge_rules(mut self, rules: BadgeRules) -> Self {
        self.evaluator = BadgeEvaluator::new(rules);
        self
    }

    /// Generate question sets from a fixed seed. Each grade gets its own
    /// stream, so replaying a grade yields the same questions.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Start a fresh attempt at `grade` and show its first question.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::Grade` for grades outside 4..=8.
    pub fn start_level(&self, grade: u8) -> Result<LevelSession, QuestError> {
        let grade = Grade::new(grade)?;
        match self.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed ^ u64::from(grade.value()));
                Ok(self.start_level_with_rng(&mut rng, grade))
            }
            None => Ok(self.start_level_with_rng(&mut rand::rng(), grade)),
        }
    }

    /// Start a fresh attempt drawing problems from `rng`.
    pub fn start_level_with_rng<R: Rng + ?Sized>(&self, rng: &mut R, grade: Grade) -> LevelSession {
        let session = LevelSession::generate(rng, grade, self.clock.now());
        debug!(grade = grade.value(), total = session.total(), "level started");
        self.show_current(&session);
        session
    }

    /// Reveal and display the hint for the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::Level` once the level is complete.
    pub fn reveal_hint(&self, session: &mut LevelSession) -> Result<String, QuestError> {
        let hint = session.reveal_hint()?.to_string();
        debug!(question = session.current_index() + 1, "hint revealed");
        self.presenter.show_hint(&hint);
        Ok(hint)
    }

    /// Grade raw answer text for the current question.
    ///
    /// On the final question the level is settled into `profile`, the profile
    /// is saved and the results are shown. Moving on to the next question is
    /// left to the caller via [`QuestLoopService::next_question`], so it can
    /// pace the feedback display.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::Level` for unparseable text (the session is left
    /// as it was and the presenter shows an inline message) or a finished
    /// level, and `QuestError::Storage` if saving the profile fails. In the
    /// last case `profile` is untouched and
    /// [`QuestLoopService::finish_level`] retries the save.
    pub async fn answer_current(
        &self,
        session: &mut LevelSession,
        profile: &mut PlayerProfile,
        raw: &str,
    ) -> Result<QuestAnswerResult, QuestError> {
        let feedback = match session.submit_answer(&self.engine, raw, self.clock.now()) {
            Ok(feedback) => feedback,
            Err(err) => {
                let err = QuestError::from(err);
                if err.is_invalid_input() {
                    self.presenter.show_input_error(&err.to_string());
                }
                return Err(err);
            }
        };
        debug!(
            question = feedback.question_number,
            correct = feedback.is_correct,
            points = feedback.points_awarded,
            streak = feedback.streak,
            "answer graded"
        );
        self.presenter.show_feedback(&feedback);

        let report = if feedback.is_complete {
            Some(self.finish_level(session, profile).await?)
        } else {
            None
        };

        Ok(QuestAnswerResult { feedback, report })
    }

    /// Show the question now current, after feedback has been displayed.
    /// Returns `None` once the level is complete.
    pub fn next_question(&self, session: &LevelSession) -> Option<QuestionView> {
        self.show_current(session)
    }

    /// Read-only timer and counters for the running attempt.
    #[must_use]
    pub fn progress(&self, session: &LevelSession) -> SessionProgress {
        SessionProgress::from_session(session, self.clock.now())
    }

    /// Settle a completed level into `profile`, save it and show the results.
    ///
    /// `profile` only changes once the save has gone through, so after a
    /// storage failure the same call can be retried as is.
    ///
    /// # Errors
    ///
    /// Returns `QuestError::Report` if the level is still in progress and
    /// `QuestError::Storage` if saving fails.
    pub async fn finish_level(
        &self,
        session: &LevelSession,
        profile: &mut PlayerProfile,
    ) -> Result<LevelReport, QuestError> {
        let mut settled = profile.clone();
        let report = LevelReport::settle(session, &mut settled, &self.evaluator)?;
        if let Err(err) = self.profiles.save_profile(&settled).await {
            warn!(grade = report.grade().value(), error = %err, "saving finished level failed");
            return Err(err.into());
        }
        *profile = settled;

        info!(
            grade = report.grade().value(),
            score = report.score(),
            accuracy = report.accuracy(),
            elapsed_secs = report.elapsed_secs(),
            total_score = profile.total_score(),
            "level completed"
        );
        if let Some(badge) = report.new_badge() {
            info!(badge = %badge.id(), "badge awarded");
        }

        self.presenter.show_results(&report, profile);
        Ok(report)
    }

    fn show_current(&self, session: &LevelSession) -> Option<QuestionView> {
        let view = QuestionView::from_session(session, self.clock.now())?;
        self.presenter.show_question(&view);
        Some(view)
    }
}
