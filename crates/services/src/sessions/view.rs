use chrono::{DateTime, Utc};
use quest_core::LevelSession;
use quest_core::model::Grade;

/// Read-only progress readout for an attempt in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub grade: Grade,
    /// 1-based number of the question on screen; stays at `total` once done.
    pub question_number: usize,
    pub answered: usize,
    pub total: usize,
    pub score: u32,
    pub streak: u32,
    pub elapsed_secs: u64,
    pub is_complete: bool,
}

impl SessionProgress {
    #[must_use]
    pub fn from_session(session: &LevelSession, now: DateTime<Utc>) -> Self {
        let answered = session.current_index();
        let total = session.total();
        let elapsed_secs = u64::try_from(session.elapsed(now).num_seconds()).unwrap_or(0);
        Self {
            grade: session.grade(),
            question_number: (answered + 1).min(total),
            answered,
            total,
            score: session.score(),
            streak: session.streak(),
            elapsed_secs,
            is_complete: session.is_complete(),
        }
    }

    /// Share of answered questions in `0.0..=1.0`.
    #[must_use]
    pub fn fraction_answered(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.answered as f32 / self.total as f32
    }
}

/// What the presenter needs to draw the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub prompt: String,
    pub glyph: &'static str,
    pub hint_available: bool,
    pub progress: SessionProgress,
}

impl QuestionView {
    /// Snapshot of the current question, or `None` once the level is over.
    #[must_use]
    pub fn from_session(session: &LevelSession, now: DateTime<Utc>) -> Option<Self> {
        let problem = session.current_problem()?;
        Some(Self {
            prompt: problem.prompt().to_string(),
            glyph: problem.visual_glyph(),
            hint_available: !session.hint_shown(),
            progress: SessionProgress::from_session(session, now),
        })
    }
}
