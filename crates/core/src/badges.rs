use crate::level::LevelSession;
use crate::model::{Badge, BadgeId, BadgeRules, PlayerProfile};

/// Decides which achievement, if any, a finished level unlocks.
///
/// The catalog is scanned in its fixed order and the first badge whose
/// condition holds and that the player does not own yet wins. At most one
/// badge is awarded per completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct BadgeEvaluator {
    rules: BadgeRules,
}

impl BadgeEvaluator {
    #[must_use]
    pub fn new(rules: BadgeRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &BadgeRules {
        &self.rules
    }

    /// Find the newly earned badge for a completed session.
    ///
    /// `profile` must already reflect this completion (score accrued, grade
    /// recorded). Returns `None` for sessions that are still in progress.
    #[must_use]
    pub fn evaluate_new_badge(
        &self,
        session: &LevelSession,
        profile: &PlayerProfile,
    ) -> Option<Badge> {
        if !session.is_complete() {
            return None;
        }
        Badge::catalog()
            .into_iter()
            .filter(|badge| !profile.has_badge(badge.id()))
            .find(|badge| self.condition_met(badge.id(), session, profile))
    }

    /// Evaluate and append the winning badge to `profile`.
    pub fn award(&self, session: &LevelSession, profile: &mut PlayerProfile) -> Option<Badge> {
        let badge = self.evaluate_new_badge(session, profile)?;
        profile.award_badge(badge.clone());
        Some(badge)
    }

    fn condition_met(&self, id: BadgeId, session: &LevelSession, profile: &PlayerProfile) -> bool {
        match id {
            BadgeId::FirstSteps => profile.completed_levels().len() == 1,
            BadgeId::GradeMaster(grade) => session.grade() == grade,
            BadgeId::Perfect => session.correct_count() == session.total(),
            BadgeId::Speed => {
                let Some(completed_at) = session.completed_at() else {
                    return false;
                };
                let limit_ms = i64::from(self.rules.speed_threshold_secs()) * 1_000;
                session.elapsed(completed_at).num_milliseconds() < limit_ms
            }
            BadgeId::Streak => session.streak() >= self.rules.streak_threshold(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::QuestionSet;
    use crate::model::{Avatar, Grade, Problem, Template};
    use crate::scoring::ScoringEngine;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn grade(value: u8) -> Grade {
        Grade::new(value).unwrap()
    }

    /// Plays a level where `pattern[i]` says whether question `i` is answered
    /// correctly, finishing `secs` seconds after the start.
    fn play(grade: Grade, pattern: [bool; 10], secs: i64) -> LevelSession {
        let problems = (1..=10)
            .map(|x| Problem::from_template(Template::OneStepAddition { x, b: 2 }))
            .collect();
        let set = QuestionSet::from_problems(grade, problems).unwrap();
        let mut session = LevelSession::start(set, fixed_now());
        let engine = ScoringEngine::default();
        let done = fixed_now() + Duration::seconds(secs);
        for correct in pattern {
            let answer = session.current_problem().unwrap().correct_answer();
            let value = if correct { answer } else { answer + 100.0 };
            session.submit_value(&engine, value, done).unwrap();
        }
        session
    }

    fn finish(session: &LevelSession, profile: &mut PlayerProfile) -> Option<Badge> {
        profile.record_level(session.grade(), session.score());
        BadgeEvaluator::default().award(session, profile)
    }

    fn profile() -> PlayerProfile {
        PlayerProfile::new("Ada", Avatar::Fox).unwrap()
    }

    const ALTERNATING: [bool; 10] = [
        true, false, true, false, true, false, true, false, true, false,
    ];

    #[test]
    fn first_completion_wins_over_mastery() {
        let mut profile = profile();
        let session = play(grade(4), [true; 10], 30);
        let badge = finish(&session, &mut profile).unwrap();
        assert_eq!(badge.id(), BadgeId::FirstSteps);
        assert_eq!(profile.badges().len(), 1);
    }

    #[test]
    fn mastery_comes_before_perfect() {
        let mut profile = profile();
        finish(&play(grade(4), ALTERNATING, 300), &mut profile);

        let session = play(grade(5), [true; 10], 300);
        let badge = finish(&session, &mut profile).unwrap();
        assert_eq!(badge.id(), BadgeId::GradeMaster(grade(5)));
    }

    #[test]
    fn perfect_awarded_when_all_correct() {
        let mut profile = profile();
        let first = play(grade(4), ALTERNATING, 300);
        assert_eq!(finish(&first, &mut profile).unwrap().id(), BadgeId::FirstSteps);
        assert_eq!(
            finish(&first, &mut profile).unwrap().id(),
            BadgeId::GradeMaster(grade(4))
        );

        let perfect = play(grade(4), [true; 10], 300);
        assert_eq!(finish(&perfect, &mut profile).unwrap().id(), BadgeId::Perfect);
    }

    #[test]
    fn speed_requires_under_two_minutes() {
        let mut profile = profile();
        let slow = play(grade(4), ALTERNATING, 300);
        finish(&slow, &mut profile);
        finish(&slow, &mut profile);
        assert_eq!(finish(&slow, &mut profile), None);

        let borderline = play(grade(4), ALTERNATING, 120);
        assert_eq!(finish(&borderline, &mut profile), None);

        let fast = play(grade(4), ALTERNATING, 119);
        assert_eq!(finish(&fast, &mut profile).unwrap().id(), BadgeId::Speed);
    }

    #[test]
    fn streak_counts_only_the_run_still_alive_at_the_end() {
        let mut profile = profile();
        let slow = play(grade(4), ALTERNATING, 300);
        finish(&slow, &mut profile);
        finish(&slow, &mut profile);

        let broken = [
            true, true, true, true, true, false, false, false, false, false,
        ];
        let early_run = play(grade(4), broken, 300);
        assert_eq!(early_run.best_streak(), 5);
        assert_eq!(early_run.streak(), 0);
        assert_eq!(finish(&early_run, &mut profile), None);

        let closing = [
            false, false, false, false, false, true, true, true, true, true,
        ];
        let late_run = play(grade(4), closing, 300);
        assert_eq!(late_run.streak(), 5);
        assert_eq!(finish(&late_run, &mut profile).unwrap().id(), BadgeId::Streak);
    }

    #[test]
    fn never_awards_the_same_badge_twice() {
        let mut profile = profile();
        let mut seen = Vec::new();
        for value in [4, 4, 5, 5, 6, 7, 8, 8, 4, 6, 7, 5] {
            let session = play(grade(value), [true; 10], 10);
            if let Some(badge) = finish(&session, &mut profile) {
                assert!(!seen.contains(&badge.id()), "{} awarded twice", badge.id());
                seen.push(badge.id());
            }
        }
        assert_eq!(seen.len(), Badge::catalog().len());
        assert_eq!(profile.badges().len(), Badge::catalog().len());
    }

    #[test]
    fn in_progress_session_earns_nothing() {
        let set = QuestionSet::generate(&mut rand::rng(), grade(6));
        let session = LevelSession::start(set, fixed_now());
        assert_eq!(BadgeEvaluator::default().evaluate_new_badge(&session, &profile()), None);
    }
}
