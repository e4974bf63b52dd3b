use thiserror::Error;

use crate::model::problem::ANSWER_TOLERANCE;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum RulesError {
    #[error("answer tolerance must be finite and > 0, got {0}")]
    InvalidTolerance(f64),

    #[error("minimum points ({minimum}) cannot exceed base points ({base})")]
    InvalidPointFloor { base: u32, minimum: u32 },

    #[error("speed threshold must be > 0 seconds")]
    InvalidSpeedThreshold,

    #[error("streak threshold must be > 0")]
    InvalidStreakThreshold,
}

//
// ─── SCORING RULES ─────────────────────────────────────────────────────────────
//

/// Point values used when grading a correct answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringRules {
    base_points: u32,
    streak_bonus: u32,
    hint_penalty: u32,
    minimum_points: u32,
    tolerance: f64,
}

impl Default for ScoringRules {
    /// 100 base, +10 per prior streak, -20 with a hint, never below 50.
    fn default() -> Self {
        Self {
            base_points: 100,
            streak_bonus: 10,
            hint_penalty: 20,
            minimum_points: 50,
            tolerance: ANSWER_TOLERANCE,
        }
    }
}

impl ScoringRules {
    /// Creates custom scoring rules.
    ///
    /// # Errors
    ///
    /// Returns `RulesError` if the tolerance is not a positive finite number or
    /// the point floor is above the base award.
    pub fn new(
        base_points: u32,
        streak_bonus: u32,
        hint_penalty: u32,
        minimum_points: u32,
        tolerance: f64,
    ) -> Result<Self, RulesError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(RulesError::InvalidTolerance(tolerance));
        }
        if minimum_points > base_points {
            return Err(RulesError::InvalidPointFloor {
                base: base_points,
                minimum: minimum_points,
            });
        }
        Ok(Self {
            base_points,
            streak_bonus,
            hint_penalty,
            minimum_points,
            tolerance,
        })
    }

    #[must_use]
    pub fn base_points(&self) -> u32 {
        self.base_points
    }

    #[must_use]
    pub fn streak_bonus(&self) -> u32 {
        self.streak_bonus
    }

    #[must_use]
    pub fn hint_penalty(&self) -> u32 {
        self.hint_penalty
    }

    #[must_use]
    pub fn minimum_points(&self) -> u32 {
        self.minimum_points
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Points for a correct answer given the streak held before it.
    #[must_use]
    pub fn points_for(&self, streak_before: u32, hint_shown: bool) -> u32 {
        let bonus = self.streak_bonus.saturating_mul(streak_before);
        let penalty = if hint_shown { self.hint_penalty } else { 0 };
        self.base_points
            .saturating_add(bonus)
            .saturating_sub(penalty)
            .max(self.minimum_points)
    }
}

//
// ─── BADGE RULES ───────────────────────────────────────────────────────────────
//

/// Thresholds for the time- and streak-based achievements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeRules {
    speed_threshold_secs: u32,
    streak_threshold: u32,
}

impl Default for BadgeRules {
    fn default() -> Self {
        Self {
            speed_threshold_secs: 120,
            streak_threshold: 5,
        }
    }
}

impl BadgeRules {
    /// # Errors
    ///
    /// Returns `RulesError` if either threshold is zero.
    pub fn new(speed_threshold_secs: u32, streak_threshold: u32) -> Result<Self, RulesError> {
        if speed_threshold_secs == 0 {
            return Err(RulesError::InvalidSpeedThreshold);
        }
        if streak_threshold == 0 {
            return Err(RulesError::InvalidStreakThreshold);
        }
        Ok(Self {
            speed_threshold_secs,
            streak_threshold,
        })
    }

    #[must_use]
    pub fn speed_threshold_secs(&self) -> u32 {
        self.speed_threshold_secs
    }

    #[must_use]
    pub fn streak_threshold(&self) -> u32 {
        self.streak_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_follow_streak_and_hint() {
        let rules = ScoringRules::default();
        assert_eq!(rules.points_for(0, false), 100);
        assert_eq!(rules.points_for(2, false), 120);
        assert_eq!(rules.points_for(0, true), 80);
        assert_eq!(rules.points_for(3, true), 110);
    }

    #[test]
    fn floor_applies_when_penalty_dominates() {
        let rules = ScoringRules::new(60, 0, 40, 50, 0.01).unwrap();
        assert_eq!(rules.points_for(0, true), 50);
    }

    #[test]
    fn rejects_invalid_scoring_rules() {
        assert!(matches!(
            ScoringRules::new(100, 10, 20, 50, 0.0),
            Err(RulesError::InvalidTolerance(_))
        ));
        assert!(matches!(
            ScoringRules::new(100, 10, 20, 50, f64::NAN),
            Err(RulesError::InvalidTolerance(_))
        ));
        assert_eq!(
            ScoringRules::new(40, 10, 20, 50, 0.01).unwrap_err(),
            RulesError::InvalidPointFloor {
                base: 40,
                minimum: 50
            }
        );
    }

    #[test]
    fn badge_rules_validate_thresholds() {
        assert_eq!(BadgeRules::default().speed_threshold_secs(), 120);
        assert_eq!(BadgeRules::default().streak_threshold(), 5);
        assert_eq!(
            BadgeRules::new(0, 5).unwrap_err(),
            RulesError::InvalidSpeedThreshold
        );
        assert_eq!(
            BadgeRules::new(60, 0).unwrap_err(),
            RulesError::InvalidStreakThreshold
        );
    }
}
