use chrono::{DateTime, Duration, Utc};

/// Source of "now" for level timing.
///
/// `Fixed` keeps elapsed-time checks (timer readout, speed badge) deterministic
/// in tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Move a fixed clock forward. No effect on `Clock::Default`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    /// Whole seconds elapsed since `since`, floored at zero.
    #[must_use]
    pub fn seconds_since(&self, since: DateTime<Utc>) -> u64 {
        let secs = self.now().signed_duration_since(since).num_seconds();
        u64::try_from(secs).unwrap_or(0)
    }
}

/// Start instant used by deterministic level runs (2023-11-14T22:13:20Z).
/// Speed-badge and timer tests offset from here.
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Level start time for deterministic runs.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0).unwrap_or_default()
}

/// Clock pinned to [`fixed_now`], so a level's elapsed time only moves when
/// the caller advances it.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances_and_measures() {
        let mut clock = fixed_clock();
        let start = clock.now();
        clock.advance(Duration::seconds(42));
        assert_eq!(clock.seconds_since(start), 42);
        assert_eq!(clock.seconds_since(start + Duration::minutes(5)), 0);
    }

    #[test]
    fn fixed_now_matches_level_epoch() {
        assert_eq!(fixed_now().timestamp(), FIXED_TEST_TIMESTAMP);
        assert_eq!(fixed_clock().now(), fixed_now());
    }

    #[test]
    fn default_clock_ignores_advance() {
        let mut clock = Clock::default();
        clock.advance(Duration::days(1));
        assert!(matches!(clock, Clock::Default));
    }
}
