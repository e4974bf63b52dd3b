use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when a grade number falls outside the supported levels.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GradeError {
    #[error("unsupported grade: {0} (expected 4 through 8)")]
    Unsupported(u8),

    #[error("failed to parse grade from {0:?}")]
    Parse(String),
}

/// A supported school grade (4 through 8). Each grade is one playable level.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Grade(u8);

impl Grade {
    pub const MIN: u8 = 4;
    pub const MAX: u8 = 8;

    /// Validates and wraps a grade number.
    ///
    /// # Errors
    ///
    /// Returns `GradeError::Unsupported` for anything outside `4..=8`.
    pub fn new(value: u8) -> Result<Self, GradeError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GradeError::Unsupported(value))
        }
    }

    /// Returns the underlying grade number.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }

    /// All playable grades in ascending order.
    pub fn all() -> impl Iterator<Item = Grade> {
        (Self::MIN..=Self::MAX).map(Grade)
    }

    /// The grade after this one, if there is one.
    #[must_use]
    pub fn next(&self) -> Option<Grade> {
        Self::new(self.0 + 1).ok()
    }
}

impl TryFrom<u8> for Grade {
    type Error = GradeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> Self {
        grade.0
    }
}

impl fmt::Debug for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grade({})", self.0)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grade {}", self.0)
    }
}

impl FromStr for Grade {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u8>()
            .map_err(|_| GradeError::Parse(s.to_string()))?;
        Self::new(value)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
