use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::Grade;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BadgeError {
    #[error("unknown badge id: {0:?}")]
    UnknownId(String),
}

/// Stable key of an achievement. Persisted as its string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BadgeId {
    FirstSteps,
    GradeMaster(Grade),
    Perfect,
    Speed,
    Streak,
}

impl BadgeId {
    /// Mastery badge id for a grade.
    #[must_use]
    pub fn mastery(grade: Grade) -> Self {
        Self::GradeMaster(grade)
    }
}

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstSteps => f.write_str("first_try"),
            Self::GradeMaster(grade) => write!(f, "grade{}_master", grade.value()),
            Self::Perfect => f.write_str("perfect"),
            Self::Speed => f.write_str("speed"),
            Self::Streak => f.write_str("streak"),
        }
    }
}

impl FromStr for BadgeId {
    type Err = BadgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_try" => return Ok(Self::FirstSteps),
            "perfect" => return Ok(Self::Perfect),
            "speed" => return Ok(Self::Speed),
            "streak" => return Ok(Self::Streak),
            _ => {}
        }
        s.strip_prefix("grade")
            .and_then(|rest| rest.strip_suffix("_master"))
            .and_then(|digits| digits.parse::<u8>().ok())
            .and_then(|value| Grade::new(value).ok())
            .map(Self::GradeMaster)
            .ok_or_else(|| BadgeError::UnknownId(s.to_string()))
    }
}

impl TryFrom<String> for BadgeId {
    type Error = BadgeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BadgeId> for String {
    fn from(id: BadgeId) -> Self {
        id.to_string()
    }
}

/// Immutable catalog entry describing an achievement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    id: BadgeId,
    icon: &'static str,
    name: &'static str,
    description: &'static str,
}

impl Badge {
    /// Looks up the catalog entry for an id.
    #[must_use]
    pub fn for_id(id: BadgeId) -> Self {
        let (icon, name, description) = match id {
            BadgeId::FirstSteps => ("🌟", "First Steps", "Complete your first level"),
            BadgeId::GradeMaster(grade) => match grade.value() {
                4 => ("🎓", "Grade 4 Master", "Complete Grade 4"),
                5 => ("📚", "Grade 5 Master", "Complete Grade 5"),
                6 => ("🏅", "Grade 6 Master", "Complete Grade 6"),
                7 => ("🥇", "Grade 7 Master", "Complete Grade 7"),
                _ => ("👑", "Algebra King", "Complete Grade 8"),
            },
            BadgeId::Perfect => ("💯", "Perfect Score", "Get 100% accuracy"),
            BadgeId::Speed => ("⚡", "Speed Demon", "Complete a level in under 2 minutes"),
            BadgeId::Streak => ("🔥", "Hot Streak", "Get 5 correct in a row"),
        };
        Self {
            id,
            icon,
            name,
            description,
        }
    }

    /// Full catalog in evaluation order.
    #[must_use]
    pub fn catalog() -> Vec<Badge> {
        std::iter::once(BadgeId::FirstSteps)
            .chain(Grade::all().map(BadgeId::GradeMaster))
            .chain([BadgeId::Perfect, BadgeId::Speed, BadgeId::Streak])
            .map(Self::for_id)
            .collect()
    }

    #[must_use]
    pub fn id(&self) -> BadgeId {
        self.id
    }

    #[must_use]
    pub fn icon(&self) -> &'static str {
        self.icon
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        self.description
    }
}
