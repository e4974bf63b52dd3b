use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::{Badge, BadgeId, Grade};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("player name must be at least {min} characters")]
    NameTooShort { min: usize },

    #[error("unknown avatar: {0:?}")]
    UnknownAvatar(String),

    #[error("badge {0} listed more than once")]
    DuplicateBadge(BadgeId),

    #[error("{0} listed more than once in completed levels")]
    DuplicateLevel(Grade),
}

//
// ─── AVATAR ────────────────────────────────────────────────────────────────────
//

/// The fixed set of avatars a player can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Avatar {
    Fox,
    Panda,
    Lion,
    Frog,
    Unicorn,
    Robot,
}

impl Avatar {
    pub const ALL: [Avatar; 6] = [
        Avatar::Fox,
        Avatar::Panda,
        Avatar::Lion,
        Avatar::Frog,
        Avatar::Unicorn,
        Avatar::Robot,
    ];

    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Avatar::Fox => "🦊",
            Avatar::Panda => "🐼",
            Avatar::Lion => "🦁",
            Avatar::Frog => "🐸",
            Avatar::Unicorn => "🦄",
            Avatar::Robot => "🤖",
        }
    }
}

impl fmt::Display for Avatar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

impl FromStr for Avatar {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|avatar| avatar.glyph() == s)
            .ok_or_else(|| ProfileError::UnknownAvatar(s.to_string()))
    }
}

impl TryFrom<String> for Avatar {
    type Error = ProfileError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Avatar> for String {
    fn from(avatar: Avatar) -> Self {
        avatar.glyph().to_string()
    }
}

//
// ─── PROFILE ───────────────────────────────────────────────────────────────────
//

/// Durable, cross-session record of a player's progress.
///
/// Badges and completed levels keep insertion order and never hold duplicates.
/// The total score only grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    name: String,
    avatar: Avatar,
    total_score: u64,
    badges: Vec<Badge>,
    completed_levels: Vec<Grade>,
}

impl PlayerProfile {
    pub const MIN_NAME_LEN: usize = 2;

    /// Creates a fresh profile for a first-time player.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NameTooShort` if the trimmed name has fewer than
    /// two characters.
    pub fn new(name: impl Into<String>, avatar: Avatar) -> Result<Self, ProfileError> {
        let name = normalize_name(name.into())?;
        Ok(Self {
            name,
            avatar,
            total_score: 0,
            badges: Vec::new(),
            completed_levels: Vec::new(),
        })
    }

    /// Rehydrate a profile from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` if the name is too short or a badge/level repeats.
    pub fn from_persisted(
        name: String,
        avatar: Avatar,
        total_score: u64,
        badges: Vec<BadgeId>,
        completed_levels: Vec<Grade>,
    ) -> Result<Self, ProfileError> {
        let mut profile = Self::new(name, avatar)?;
        profile.total_score = total_score;
        for id in badges {
            if !profile.award_badge(Badge::for_id(id)) {
                return Err(ProfileError::DuplicateBadge(id));
            }
        }
        for grade in completed_levels {
            if profile.completed_levels.contains(&grade) {
                return Err(ProfileError::DuplicateLevel(grade));
            }
            profile.completed_levels.push(grade);
        }
        Ok(profile)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn avatar(&self) -> Avatar {
        self.avatar
    }

    #[must_use]
    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    #[must_use]
    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    #[must_use]
    pub fn completed_levels(&self) -> &[Grade] {
        &self.completed_levels
    }

    #[must_use]
    pub fn has_badge(&self, id: BadgeId) -> bool {
        self.badges.iter().any(|badge| badge.id() == id)
    }

    #[must_use]
    pub fn has_completed(&self, grade: Grade) -> bool {
        self.completed_levels.contains(&grade)
    }

    /// Accrue a finished level's score and mark the grade completed.
    ///
    /// Returns true when the grade was completed for the first time.
    pub fn record_level(&mut self, grade: Grade, score: u32) -> bool {
        self.total_score = self.total_score.saturating_add(u64::from(score));
        if self.has_completed(grade) {
            return false;
        }
        self.completed_levels.push(grade);
        true
    }

    /// Append a badge unless the player already owns it.
    ///
    /// Returns true when the badge was added.
    pub fn award_badge(&mut self, badge: Badge) -> bool {
        if self.has_badge(badge.id()) {
            return false;
        }
        self.badges.push(badge);
        true
    }
}

fn normalize_name(raw: String) -> Result<String, ProfileError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < PlayerProfile::MIN_NAME_LEN {
        return Err(ProfileError::NameTooShort {
            min: PlayerProfile::MIN_NAME_LEN,
        });
    }
    Ok(trimmed.to_string())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
