//! Shared error types for the services crate.

use thiserror::Error;

use quest_core::LevelError;
use quest_core::model::{GradeError, ProfileError, ReportError};
use storage::StorageError;

/// Errors emitted by `ProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileServiceError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while playing a level.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestError {
    #[error(transparent)]
    Grade(#[from] GradeError),
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl QuestError {
    /// True for errors the player can recover from by re-entering an answer.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, QuestError::Level(LevelError::Scoring(_)))
    }
}
