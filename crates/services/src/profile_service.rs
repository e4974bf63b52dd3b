use std::sync::Arc;

use quest_core::model::{Avatar, PlayerProfile};
use storage::{ProfileRepository, StorageError};
use tracing::{info, warn};

use crate::error::ProfileServiceError;

/// Loads and creates the single persisted player profile.
#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    #[must_use]
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Load the saved profile, if any.
    ///
    /// An unreadable snapshot is logged and treated as "no profile yet" so the
    /// player is sent back to profile creation.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Storage` when the backend itself fails.
    pub async fn load(&self) -> Result<Option<PlayerProfile>, ProfileServiceError> {
        match self.profiles.load_profile().await {
            Ok(profile) => Ok(profile),
            Err(StorageError::Corrupt(reason)) => {
                warn!(%reason, "discarding unreadable profile snapshot");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Create and persist a fresh profile, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Profile` for names shorter than two
    /// characters, or `ProfileServiceError::Storage` if saving fails.
    pub async fn create(
        &self,
        name: &str,
        avatar: Avatar,
    ) -> Result<PlayerProfile, ProfileServiceError> {
        let profile = PlayerProfile::new(name, avatar)?;
        self.profiles.save_profile(&profile).await?;
        info!(name = profile.name(), avatar = %avatar, "profile created");
        Ok(profile)
    }

    /// Persist the profile as it stands.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Storage` if saving fails.
    pub async fn save(&self, profile: &PlayerProfile) -> Result<(), ProfileServiceError> {
        self.profiles.save_profile(profile).await?;
        Ok(())
    }
}
