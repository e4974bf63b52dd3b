use async_trait::async_trait;
use quest_core::model::{Avatar, Badge, BadgeId, Grade, PlayerProfile};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::json_file::JsonFileRepository;

/// Key under which the player snapshot is stored.
pub const DEFAULT_NAMESPACE: &str = "algebraQuest";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    /// The stored snapshot exists but cannot be trusted as a real profile.
    #[error("corrupt persisted state: {0}")]
    Corrupt(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(String),
}

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

/// Persisted badge entry. Icon, name and description are stored for
/// readability; only the id is trusted on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeRecord {
    pub id: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Persisted shape of a `PlayerProfile`: one flat JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub total_score: u64,
    #[serde(default)]
    pub badges: Vec<BadgeRecord>,
    #[serde(default)]
    pub completed_levels: Vec<u8>,
}

impl ProfileRecord {
    #[must_use]
    pub fn from_profile(profile: &PlayerProfile) -> Self {
        Self {
            name: profile.name().to_owned(),
            avatar: profile.avatar().glyph().to_owned(),
            total_score: profile.total_score(),
            badges: profile
                .badges()
                .iter()
                .map(|badge| BadgeRecord {
                    id: badge.id().to_string(),
                    icon: badge.icon().to_owned(),
                    name: badge.name().to_owned(),
                    description: badge.description().to_owned(),
                })
                .collect(),
            completed_levels: profile
                .completed_levels()
                .iter()
                .map(Grade::value)
                .collect(),
        }
    }

    /// Convert the record back into a domain `PlayerProfile`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Corrupt` when the name is blank or any field
    /// fails domain validation.
    pub fn into_profile(self) -> Result<PlayerProfile, StorageError> {
        if self.name.trim().is_empty() {
            return Err(StorageError::Corrupt("snapshot has no player name".into()));
        }
        let avatar: Avatar = self.avatar.parse().map_err(corrupt)?;
        let badges = self
            .badges
            .iter()
            .map(|record| record.id.parse::<BadgeId>().map_err(corrupt))
            .collect::<Result<Vec<_>, _>>()?;
        let completed_levels = self
            .completed_levels
            .iter()
            .map(|&value| Grade::new(value).map_err(corrupt))
            .collect::<Result<Vec<_>, _>>()?;

        PlayerProfile::from_persisted(
            self.name,
            avatar,
            self.total_score,
            badges,
            completed_levels,
        )
        .map_err(corrupt)
    }
}

fn corrupt<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Corrupt(e.to_string())
}

/// Serialize a profile to its snapshot text.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_profile(profile: &PlayerProfile) -> Result<String, StorageError> {
    serde_json::to_string(&ProfileRecord::from_profile(profile))
        .map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Parse and validate snapshot text.
///
/// # Errors
///
/// Returns `StorageError::Corrupt` for malformed JSON or an invalid profile.
pub fn decode_profile(blob: &str) -> Result<PlayerProfile, StorageError> {
    let record: ProfileRecord = serde_json::from_str(blob).map_err(corrupt)?;
    record.into_profile()
}

//
// ─── REPOSITORY ────────────────────────────────────────────────────────────────
//

/// Load/save contract for the single player snapshot.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the stored profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Corrupt` if a snapshot exists but is unusable, or
    /// other storage errors. Returns `Ok(None)` when nothing has been saved.
    async fn load_profile(&self) -> Result<Option<PlayerProfile>, StorageError>;

    /// Persist the profile, replacing any previous snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    async fn save_profile(&self, profile: &PlayerProfile) -> Result<(), StorageError>;
}

/// Key/value store of raw snapshots, like browser local storage.
#[derive(Clone)]
pub struct InMemoryRepository {
    namespace: String,
    blobs: Arc<Mutex<HashMap<String, String>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::with_namespace(DEFAULT_NAMESPACE)
    }

    #[must_use]
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            blobs: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// A view over the same backing store under a different namespace.
    #[must_use]
    pub fn scoped(&self, namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            blobs: Arc::clone(&self.blobs),
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Raw snapshot text under this repository's namespace.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn raw(&self) -> Result<Option<String>, StorageError> {
        let guard = self
            .blobs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&self.namespace).cloned())
    }

    /// Overwrite the raw snapshot text, bypassing validation.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn put_raw(&self, blob: impl Into<String>) -> Result<(), StorageError> {
        let mut guard = self
            .blobs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(self.namespace.clone(), blob.into());
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn load_profile(&self) -> Result<Option<PlayerProfile>, StorageError> {
        self.raw()?.as_deref().map(decode_profile).transpose()
    }

    async fn save_profile(&self, profile: &PlayerProfile) -> Result<(), StorageError> {
        let blob = encode_profile(profile)?;
        self.put_raw(blob)
    }
}

/// Holds the profile repository behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub profiles: Arc<dyn ProfileRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            profiles: Arc::new(InMemoryRepository::new()),
        }
    }

    /// File-backed storage writing `<dir>/<namespace>.json`.
    #[must_use]
    pub fn json_file(dir: impl Into<std::path::PathBuf>, namespace: &str) -> Self {
        Self {
            profiles: Arc::new(JsonFileRepository::new(dir, namespace)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> PlayerProfile {
        let mut profile = PlayerProfile::new("Ada", Avatar::Panda).unwrap();
        profile.record_level(Grade::new(5).unwrap(), 940);
        profile.award_badge(Badge::for_id(BadgeId::FirstSteps));
        profile
    }

    #[tokio::test]
    async fn round_trips_profile_through_snapshot() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_profile().await.unwrap().is_none());

        let profile = sample_profile();
        repo.save_profile(&profile).await.unwrap();

        let loaded = repo.load_profile().await.unwrap().unwrap();
        assert_eq!(loaded, profile);
    }

    #[test]
    fn snapshot_uses_flat_camel_case_shape() {
        let blob = encode_profile(&sample_profile()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(value["name"], "Ada");
        assert_eq!(value["avatar"], "🐼");
        assert_eq!(value["totalScore"], 940);
        assert_eq!(value["completedLevels"], serde_json::json!([5]));
        assert_eq!(value["badges"][0]["id"], "first_try");
        assert_eq!(value["badges"][0]["name"], "First Steps");
    }

    #[tokio::test]
    async fn blank_name_is_corrupt() {
        let repo = InMemoryRepository::new();
        repo.put_raw(r#"{"name":"","avatar":"🐼","totalScore":0,"badges":[],"completedLevels":[]}"#)
            .unwrap();
        let err = repo.load_profile().await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[test]
    fn malformed_or_invalid_snapshots_are_corrupt() {
        for blob in [
            "not json",
            "{}",
            r#"{"name":"Ada","avatar":"🐙"}"#,
            r#"{"name":"Ada","avatar":"🦊","completedLevels":[3]}"#,
            r#"{"name":"Ada","avatar":"🦊","badges":[{"id":"gold"}]}"#,
        ] {
            assert!(
                matches!(decode_profile(blob), Err(StorageError::Corrupt(_))),
                "{blob} should be corrupt"
            );
        }
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let profile = decode_profile(r#"{"name":"Ada","avatar":"🦊"}"#).unwrap();
        assert_eq!(profile.total_score(), 0);
        assert!(profile.badges().is_empty());
        assert!(profile.completed_levels().is_empty());
    }

    #[tokio::test]
    async fn namespaces_are_isolated() {
        let repo = InMemoryRepository::new();
        let other = repo.scoped("other");
        other.save_profile(&sample_profile()).await.unwrap();

        assert_eq!(other.namespace(), "other");
        assert!(other.raw().unwrap().is_some());
        assert!(repo.raw().unwrap().is_none());
        assert!(repo.load_profile().await.unwrap().is_none());
    }
}
