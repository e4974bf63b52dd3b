use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quest_core::model::PlayerProfile;
use tracing::debug;

use crate::repository::{ProfileRepository, StorageError, decode_profile, encode_profile};

/// Stores the profile snapshot as `<dir>/<namespace>.json`.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write never leaves a half-written snapshot behind.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, namespace: &str) -> Self {
        Self {
            path: dir.into().join(format!("{namespace}.json")),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn io(e: std::io::Error) -> StorageError {
    StorageError::Io(e.to_string())
}

#[async_trait]
impl ProfileRepository for JsonFileRepository {
    async fn load_profile(&self) -> Result<Option<PlayerProfile>, StorageError> {
        let blob = match tokio::fs::read_to_string(&self.path).await {
            Ok(blob) => blob,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no profile snapshot yet");
                return Ok(None);
            }
            Err(e) => return Err(io(e)),
        };
        decode_profile(&blob).map(Some)
    }

    async fn save_profile(&self, profile: &PlayerProfile) -> Result<(), StorageError> {
        let blob = encode_profile(profile)?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, blob).await.map_err(io)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(io)?;
        debug!(path = %self.path.display(), "saved profile snapshot");
        Ok(())
    }
}
