use std::path::PathBuf;

use quest_core::model::{BadgeRules, ScoringRules};
use storage::{DEFAULT_NAMESPACE, Storage};

pub const ENV_NAMESPACE: &str = "ALGEBRA_QUEST_NAMESPACE";
pub const ENV_DATA_DIR: &str = "ALGEBRA_QUEST_DATA_DIR";
pub const ENV_SEED: &str = "ALGEBRA_QUEST_SEED";

/// Runtime knobs for the quest services.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestConfig {
    pub namespace: String,
    pub data_dir: PathBuf,
    /// Fixes problem generation when set; otherwise the thread RNG is used.
    pub seed: Option<u64>,
    pub scoring: ScoringRules,
    pub badges: BadgeRules,
}

impl Default for QuestConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            data_dir: PathBuf::from("."),
            seed: None,
            scoring: ScoringRules::default(),
            badges: BadgeRules::default(),
        }
    }
}

impl QuestConfig {
    /// Read `ALGEBRA_QUEST_NAMESPACE`, `ALGEBRA_QUEST_DATA_DIR` and
    /// `ALGEBRA_QUEST_SEED`, keeping defaults for absent or malformed values.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`QuestConfig::from_env`] with an injectable variable source.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let namespace = lookup(ENV_NAMESPACE)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.namespace);
        let data_dir = lookup(ENV_DATA_DIR)
            .filter(|value| !value.trim().is_empty())
            .map_or(defaults.data_dir, PathBuf::from);
        let seed = lookup(ENV_SEED).and_then(|value| value.trim().parse::<u64>().ok());

        Self {
            namespace,
            data_dir,
            seed,
            scoring: defaults.scoring,
            badges: defaults.badges,
        }
    }

    /// File-backed storage rooted at `data_dir`.
    #[must_use]
    pub fn storage(&self) -> Storage {
        Storage::json_file(self.data_dir.clone(), &self.namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = QuestConfig::from_lookup(|_| None);
        assert_eq!(config, QuestConfig::default());
        assert_eq!(config.namespace, "algebraQuest");
    }

    #[test]
    fn reads_overrides() {
        let config = QuestConfig::from_lookup(lookup_from(&[
            (ENV_NAMESPACE, "classroom"),
            (ENV_DATA_DIR, "/tmp/quest"),
            (ENV_SEED, " 42 "),
        ]));
        assert_eq!(config.namespace, "classroom");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/quest"));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn ignores_malformed_values() {
        let config = QuestConfig::from_lookup(lookup_from(&[
            (ENV_NAMESPACE, "   "),
            (ENV_SEED, "forty-two"),
        ]));
        assert_eq!(config.namespace, "algebraQuest");
        assert_eq!(config.seed, None);
    }
}
