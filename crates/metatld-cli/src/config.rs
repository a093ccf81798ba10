use std::path::{Path, PathBuf};

use anyhow::Context;
use metatld_store::StoreConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// File picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "metatld.toml";

/// CLI configuration, read from TOML.
///
/// ```toml
/// input = "tlds.json"
///
/// [store]
/// dir = "artifacts"
/// root_file = "merkle-root.json"
/// tree_file = "merkle-tree.json"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Canonical TLD list.
    pub input: PathBuf,
    /// Artifact location.
    pub store: StoreConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("tlds.json"),
            store: StoreConfig::default(),
        }
    }
}

impl CliConfig {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    /// Load `path` if given (it must exist), else `./metatld.toml` if it
    /// exists, else defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = CliConfig::default();
        assert_eq!(c.input, PathBuf::from("tlds.json"));
        assert_eq!(c.store, StoreConfig::default());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = CliConfig::from_toml("input = \"lists/tlds.txt\"\n[store]\ndir = \"out\"\n").unwrap();
        assert_eq!(c.input, PathBuf::from("lists/tlds.txt"));
        assert_eq!(c.store.dir, PathBuf::from("out"));
        assert_eq!(c.store.root_file, "merkle-root.json");
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(CliConfig::from_toml("").unwrap(), CliConfig::default());
    }

    #[test]
    fn bad_toml_is_error() {
        assert!(CliConfig::from_toml("input = [").is_err());
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CliConfig::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metatld.toml");
        std::fs::write(&path, "[store]\ntree_file = \"tree.json\"\n").unwrap();
        let c = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(c.store.tree_file, "tree.json");
    }
}
