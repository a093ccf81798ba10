use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::artifact::{RootArtifact, TreeArtifact};
use crate::error::StoreResult;
use crate::traits::ArtifactStore;

/// Where the filesystem store keeps its files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding both artifacts.
    pub dir: PathBuf,
    /// File name of the root artifact.
    pub root_file: String,
    /// File name of the tree artifact.
    pub tree_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            root_file: "merkle-root.json".into(),
            tree_file: "merkle-tree.json".into(),
        }
    }
}

impl StoreConfig {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Default::default()
        }
    }
}

/// Artifact store backed by pretty-printed JSON files.
///
/// Each save writes a temporary file in the target directory and renames
/// it over the old artifact, so a crash mid-write leaves the previous
/// version intact.
#[derive(Clone, Debug)]
pub struct FsArtifactStore {
    config: StoreConfig,
}

impl FsArtifactStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn root_path(&self) -> PathBuf {
        self.config.dir.join(&self.config.root_file)
    }

    pub fn tree_path(&self) -> PathBuf {
        self.config.dir.join(&self.config.tree_file)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> StoreResult<()> {
        fs::create_dir_all(&self.config.dir)?;
        let mut tmp = NamedTempFile::new_in(&self.config.dir)?;
        serde_json::to_writer_pretty(&mut tmp, value)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        debug!(path = %path.display(), "wrote artifact");
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> StoreResult<Option<T>> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), bytes = data.len(), "read artifact");
        Ok(Some(serde_json::from_str(&data)?))
    }
}

impl ArtifactStore for FsArtifactStore {
    fn save_root(&self, root: &RootArtifact) -> StoreResult<()> {
        self.write_json(&self.root_path(), root)
    }

    fn load_root(&self) -> StoreResult<Option<RootArtifact>> {
        self.read_json(&self.root_path())
    }

    fn save_tree(&self, tree: &TreeArtifact) -> StoreResult<()> {
        self.write_json(&self.tree_path(), tree)
    }

    fn load_tree(&self) -> StoreResult<Option<TreeArtifact>> {
        self.read_json(&self.tree_path())
    }
}
