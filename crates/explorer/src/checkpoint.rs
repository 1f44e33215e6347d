//! Checkpoint persistence
//!
//! Bundles the record store and both graphs into one JSON blob per key.
//! Writes go to a temp file in the target directory and are renamed into
//! place, so a partial write can never corrupt a previously saved key.

use crate::graph::{AuthorshipGraph, CitationGraph};
use chrono::Local;
use citenetx_common::config::CheckpointConfig;
use citenetx_common::model::DocumentRecord;
use citenetx_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Everything a checkpoint carries; restored wholesale on load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointBundle {
    pub documents: Vec<DocumentRecord>,
    pub citations: CitationGraph,
    pub authorship: AuthorshipGraph,
}

/// Saves and restores checkpoint bundles under a directory
#[derive(Debug, Clone)]
pub struct CheckpointManager {
    dir: PathBuf,
    base_name: String,
}

impl CheckpointManager {
    pub fn new(dir: impl Into<PathBuf>, base_name: impl Into<String>) -> Self {
        Self { dir: dir.into(), base_name: base_name.into() }
    }

    pub fn from_config(config: &CheckpointConfig) -> Self {
        Self::new(&config.dir, &config.base_name)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}{}.json", self.base_name, key))
    }

    /// Persist a bundle under the given key, or a timestamp-derived key
    /// when none is supplied. Returns the written path.
    pub fn save(&self, bundle: &CheckpointBundle, key: Option<&str>) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let key = match key {
            Some(key) => key.to_string(),
            None => Local::now().format("%Y%m%d.%H%M").to_string(),
        };
        let path = self.path_for(&key);
        let staging = path.with_extension("json.tmp");

        let blob = serde_json::to_vec(bundle)?;
        fs::write(&staging, &blob)?;
        fs::rename(&staging, &path)?;

        info!(path = %path.display(), documents = bundle.documents.len(), "checkpoint saved");
        Ok(path)
    }

    /// Read a bundle back. A missing key or unreadable blob comes back as
    /// a typed error and must leave the caller's in-memory state alone.
    pub fn load(&self, key: &str) -> Result<CheckpointBundle> {
        let path = self.path_for(key);
        let blob = match fs::read(&path) {
            Ok(blob) => blob,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::CheckpointNotFound { path: path.display().to_string() });
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&blob)
            .map_err(|source| Error::CheckpointCorrupt { path: path.display().to_string(), source })
    }
}
