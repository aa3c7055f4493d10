//! Client-local persistence of search state.
//!
//! Complex searches (e.g. pasted well-id lists) are too large for the URL;
//! they are stored locally under a search id and the id travels on the
//! navigation stack instead.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// One serialized search, retrievable by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSearch {
    /// Resource the search applies to.
    pub resource: String,
    /// The search payload, as submitted by the search form.
    pub payload: serde_json::Value,
    pub created: DateTime<Utc>,
}

impl SavedSearch {
    pub fn new(resource: &str, payload: serde_json::Value) -> Self {
        Self {
            resource: resource.to_string(),
            payload,
            created: Utc::now(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SearchStoreError {
    #[error("failed to {operation} search file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("search file is not valid JSON: {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no saved search with id {id}")]
    NotFound { id: u64 },
}

/// File-backed search storage, one JSON document per id.
#[derive(Debug, Clone)]
pub struct SearchStore {
    dir: PathBuf,
}

impl SearchStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    fn path_for(&self, id: u64) -> PathBuf {
        self.dir.join(format!("search-{}.json", id))
    }

    /// Persist a search under `id`. The write is atomic: a temp file is
    /// renamed over the target so a crash never leaves a torn document.
    pub fn save(&self, id: u64, search: &SavedSearch) -> Result<(), SearchStoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| SearchStoreError::Io {
            operation: "create directory for",
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(id);
        let temp = path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(search).map_err(|source| SearchStoreError::Decode {
            path: path.clone(),
            source,
        })?;
        fs::write(&temp, body).map_err(|source| SearchStoreError::Io {
            operation: "write",
            path: temp.clone(),
            source,
        })?;
        fs::rename(&temp, &path).map_err(|source| SearchStoreError::Io {
            operation: "rename",
            path: path.clone(),
            source,
        })?;
        debug!(id, path = %path.display(), "saved search");
        Ok(())
    }

    /// Retrieve the search saved under `id`.
    pub fn load(&self, id: u64) -> Result<SavedSearch, SearchStoreError> {
        let path = self.path_for(id);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                return Err(SearchStoreError::NotFound { id });
            }
            Err(source) => {
                return Err(SearchStoreError::Io {
                    operation: "read",
                    path,
                    source,
                });
            }
        };
        serde_json::from_str(&text).map_err(|source| SearchStoreError::Decode { path, source })
    }
}
