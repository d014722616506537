// Cache state store for conditional feed requests.
// Handles JSON serialization with sorted keys and atomic filesystem writes.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::Result;

/// State carried from one run to the next.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheState {
    /// `ETag` returned by the feed host on the last successful fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rss_etag: Option<String>,
    /// `Last-Modified` returned by the feed host on the last successful fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rss_last_modified: Option<String>,
    /// Digest of the blocks rendered by the last run. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_hash: Option<String>,
    /// Keys written by other tools, kept as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl CacheState {
    /// Load state from `path`. A missing or unreadable file yields empty state.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match read_text(path) {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                debug!(path = %path.display(), "no state file, starting empty");
                return Ok(Self::default());
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring unreadable state file");
                return Ok(Self::default());
            }
        };

        match serde_json::from_str(&contents) {
            Ok(state) => Ok(state),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring unreadable state file");
                Ok(Self::default())
            }
        }
    }

    /// Write state to `path` as pretty JSON with sorted keys.
    pub fn save(&self, path: &Path) -> Result<()> {
        // Map is BTreeMap-backed, so keys come out sorted.
        let value = serde_json::to_value(self)?;
        let json = serde_json::to_string_pretty(&value)?;
        write_atomic(path, &json)
    }

    /// Record a digest of this run's blocks; an absent block hashes as empty.
    pub fn record_blocks(&mut self, blog: Option<&str>, stats: Option<&str>) {
        self.last_hash = Some(format!(
            "{}:{}",
            digest(blog.unwrap_or_default()),
            digest(stats.unwrap_or_default())
        ));
    }
}

fn digest(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// Write text to `path` atomically via a temp file.
pub fn write_atomic(path: &Path, text: &str) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(text.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Read a text file, returning None if it does not exist.
pub fn read_text(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    Ok(Some(contents))
}
