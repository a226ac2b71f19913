//! Snapshot manifest format
//!
//! Each snapshot directory carries a `manifest.json` describing what was
//! captured. Field names are fixed: `id`, `timestamp`, `version`,
//! `description` and `files[].relativePath`.

use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata record persisted with every snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupManifest {
    /// Snapshot id, equal to the snapshot directory name
    pub id: String,
    /// Creation instant, used for ordering
    pub timestamp: DateTime<Utc>,
    /// Version of the tool that produced the snapshot
    #[serde(default = "unknown_version")]
    pub version: String,
    /// Free-form description, may be empty
    #[serde(default)]
    pub description: String,
    /// Captured files in capture order
    #[serde(default)]
    pub files: Vec<BackupFile>,
}

/// One captured file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupFile {
    /// Path relative to the working root, `/`-separated
    pub relative_path: String,
}

impl BackupFile {
    pub fn new(relative_path: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
        }
    }
}

/// A snapshot located in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    /// Snapshot directory
    pub path: PathBuf,
    /// Parsed manifest
    pub manifest: BackupManifest,
}

impl BackupInfo {
    pub fn id(&self) -> &str {
        &self.manifest.id
    }

    pub fn file_count(&self) -> usize {
        self.manifest.files.len()
    }
}

fn unknown_version() -> String {
    "unknown".to_string()
}

/// Version string recorded in new manifests
pub fn producer_version() -> &'static str {
    option_env!("CARGO_PKG_VERSION").unwrap_or("unknown")
}

/// Lexically normalize a root-relative path
///
/// Resolves `.` and `..` without touching the filesystem. Returns `None`
/// for absolute paths, empty paths and paths that climb above the root.
pub fn normalize_relative(path: &Path) -> Option<PathBuf> {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if normalized.as_os_str().is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Render a normalized relative path with `/` separators for the manifest
pub fn to_manifest_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
