//! Snapshot enumeration
//!
//! There is no index file: the store directory listing is the index. A
//! snapshot counts only if its manifest exists, parses and names the
//! directory it lives in. Anything else is skipped, never reported as an
//! error.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::config::paths::MANIFEST_FILE;
use crate::error::{PccError, PccResult};
use crate::storage::read_json_required;

use super::id::is_valid_backup_id;
use super::manager::BackupManager;
use super::manifest::{BackupInfo, BackupManifest};

impl BackupManager {
    /// List all valid snapshots, newest first
    ///
    /// Returns an empty list when the store does not exist yet.
    pub fn list_backups(&self) -> PccResult<Vec<BackupInfo>> {
        let store_dir = self.paths().store_dir();
        if !store_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&store_dir).map_err(|e| {
            PccError::Io(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry
                .map_err(|e| PccError::Io(format!("Failed to read directory entry: {}", e)))?;

            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }

            if let Some(info) = load_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        sort_newest_first(&mut backups);

        Ok(backups)
    }

    /// Get a specific snapshot by id
    pub fn get_backup_info(&self, id: &str) -> Option<BackupInfo> {
        if !is_valid_backup_id(id) {
            return None;
        }

        let dir = self.paths().snapshot_dir(id);
        if dir.is_dir() {
            load_backup_info(&dir)
        } else {
            None
        }
    }

    /// Get the most recent snapshot
    pub fn get_latest_backup(&self) -> PccResult<Option<BackupInfo>> {
        let backups = self.list_backups()?;
        Ok(backups.into_iter().next())
    }

    /// Check whether the store holds at least one valid snapshot
    pub fn has_backup(&self) -> PccResult<bool> {
        Ok(!self.list_backups()?.is_empty())
    }
}

/// Load a snapshot directory, or `None` if it is incomplete or corrupt
fn load_backup_info(dir: &Path) -> Option<BackupInfo> {
    let manifest_path = dir.join(MANIFEST_FILE);
    if !manifest_path.is_file() {
        debug!(path = %dir.display(), "Skipping backup without manifest");
        return None;
    }

    let manifest: BackupManifest = match read_json_required(&manifest_path) {
        Ok(manifest) => manifest,
        Err(e) => {
            warn!(path = %manifest_path.display(), error = %e, "Skipping unreadable backup");
            return None;
        }
    };

    let dir_name = dir.file_name().map(|n| n.to_string_lossy());
    if dir_name.as_deref() != Some(manifest.id.as_str()) {
        warn!(
            path = %dir.display(),
            manifest_id = %manifest.id,
            "Skipping backup whose manifest id does not match its directory"
        );
        return None;
    }

    Some(BackupInfo {
        path: dir.to_path_buf(),
        manifest,
    })
}

/// Sort by creation instant, newest first; equal instants fall back to id
fn sort_newest_first(backups: &mut [BackupInfo]) {
    backups.sort_by(|a, b| {
        b.manifest
            .timestamp
            .cmp(&a.manifest.timestamp)
            .then_with(|| b.manifest.id.cmp(&a.manifest.id))
    });
}
