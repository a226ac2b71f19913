//! Backup restoration for pcc
//!
//! Writes a snapshot's captured files back to their original locations.
//! Restoration is not transactional: files are written one by one in
//! manifest order and an I/O failure stops the run where it happened.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::paths::PccPaths;
use crate::error::{PccError, PccResult};

use super::manager::BackupManager;
use super::manifest::{normalize_relative, BackupInfo};

/// Handles restoring from snapshots
pub struct RestoreManager {
    paths: PccPaths,
}

impl RestoreManager {
    /// Create a new RestoreManager
    pub fn new(paths: PccPaths) -> Self {
        Self { paths }
    }

    /// Restore a snapshot by id, or the latest one when `id` is `None`
    ///
    /// Returns `Ok(None)` without touching the filesystem when no matching
    /// snapshot exists. A snapshot that restores zero files yields
    /// `Ok(Some(result))` with an empty `restored` list.
    pub fn restore_backup(&self, id: Option<&str>) -> PccResult<Option<RestoreResult>> {
        let manager = BackupManager::new(self.paths.clone());

        let backup = match id {
            Some(id) => manager.get_backup_info(id),
            None => manager.get_latest_backup()?,
        };

        match backup {
            Some(backup) => self.restore_from_info(&backup).map(Some),
            None => Ok(None),
        }
    }

    /// Restore every captured file of an already located snapshot
    ///
    /// This overwrites the current workspace files with the snapshot
    /// contents. Files missing from the snapshot are skipped.
    pub fn restore_from_info(&self, backup: &BackupInfo) -> PccResult<RestoreResult> {
        let mut result = RestoreResult {
            backup_id: backup.manifest.id.clone(),
            ..RestoreResult::default()
        };

        for file in &backup.manifest.files {
            let Some(relative) = normalize_relative(Path::new(&file.relative_path)) else {
                warn!(
                    backup_id = %backup.manifest.id,
                    path = %file.relative_path,
                    "Skipping path outside the working directory"
                );
                result.skipped.push(file.relative_path.clone());
                continue;
            };

            let source = backup.path.join(&relative);
            if !source.is_file() {
                debug!(path = %source.display(), "Skipping file missing from backup");
                result.skipped.push(file.relative_path.clone());
                continue;
            }

            let target = self.paths.working_root().join(&relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    PccError::Io(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }

            fs::copy(&source, &target).map_err(|e| {
                PccError::Io(format!("Failed to restore {}: {}", target.display(), e))
            })?;

            result.restored.push(file.relative_path.clone());
        }

        info!(
            backup_id = %result.backup_id,
            restored = result.restored_count(),
            skipped = result.skipped.len(),
            "Restored backup"
        );

        Ok(result)
    }

    /// Check which captured files are still present in a snapshot
    pub fn validate_backup(&self, backup: &BackupInfo) -> ValidationResult {
        let mut result = ValidationResult {
            backup_id: backup.manifest.id.clone(),
            ..ValidationResult::default()
        };

        for file in &backup.manifest.files {
            let present = normalize_relative(Path::new(&file.relative_path))
                .map(|relative| backup.path.join(relative).is_file())
                .unwrap_or(false);

            if present {
                result.present.push(file.relative_path.clone());
            } else {
                result.missing.push(file.relative_path.clone());
            }
        }

        result
    }
}

/// Result of a restore operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RestoreResult {
    /// Id of the restored snapshot
    pub backup_id: String,
    /// Relative paths written back, in manifest order
    pub restored: Vec<String>,
    /// Relative paths skipped because the snapshot copy was missing
    pub skipped: Vec<String>,
}

impl RestoreResult {
    /// Number of files actually written back
    pub fn restored_count(&self) -> usize {
        self.restored.len()
    }

    /// Check if every captured file was restored
    pub fn all_restored(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Get a summary of what was restored
    pub fn summary(&self) -> String {
        let total = self.restored.len() + self.skipped.len();
        if self.all_restored() {
            format!("Restored {} file(s) from {}", self.restored.len(), self.backup_id)
        } else {
            format!(
                "Restored {} of {} file(s) from {} ({} missing from backup)",
                self.restored.len(),
                total,
                self.backup_id,
                self.skipped.len()
            )
        }
    }
}

/// Result of validating a snapshot
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Id of the validated snapshot
    pub backup_id: String,
    /// Captured files still present in the snapshot
    pub present: Vec<String>,
    /// Captured files no longer present in the snapshot
    pub missing: Vec<String>,
}

impl ValidationResult {
    /// Check if every captured file is still present
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Get a summary of the snapshot's state
    pub fn summary(&self) -> String {
        if self.is_complete() {
            format!("Complete backup ({} file(s))", self.present.len())
        } else {
            format!(
                "Partial backup: {} present, {} missing",
                self.present.len(),
                self.missing.len()
            )
        }
    }
}
