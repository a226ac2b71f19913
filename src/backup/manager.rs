//! Backup manager for pcc
//!
//! Captures a set of workspace files into a new snapshot directory under the
//! store. Listing and retention live in `index.rs` and `retention.rs`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use tracing::{debug, info, warn};

use crate::config::paths::{PccPaths, MANIFEST_FILE};
use crate::error::{PccError, PccResult};
use crate::storage::{remove_dir_forced, write_json_atomic_via};

use super::id::{candidate_id, generate_backup_id, MAX_ID_SUFFIX};
use super::manifest::{
    normalize_relative, producer_version, to_manifest_path, BackupFile, BackupManifest,
};

/// Creates, lists and deletes snapshots in the store
pub struct BackupManager {
    paths: PccPaths,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: PccPaths) -> Self {
        Self { paths }
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &PccPaths {
        &self.paths
    }

    /// Capture the given files into a new snapshot
    ///
    /// Paths may be absolute or relative to the working root. Paths that do
    /// not exist (or are not regular files) are skipped. The manifest is
    /// written last and atomically, so the snapshot only becomes visible to
    /// listings once the capture has fully succeeded.
    ///
    /// Returns the id of the new snapshot.
    pub fn create_backup<P: AsRef<Path>>(
        &self,
        file_paths: &[P],
        description: &str,
    ) -> PccResult<String> {
        let (id, snapshot_dir) = self.reserve_snapshot_dir(&Local::now())?;

        match self.capture_files(&id, &snapshot_dir, file_paths, description) {
            Ok(manifest) => {
                info!(
                    backup_id = %id,
                    files = manifest.files.len(),
                    requested = file_paths.len(),
                    "Created backup"
                );
                Ok(id)
            }
            Err(e) => {
                if let Err(cleanup) = remove_dir_forced(&snapshot_dir) {
                    debug!(backup_id = %id, error = %cleanup, "Failed to remove partial backup");
                }
                let _ = fs::remove_file(self.manifest_temp_path(&id));
                Err(e)
            }
        }
    }

    /// Claim a fresh snapshot directory
    ///
    /// `create_dir` fails when the name is taken, so two captures in the same
    /// second (even from different processes) get distinct ids.
    fn reserve_snapshot_dir(&self, now: &DateTime<Local>) -> PccResult<(String, PathBuf)> {
        let store_dir = self.paths.store_dir();
        fs::create_dir_all(&store_dir).map_err(|e| {
            PccError::Io(format!(
                "Failed to create backup directory {}: {}",
                store_dir.display(),
                e
            ))
        })?;

        let base = generate_backup_id(now);
        for attempt in 0..=MAX_ID_SUFFIX {
            let id = candidate_id(&base, attempt);
            let dir = self.paths.snapshot_dir(&id);

            match fs::create_dir(&dir) {
                Ok(()) => return Ok((id, dir)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(PccError::Io(format!(
                        "Failed to create backup {}: {}",
                        dir.display(),
                        e
                    )))
                }
            }
        }

        Err(PccError::Io(format!(
            "No free backup id left for {}",
            base
        )))
    }

    /// Copy every existing source file into the snapshot and write its manifest
    fn capture_files<P: AsRef<Path>>(
        &self,
        id: &str,
        snapshot_dir: &Path,
        file_paths: &[P],
        description: &str,
    ) -> PccResult<BackupManifest> {
        let mut files = Vec::new();

        for file_path in file_paths {
            let source = self.source_path(file_path.as_ref());

            if !source.is_file() {
                debug!(path = %source.display(), "Skipping missing file");
                continue;
            }

            let relative = self.relative_to_root(&source)?;
            if relative == Path::new(MANIFEST_FILE) {
                warn!(
                    path = %source.display(),
                    "Skipping file that clashes with the backup manifest name"
                );
                continue;
            }

            let target = snapshot_dir.join(&relative);
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
                PccError::Io(format!("Failed to back up {}: {}", source.display(), e))
            })?;

            files.push(BackupFile::new(to_manifest_path(&relative)));
        }

        let manifest = BackupManifest {
            id: id.to_string(),
            timestamp: Utc::now(),
            version: producer_version().to_string(),
            description: description.to_string(),
            files,
        };

        write_json_atomic_via(
            &snapshot_dir.join(MANIFEST_FILE),
            &self.manifest_temp_path(id),
            &manifest,
        )?;

        Ok(manifest)
    }

    /// Temp file for a snapshot's manifest
    ///
    /// Lives next to the snapshot directory rather than inside it, so it can
    /// never clash with a captured file.
    fn manifest_temp_path(&self, id: &str) -> PathBuf {
        self.paths.store_dir().join(format!(".{}.manifest.tmp", id))
    }

    /// Resolve an input path against the working root
    fn source_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.paths.working_root().join(path)
        }
    }

    /// Compute the normalized root-relative path of an existing source file
    fn relative_to_root(&self, source: &Path) -> PccResult<PathBuf> {
        let root = self.paths.working_root();

        let relative = match source.strip_prefix(root) {
            Ok(rel) => Some(rel.to_path_buf()),
            // Symlinked roots (e.g. /tmp on macOS) only match once canonical
            Err(_) => match (root.canonicalize(), source.canonicalize()) {
                (Ok(root), Ok(source)) => source.strip_prefix(&root).ok().map(Path::to_path_buf),
                _ => None,
            },
        };

        relative
            .as_deref()
            .and_then(normalize_relative)
            .ok_or_else(|| {
                PccError::Validation(format!(
                    "{} is outside the working directory {}",
                    source.display(),
                    root.display()
                ))
            })
    }
}
