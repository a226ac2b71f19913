//! Path management for pcc
//!
//! Every operation works relative to a single working root, normally the
//! root of a pnpm workspace. Snapshots live in a fixed store directory
//! below it.
//!
//! ## Working Root Resolution Order
//!
//! 1. `--cwd <path>` on the command line
//! 2. `PCC_CWD` environment variable (if set)
//! 3. The process's current directory

use std::path::{Path, PathBuf};

use crate::error::PccError;

/// Environment variable overriding the working root
pub const CWD_ENV_VAR: &str = "PCC_CWD";

/// Store directory, relative to the working root
pub const STORE_DIR: &str = ".pcc/backups";

/// Manifest filename inside each snapshot directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Manages all paths used by pcc
#[derive(Debug, Clone)]
pub struct PccPaths {
    /// Directory all relative paths are resolved against
    working_root: PathBuf,
}

impl PccPaths {
    /// Resolve the working root and create a PccPaths instance
    ///
    /// An explicit `cwd` wins over `PCC_CWD`, which wins over the current
    /// directory. The result is canonicalized to an absolute path.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen directory does not exist or the current
    /// directory cannot be determined.
    pub fn resolve(cwd: Option<PathBuf>) -> Result<Self, PccError> {
        let requested = match cwd {
            Some(path) => path,
            None => match std::env::var_os(CWD_ENV_VAR) {
                Some(custom) => PathBuf::from(custom),
                None => std::env::current_dir().map_err(|e| {
                    PccError::Config(format!("Could not determine current directory: {}", e))
                })?,
            },
        };

        let working_root = requested.canonicalize().map_err(|e| {
            PccError::Config(format!(
                "Working directory {} is not accessible: {}",
                requested.display(),
                e
            ))
        })?;

        if !working_root.is_dir() {
            return Err(PccError::Config(format!(
                "Working directory {} is not a directory",
                working_root.display()
            )));
        }

        Ok(Self { working_root })
    }

    /// Create PccPaths with a custom working root (useful for testing)
    pub fn with_working_root(working_root: PathBuf) -> Self {
        Self { working_root }
    }

    /// Get the working root
    pub fn working_root(&self) -> &Path {
        &self.working_root
    }

    /// Get the store directory (<root>/.pcc/backups/)
    pub fn store_dir(&self) -> PathBuf {
        self.working_root.join(STORE_DIR)
    }

    /// Get the directory of a single snapshot
    pub fn snapshot_dir(&self, id: &str) -> PathBuf {
        self.store_dir().join(id)
    }

    /// Get the manifest path of a single snapshot
    pub fn manifest_file(&self, id: &str) -> PathBuf {
        self.snapshot_dir(id).join(MANIFEST_FILE)
    }
}
