//! Workspace file discovery
//!
//! Finds the files a catalog rewrite is about to touch: the
//! `pnpm-workspace.yaml` governing the working root and every
//! `package.json` below it. These are the default backup candidates when
//! the user names no files.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{PccError, PccResult};

/// Workspace descriptor filename
pub const WORKSPACE_FILE: &str = "pnpm-workspace.yaml";

/// Package manifest filename
pub const PACKAGE_FILE: &str = "package.json";

/// Directories never searched for package manifests
const IGNORED_DIRS: &[&str] = &["node_modules", ".git", ".pcc"];

/// Walk up from the working root looking for `pnpm-workspace.yaml`
pub fn find_workspace_file(working_root: &Path) -> Option<PathBuf> {
    working_root
        .ancestors()
        .map(|dir| dir.join(WORKSPACE_FILE))
        .find(|candidate| candidate.is_file())
}

/// Collect every `package.json` below the working root, sorted by path
pub fn collect_package_manifests(working_root: &Path) -> PccResult<Vec<PathBuf>> {
    let mut manifests = Vec::new();

    let walker = WalkDir::new(working_root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_ignored_dir(entry));

    for entry in walker {
        let entry = entry.map_err(|e| {
            PccError::Io(format!(
                "Failed to scan {}: {}",
                working_root.display(),
                e
            ))
        })?;

        if entry.file_type().is_file() && entry.file_name() == OsStr::new(PACKAGE_FILE) {
            manifests.push(entry.into_path());
        }
    }

    manifests.sort();
    Ok(manifests)
}

/// Files a catalog rewrite may touch: the workspace file, then the packages
///
/// A workspace file found above the working root is left out, since
/// snapshots only hold files inside the root.
pub fn default_backup_candidates(working_root: &Path) -> PccResult<Vec<PathBuf>> {
    let mut candidates = Vec::new();

    if let Some(workspace_file) = find_workspace_file(working_root) {
        if workspace_file.starts_with(working_root) {
            candidates.push(workspace_file);
        }
    }

    candidates.extend(collect_package_manifests(working_root)?);
    Ok(candidates)
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| IGNORED_DIRS.contains(&name))
            .unwrap_or(false)
}
