//! Backup system for pcc
//!
//! Captures workspace files before a catalog rewrite and restores them on
//! request.
//!
//! # Architecture
//!
//! - `BackupManager`: creates snapshots, enumerates them and deletes them
//! - `RestoreManager`: validates snapshots and writes them back
//!
//! # Store Layout
//!
//! Snapshots live under `<working root>/.pcc/backups/<id>/`. Each one mirrors
//! the captured files at their root-relative paths and carries a
//! `manifest.json`:
//!
//! - `id`: `YYYYMMDD_HHMMSS`, with a `_NNN` suffix on same-second collisions
//! - `timestamp`: RFC 3339 creation instant, used for ordering
//! - `version`: version of the producing tool
//! - `description`: free-form text
//! - `files`: `{ relativePath }` records in capture order
//!
//! A directory without a readable manifest is ignored by every listing.
//!
//! # Example
//!
//! ```rust,ignore
//! use pcc::backup::{BackupManager, RestoreManager};
//! use pcc::config::PccPaths;
//!
//! let paths = PccPaths::resolve(None)?;
//! let manager = BackupManager::new(paths.clone());
//!
//! let id = manager.create_backup(&["pnpm-workspace.yaml"], "Create categories: ui")?;
//!
//! // Later, undo the rewrite
//! let restore_manager = RestoreManager::new(paths);
//! if let Some(result) = restore_manager.restore_backup(Some(&id))? {
//!     println!("{}", result.summary());
//! }
//! ```

mod id;
mod index;
mod manager;
mod manifest;
mod restore;
mod retention;

pub use id::{generate_backup_id, is_valid_backup_id};
pub use manager::BackupManager;
pub use manifest::{producer_version, BackupFile, BackupInfo, BackupManifest};
pub use restore::{RestoreManager, RestoreResult, ValidationResult};
