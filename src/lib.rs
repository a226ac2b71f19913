//! pcc - pnpm catalog category manager, backup core
//!
//! This library provides the snapshot store that protects a pnpm workspace
//! while its dependency catalog is split into named categories. Before the
//! workspace file and package manifests are rewritten, the affected files
//! are captured into a timestamped snapshot that can later be restored,
//! inspected or deleted.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Working root resolution and store paths
//! - `error`: Custom error types
//! - `storage`: Atomic JSON writes and forced directory removal
//! - `backup`: Snapshot creation, listing, restore and retention
//! - `workspace`: Discovery of the files a catalog rewrite touches
//! - `display`: Terminal formatting
//! - `cli`: clap command handlers
//! - `logging`: tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use pcc::backup::BackupManager;
//! use pcc::config::PccPaths;
//! use pcc::workspace::default_backup_candidates;
//!
//! let paths = PccPaths::resolve(None)?;
//! let files = default_backup_candidates(paths.working_root())?;
//! let id = BackupManager::new(paths).create_backup(&files, "Create categories: ui")?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod storage;
pub mod workspace;

pub use error::{PccError, PccResult};
