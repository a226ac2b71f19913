//! Backup CLI commands
//!
//! Implements CLI commands for snapshot management. Destructive commands
//! only preview what they would do unless `--force` is given.

use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;

use crate::backup::{BackupInfo, BackupManager, RestoreManager};
use crate::config::paths::PccPaths;
use crate::display::backup::{format_backup_details, format_backup_list, format_timestamp};
use crate::error::{PccError, PccResult};
use crate::workspace::default_backup_candidates;

/// Keyword selecting the most recent snapshot
const LATEST: &str = "latest";

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Snapshot files before rewriting them
    Create {
        /// Files to capture (defaults to pnpm-workspace.yaml and every package.json)
        files: Vec<PathBuf>,

        /// Description stored with the backup
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List all available backups
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show information about a backup
    Show {
        /// Backup id (use 'latest' for most recent)
        #[arg(default_value = LATEST)]
        backup: String,
    },

    /// Restore files from a backup
    #[command(alias = "undo")]
    Restore {
        /// Backup id (use 'latest' for most recent)
        #[arg(default_value = LATEST)]
        backup: String,

        /// Skip the preview and overwrite files
        #[arg(short, long)]
        force: bool,

        /// Delete the backup after a complete restore
        #[arg(long)]
        delete: bool,
    },

    /// Delete a single backup
    Delete {
        /// Backup id
        backup: String,
    },

    /// Delete all backups
    Clear {
        /// Delete without previewing first
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(paths: &PccPaths, cmd: BackupCommands) -> PccResult<()> {
    let manager = BackupManager::new(paths.clone());

    match cmd {
        BackupCommands::Create { files, description } => {
            let candidates = if files.is_empty() {
                default_backup_candidates(paths.working_root())?
            } else {
                files
            };

            if candidates.is_empty() {
                println!("Nothing to back up.");
                println!(
                    "No pnpm-workspace.yaml or package.json found under {}",
                    paths.working_root().display()
                );
                return Ok(());
            }

            let id = manager.create_backup(&candidates, &description)?;
            let captured = manager
                .get_backup_info(&id)
                .map(|b| b.file_count())
                .unwrap_or(0);

            println!("Backup created: {}", id);
            println!("Backed up {} of {} file(s)", captured, candidates.len());
            println!("Location: {}", paths.snapshot_dir(&id).display());
            println!("To undo, run: pcc backup restore {} --force", id);
        }

        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: pcc backup create");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            println!();
            println!("{}", format_backup_list(&backups, verbose, Utc::now()));
        }

        BackupCommands::Show { backup } => {
            let info = resolve_backup(&manager, &backup)?;
            let validation = RestoreManager::new(paths.clone()).validate_backup(&info);

            println!("Backup Details");
            println!("==============");
            println!("{}", format_backup_details(&info, &validation));
        }

        BackupCommands::Restore {
            backup,
            force,
            delete,
        } => {
            let info = resolve_backup(&manager, &backup)?;
            let restore_manager = RestoreManager::new(paths.clone());
            let validation = restore_manager.validate_backup(&info);

            println!("Backup Information");
            println!("==================");
            println!("ID: {}", info.id());
            println!("Created: {}", format_timestamp(&info.manifest.timestamp));
            println!("Status: {}", validation.summary());
            println!("Files:");
            for file in &info.manifest.files {
                println!("  - {}", file.relative_path);
            }
            println!();

            if !force {
                println!(
                    "WARNING: This will overwrite {} file(s) in {}",
                    info.file_count(),
                    paths.working_root().display()
                );
                println!("To proceed, run again with --force flag:");
                println!("  pcc backup restore {} --force", info.id());
                return Ok(());
            }

            println!("Restoring from backup...");
            let result = restore_manager
                .restore_backup(Some(info.id()))?
                .ok_or_else(|| PccError::backup_not_found(info.id()))?;
            println!("{}", result.summary());

            if !result.all_restored() {
                println!("Missing from backup:");
                for path in &result.skipped {
                    println!("  - {}", path);
                }
            }

            if delete {
                if !result.all_restored() {
                    println!("Backup {} kept because the restore was partial.", info.id());
                } else if manager.delete_backup(info.id())? {
                    println!("Backup {} deleted.", info.id());
                }
            }
        }

        BackupCommands::Delete { backup } => {
            if !manager.delete_backup(&backup)? {
                return Err(PccError::backup_not_found(backup));
            }
            println!("Deleted backup: {}", backup);
        }

        BackupCommands::Clear { force } => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups to delete.");
                return Ok(());
            }

            if !force {
                println!("This will delete {} backup(s).", backups.len());
                println!("To proceed, run again with --force flag:");
                println!("  pcc backup clear --force");
                return Ok(());
            }

            let deleted = manager.clear_backups()?;
            println!("Deleted {} backup(s).", deleted);
        }
    }

    Ok(())
}

/// Resolve a backup id or the `latest` keyword to a snapshot
fn resolve_backup(manager: &BackupManager, backup: &str) -> PccResult<BackupInfo> {
    if backup.eq_ignore_ascii_case(LATEST) {
        return manager
            .get_latest_backup()?
            .ok_or_else(|| PccError::backup_not_found(LATEST));
    }

    manager
        .get_backup_info(backup)
        .ok_or_else(|| PccError::backup_not_found(backup))
}
