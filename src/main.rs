use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use pcc::cli::{handle_backup_command, BackupCommands};
use pcc::config::paths::{PccPaths, CWD_ENV_VAR, MANIFEST_FILE};
use pcc::logging;

#[derive(Parser)]
#[command(
    name = "pcc",
    version,
    about = "Snapshot and undo support for pnpm workspace catalog rewrites",
    long_about = "pcc captures pnpm-workspace.yaml and package.json files before a \
                  catalog is split into named categories, and restores them when \
                  the rewrite needs to be undone."
)]
struct Cli {
    /// Working directory (defaults to the current directory)
    #[arg(long, global = true, env = CWD_ENV_VAR)]
    cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show the resolved working directory and store paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        logging::DEBUG_LEVEL
    } else {
        logging::DEFAULT_LEVEL
    };
    logging::init(level)?;

    let paths = PccPaths::resolve(cli.cwd)?;

    match cli.command {
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&paths, cmd)?;
        }
        Some(Commands::Config) => {
            println!("pcc Configuration");
            println!("=================");
            println!("Working directory: {}", paths.working_root().display());
            println!("Backup directory:  {}", paths.store_dir().display());
            println!("Manifest file:     {}", MANIFEST_FILE);
        }
        None => {
            println!("pcc - pnpm catalog category manager");
            println!();
            println!("Run 'pcc --help' for usage information.");
            println!("Run 'pcc backup list' to see available backups.");
        }
    }

    Ok(())
}
