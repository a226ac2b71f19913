//! Display formatting for terminal output
//!
//! Provides utilities for formatting snapshots for terminal display.

pub mod backup;

pub use backup::{
    format_age, format_backup_details, format_backup_list, format_backup_time, format_timestamp,
};
