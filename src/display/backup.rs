//! Backup display formatting
//!
//! Formats snapshots for terminal output in list and detail views. Times are
//! shown in local time; ordering never depends on these strings.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};

use crate::backup::{BackupInfo, ValidationResult};

/// Layout used wherever a backup time is shown
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format an ISO-8601 timestamp as `YYYY-MM-DD HH:MM:SS` in local time
///
/// Input that does not parse is returned unchanged.
pub fn format_backup_time(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(parsed) => format_timestamp(&parsed.with_timezone(&Utc)),
        Err(_) => iso.to_string(),
    }
}

/// Format a manifest timestamp in local time
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    format_timestamp_in(timestamp, &Local)
}

/// Format a manifest timestamp in an explicit time zone
pub fn format_timestamp_in<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    timestamp
        .with_timezone(tz)
        .format(DISPLAY_TIME_FORMAT)
        .to_string()
}

/// Format an age in short human-readable form
pub fn format_age(duration: Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }

    format!("{}mo", days / 30)
}

/// Format a list of snapshots, newest first as given
pub fn format_backup_list(backups: &[BackupInfo], verbose: bool, now: DateTime<Utc>) -> String {
    if backups.is_empty() {
        return "No backups found.".to_string();
    }

    if verbose {
        return format_backup_list_verbose(backups, now);
    }

    let id_width = backups
        .iter()
        .map(|b| b.manifest.id.len())
        .max()
        .unwrap_or(2)
        .max(2);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<id_width$}  {:<19}  {:>5}  {:>5}  {}\n",
        "ID",
        "Created",
        "Files",
        "Age",
        "Description",
        id_width = id_width,
    ));

    output.push_str(&format!(
        "{:-<id_width$}  {:-<19}  {:->5}  {:->5}  {:-<11}\n",
        "",
        "",
        "",
        "",
        "",
        id_width = id_width,
    ));

    for backup in backups {
        let manifest = &backup.manifest;
        output.push_str(&format!(
            "{:<id_width$}  {:<19}  {:>5}  {:>5}  {}\n",
            manifest.id,
            format_timestamp(&manifest.timestamp),
            manifest.files.len(),
            format_age(now.signed_duration_since(manifest.timestamp)),
            manifest.description,
            id_width = id_width,
        ));
    }

    output.push_str(&format!("\nTotal: {} backup(s)", backups.len()));
    output
}

fn format_backup_list_verbose(backups: &[BackupInfo], now: DateTime<Utc>) -> String {
    let mut output = String::new();

    for (i, backup) in backups.iter().enumerate() {
        let manifest = &backup.manifest;
        output.push_str(&format!("{}. {}\n", i + 1, manifest.id));
        output.push_str(&format!(
            "   Created: {} ({} ago)\n",
            format_timestamp(&manifest.timestamp),
            format_age(now.signed_duration_since(manifest.timestamp))
        ));
        output.push_str(&format!("   Files:   {}\n", manifest.files.len()));
        if !manifest.description.is_empty() {
            output.push_str(&format!("   Description: {}\n", manifest.description));
        }
        output.push('\n');
    }

    output.push_str(&format!("Total: {} backup(s)", backups.len()));
    output
}

/// Format the details of a single snapshot
pub fn format_backup_details(backup: &BackupInfo, validation: &ValidationResult) -> String {
    let manifest = &backup.manifest;
    let mut output = String::new();

    output.push_str(&format!("ID:          {}\n", manifest.id));
    output.push_str(&format!(
        "Created:     {}\n",
        format_timestamp(&manifest.timestamp)
    ));
    output.push_str(&format!("Version:     {}\n", manifest.version));
    output.push_str(&format!(
        "Description: {}\n",
        if manifest.description.is_empty() {
            "(none)"
        } else {
            manifest.description.as_str()
        }
    ));
    output.push_str(&format!("Location:    {}\n", backup.path.display()));
    output.push_str(&format!("Files ({}):\n", manifest.files.len()));

    for file in &manifest.files {
        let marker = if validation.missing.contains(&file.relative_path) {
            "  [missing]"
        } else {
            ""
        };
        output.push_str(&format!("  - {}{}\n", file.relative_path, marker));
    }

    output.push_str(&format!("Status:      {}", validation.summary()));
    output
}
