//! Backup identifiers
//!
//! Ids are local wall-clock timestamps at one-second resolution
//! (`YYYYMMDD_HHMMSS`). When several snapshots land in the same second a
//! zero-padded counter is appended (`_001`, `_002`, ...), which keeps the
//! lexicographic order equal to the creation order.

use std::fmt::Display;
use std::path::{Component, Path};

use chrono::{DateTime, TimeZone};

/// strftime layout of the base identifier
pub const ID_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Highest collision counter tried before giving up
pub const MAX_ID_SUFFIX: u32 = 999;

/// Format the base backup identifier for an instant
pub fn generate_backup_id<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    now.format(ID_FORMAT).to_string()
}

/// Build the candidate id for a given collision attempt
///
/// Attempt 0 is the bare base id.
pub fn candidate_id(base: &str, attempt: u32) -> String {
    if attempt == 0 {
        base.to_string()
    } else {
        format!("{}_{:03}", base, attempt)
    }
}

/// Check that an id names exactly one directory inside the store
///
/// Rejects empty ids, `.`/`..` and anything containing a separator, so a
/// user-supplied id can never address a path outside the store.
pub fn is_valid_backup_id(id: &str) -> bool {
    if id.is_empty() || id.contains('/') || id.contains('\\') || id.contains('\0') {
        return false;
    }

    let mut components = Path::new(id).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
