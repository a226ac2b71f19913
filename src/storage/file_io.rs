//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't leave half-written JSON behind
//! on failure.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::error::PccError;

/// Indentation used for every JSON document pcc writes
const JSON_INDENT: &[u8] = b"    ";

/// Read JSON from a file, returning an error if the file doesn't exist
pub fn read_json_required<T, P>(path: P) -> Result<T, PccError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(PccError::Io(format!("File not found: {}", path.display())));
    }

    let file = File::open(path)
        .map_err(|e| PccError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| PccError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Serialize a value as pretty-printed JSON with four-space indentation
pub fn to_json_pretty<T: Serialize>(data: &T) -> Result<Vec<u8>, PccError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    data.serialize(&mut serializer)
        .map_err(|e| PccError::Json(format!("Failed to serialize data: {}", e)))?;
    Ok(buf)
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not present at all, so readers
/// never observe a truncated document.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), PccError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    write_json_atomic_via(path, &path.with_extension("json.tmp"), data)
}

/// Write JSON atomically through an explicit temp file
///
/// `temp_path` must be on the same filesystem as `path` and must not name a
/// file anyone else cares about.
pub fn write_json_atomic_via<T: Serialize>(
    path: &Path,
    temp_path: &Path,
    data: &T,
) -> Result<(), PccError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            PccError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let contents = to_json_pretty(data)?;

    let file = File::create(temp_path)
        .map_err(|e| PccError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(&contents)
        .map_err(|e| PccError::Io(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| PccError::Io(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| PccError::Io(format!("Failed to sync data: {}", e)))?;

    fs::rename(temp_path, path).map_err(|e| {
        let _ = fs::remove_file(temp_path);
        PccError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Recursively remove a directory, ignoring one that is already gone
///
/// Only a real directory is removed. A symlink or plain file at `path` is
/// left untouched and reported as `false`, as is a missing entry.
pub fn remove_dir_forced(path: &Path) -> io::Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_dir() => {}
        Ok(_) => return Ok(false),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    }

    match fs::remove_dir_all(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
