//! Snapshot deletion

use tracing::info;

use crate::error::{PccError, PccResult};
use crate::storage::remove_dir_forced;

use super::id::is_valid_backup_id;
use super::manager::BackupManager;

impl BackupManager {
    /// Delete one snapshot directory
    ///
    /// Returns `false` if no snapshot directory with this id exists. A
    /// symlink or plain file under that name is not a snapshot and is left
    /// in place.
    pub fn delete_backup(&self, id: &str) -> PccResult<bool> {
        if !is_valid_backup_id(id) {
            return Ok(false);
        }

        let dir = self.paths().snapshot_dir(id);
        let removed = remove_dir_forced(&dir)
            .map_err(|e| PccError::Io(format!("Failed to delete backup {}: {}", id, e)))?;
        if !removed {
            return Ok(false);
        }

        info!(backup_id = %id, "Deleted backup");
        Ok(true)
    }

    /// Delete every snapshot listed at the time of the call
    ///
    /// Snapshots created while the clear is running are left alone. Returns
    /// the number of snapshots removed.
    pub fn clear_backups(&self) -> PccResult<usize> {
        let backups = self.list_backups()?;
        let mut deleted = 0;

        for backup in &backups {
            if self.delete_backup(backup.id())? {
                deleted += 1;
            }
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PccPaths;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_manager() -> (BackupManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("package.json"), "{}").unwrap();
        let paths = PccPaths::with_working_root(temp_dir.path().to_path_buf());
        (BackupManager::new(paths), temp_dir)
    }

    #[test]
    fn test_delete_backup() {
        let (manager, _temp) = create_test_manager();
        let id = manager.create_backup(&["package.json"], "").unwrap();

        assert!(manager.delete_backup(&id).unwrap());
        assert!(!manager.paths().snapshot_dir(&id).exists());
        assert!(manager.get_backup_info(&id).is_none());
        assert!(manager.list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_delete_nonexistent_backup() {
        let (manager, _temp) = create_test_manager();
        let id = manager.create_backup(&["package.json"], "").unwrap();

        assert!(!manager.delete_backup("20000101_000000").unwrap());
        assert!(!manager.delete_backup("../..").unwrap());
        assert_eq!(manager.list_backups().unwrap().len(), 1);
        assert!(manager.get_backup_info(&id).is_some());
    }

    #[test]
    fn test_delete_incomplete_snapshot_directory() {
        let (manager, _temp) = create_test_manager();
        let dir = manager.paths().snapshot_dir("20250101_000000");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("nested").join("package.json"), "{}").unwrap();

        assert!(manager.delete_backup("20250101_000000").unwrap());
        assert!(!dir.exists());
    }

    #[test]
    fn test_delete_plain_file_entry() {
        let (manager, _temp) = create_test_manager();
        manager.create_backup(&["package.json"], "").unwrap();
        let notes = manager.paths().store_dir().join("notes.txt");
        fs::write(&notes, "keep me").unwrap();

        assert!(!manager.delete_backup("notes.txt").unwrap());
        assert_eq!(fs::read_to_string(&notes).unwrap(), "keep me");
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_symlinked_entry_leaves_target() {
        let (manager, _temp) = create_test_manager();
        manager.create_backup(&["package.json"], "").unwrap();

        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("precious.txt"), "x").unwrap();
        let link = manager.paths().store_dir().join("linked");
        std::os::unix::fs::symlink(outside.path(), &link).unwrap();

        assert!(!manager.delete_backup("linked").unwrap());
        assert!(outside.path().join("precious.txt").exists());
        assert!(fs::symlink_metadata(&link).is_ok());
    }

    #[test]
    fn test_clear_backups() {
        let (manager, _temp) = create_test_manager();
        for _ in 0..3 {
            manager.create_backup(&["package.json"], "").unwrap();
        }

        assert_eq!(manager.clear_backups().unwrap(), 3);
        assert!(manager.list_backups().unwrap().is_empty());
        assert!(!manager.has_backup().unwrap());
    }

    #[test]
    fn test_clear_leaves_invalid_directories() {
        let (manager, _temp) = create_test_manager();
        manager.create_backup(&["package.json"], "").unwrap();
        let stray = manager.paths().store_dir().join("half-written");
        fs::create_dir_all(&stray).unwrap();

        assert_eq!(manager.clear_backups().unwrap(), 1);
        assert!(stray.exists());
    }

    #[test]
    fn test_clear_empty_store() {
        let (manager, _temp) = create_test_manager();
        assert_eq!(manager.clear_backups().unwrap(), 0);
    }
}
