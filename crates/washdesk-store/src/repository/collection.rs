//! # Collection Repository
//!
//! One directory, one pretty-printed JSON file per record.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, warn};
use washdesk_core::validation::validate_record_id;

use super::Record;
use crate::error::{StoreError, StoreResult};
use crate::files::{list_json_files, read_json, record_path, remove_file, write_json_atomic};

/// Repository for one record type.
///
/// ## Usage
/// ```rust,ignore
/// let employees: Collection<Employee> = Collection::new(root);
///
/// employees.save(&employee)?;
/// let found = employees.get_by_id("emp_1")?;
/// employees.delete("emp_1")?;
/// ```
#[derive(Debug)]
pub struct Collection<T> {
    dir: PathBuf,
    lock: RwLock<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Collection<T> {
    /// Creates the repository for `<root>/<T::DIR>`. Nothing is touched on disk.
    pub fn new(root: &Path) -> Self {
        Collection {
            dir: root.join(T::DIR),
            lock: RwLock::new(()),
            _record: PhantomData,
        }
    }

    /// Directory holding this collection's files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every readable record, in the type's listing order.
    ///
    /// Files that fail to parse are skipped with a warning.
    pub fn list(&self) -> StoreResult<Vec<T>> {
        let _guard = self.lock.read();
        let mut records: Vec<T> = self
            .scan()?
            .into_iter()
            .map(|(_, record)| record)
            .collect();
        T::sort_listing(&mut records);

        debug!(entity = T::ENTITY, count = records.len(), "Listed records");
        Ok(records)
    }

    /// Finds a record by id.
    ///
    /// ## Returns
    /// * `Ok(T)` - Record found
    /// * `Err(StoreError::NotFound)` - No file holds this id
    pub fn get_by_id(&self, id: &str) -> StoreResult<T> {
        validate_record_id("id", id)?;
        let _guard = self.lock.read();

        self.locate(id)?
            .map(|(_, record)| record)
            .ok_or_else(|| StoreError::not_found(T::ENTITY, id))
    }

    /// Writes (or overwrites) the record's file.
    ///
    /// A record found under another file name is moved to `<id>.json`:
    /// the new file is written first, then the old ones are removed, so the
    /// id has exactly one backing file once this returns.
    pub fn save(&self, record: &T) -> StoreResult<()> {
        let id = record.id();
        validate_record_id("id", id)?;
        let _guard = self.lock.write();

        let target = record_path(&self.dir, id);
        let stale: Vec<PathBuf> = self
            .backing_files(id)?
            .into_iter()
            .filter(|path| *path != target)
            .collect();

        debug!(entity = T::ENTITY, id = %id, "Saving record");
        write_json_atomic(&target, record)?;

        for path in stale {
            debug!(entity = T::ENTITY, id = %id, from = %path.display(), "Removing superseded record file");
            remove_file(&path)?;
        }
        Ok(())
    }

    /// Removes the record's file.
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        validate_record_id("id", id)?;
        let _guard = self.lock.write();

        let files = self.backing_files(id)?;
        if files.is_empty() {
            return Err(StoreError::not_found(T::ENTITY, id));
        }

        debug!(entity = T::ENTITY, id = %id, files = files.len(), "Deleting record");
        let mut removed = false;
        for path in files {
            removed |= remove_file(&path)?;
        }
        if removed {
            Ok(())
        } else {
            Err(StoreError::not_found(T::ENTITY, id))
        }
    }

    /// `<id>.json` first, then every file. Caller holds the lock.
    fn locate(&self, id: &str) -> StoreResult<Option<(PathBuf, T)>> {
        let direct = record_path(&self.dir, id);
        match read_json::<T>(&direct) {
            Ok(Some(record)) if record.id() == id => return Ok(Some((direct, record))),
            Ok(_) => {}
            Err(e) => warn!(path = %direct.display(), error = %e, "Skipping unreadable record"),
        }

        Ok(self.scan()?.into_iter().find(|(_, record)| record.id() == id))
    }

    /// Every readable file whose record carries `id`. Caller holds the lock.
    fn backing_files(&self, id: &str) -> StoreResult<Vec<PathBuf>> {
        Ok(self
            .scan()?
            .into_iter()
            .filter(|(_, record)| record.id() == id)
            .map(|(path, _)| path)
            .collect())
    }

    /// Reads every `*.json` file, skipping ones that vanish or fail to parse.
    fn scan(&self) -> StoreResult<Vec<(PathBuf, T)>> {
        let mut records = Vec::new();
        for path in list_json_files(&self.dir)? {
            match read_json::<T>(&path) {
                Ok(Some(record)) => records.push((path, record)),
                Ok(None) => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable record")
                }
            }
        }
        Ok(records)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use washdesk_core::{Employee, Expense};

    fn employee(id: &str, name: &str) -> Employee {
        Employee {
            id: id.to_string(),
            full_name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_save_is_idempotent() {
        let root = TempDir::new().unwrap();
        let repo: Collection<Employee> = Collection::new(root.path());
        let emp = employee("emp_1", "Ivan Petrov");

        repo.save(&emp).unwrap();
        repo.save(&emp).unwrap();
        repo.save(&emp).unwrap();

        assert_eq!(repo.get_by_id("emp_1").unwrap(), emp);
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[test]
    fn test_save_overwrites_in_place() {
        let root = TempDir::new().unwrap();
        let repo: Collection<Employee> = Collection::new(root.path());

        repo.save(&employee("emp_1", "Before")).unwrap();
        repo.save(&employee("emp_1", "After")).unwrap();

        assert_eq!(repo.get_by_id("emp_1").unwrap().full_name, "After");
    }

    #[test]
    fn test_missing_directory_lists_empty() {
        let root = TempDir::new().unwrap();
        let repo: Collection<Employee> = Collection::new(root.path());
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_get_and_delete_absent_are_not_found() {
        let root = TempDir::new().unwrap();
        let repo: Collection<Employee> = Collection::new(root.path());

        assert!(repo.get_by_id("emp_404").unwrap_err().is_not_found());
        assert!(repo.delete("emp_404").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_removes_file() {
        let root = TempDir::new().unwrap();
        let repo: Collection<Employee> = Collection::new(root.path());
        repo.save(&employee("emp_1", "Ivan")).unwrap();

        repo.delete("emp_1").unwrap();

        assert!(!repo.dir().join("emp_1.json").exists());
        assert!(repo.get_by_id("emp_1").unwrap_err().is_not_found());
    }

    #[test]
    fn test_lookup_falls_back_to_scan() {
        let root = TempDir::new().unwrap();
        let repo: Collection<Employee> = Collection::new(root.path());
        std::fs::create_dir_all(repo.dir()).unwrap();
        std::fs::write(
            repo.dir().join("legacy-name.json"),
            r#"{"id":"emp_7","fullName":"Legacy"}"#,
        )
        .unwrap();

        assert_eq!(repo.get_by_id("emp_7").unwrap().full_name, "Legacy");
        repo.delete("emp_7").unwrap();
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_replaces_record_under_other_file_name() {
        let root = TempDir::new().unwrap();
        let repo: Collection<Employee> = Collection::new(root.path());
        std::fs::create_dir_all(repo.dir()).unwrap();
        std::fs::write(
            repo.dir().join("legacy-name.json"),
            r#"{"id":"emp_7","fullName":"Legacy"}"#,
        )
        .unwrap();

        let mut emp = repo.get_by_id("emp_7").unwrap();
        emp.full_name = "Renamed".to_string();
        repo.save(&emp).unwrap();

        let listed = repo.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].full_name, "Renamed");
        assert!(!repo.dir().join("legacy-name.json").exists());
        assert!(repo.dir().join("emp_7.json").exists());

        repo.delete("emp_7").unwrap();
        assert!(repo.get_by_id("emp_7").unwrap_err().is_not_found());
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_delete_removes_every_copy_of_an_id() {
        let root = TempDir::new().unwrap();
        let repo: Collection<Employee> = Collection::new(root.path());
        repo.save(&employee("emp_7", "Current")).unwrap();
        std::fs::write(
            repo.dir().join("legacy-name.json"),
            r#"{"id":"emp_7","fullName":"Legacy"}"#,
        )
        .unwrap();

        repo.delete("emp_7").unwrap();

        assert!(repo.get_by_id("emp_7").unwrap_err().is_not_found());
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_files_skipped_in_scan() {
        let root = TempDir::new().unwrap();
        let repo: Collection<Employee> = Collection::new(root.path());
        repo.save(&employee("emp_1", "Good")).unwrap();
        std::fs::write(repo.dir().join("broken.json"), "{oops").unwrap();

        let listed = repo.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "emp_1");
    }

    #[test]
    fn test_unsafe_id_rejected() {
        let root = TempDir::new().unwrap();
        let repo: Collection<Employee> = Collection::new(root.path());

        let err = repo.save(&employee("../escape", "x")).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(!root.path().join("escape.json").exists());
    }

    #[test]
    fn test_expenses_listed_newest_first() {
        let root = TempDir::new().unwrap();
        let repo: Collection<Expense> = Collection::new(root.path());
        for (id, date) in [("exp_a", "2024-01-10"), ("exp_b", "2024-03-01"), ("exp_c", "2023-12-31")] {
            repo.save(&Expense {
                id: id.to_string(),
                date: date.to_string(),
                ..Default::default()
            })
            .unwrap();
        }

        let dates: Vec<_> = repo.list().unwrap().into_iter().map(|e| e.date).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-01-10", "2023-12-31"]);
    }
}
