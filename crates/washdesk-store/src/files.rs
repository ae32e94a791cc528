//! # JSON File Helpers
//!
//! The only place that touches `std::fs`. Callers hold the per-type lock.
//!
//! ## Atomic Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  write_json_atomic("employees/emp_1.json", record)                     │
//! │                                                                         │
//! │  1. create_dir_all("employees")                                        │
//! │  2. write  employees/emp_1.tmp   ← pretty JSON                         │
//! │  3. rename employees/emp_1.tmp → employees/emp_1.json                  │
//! │                                                                         │
//! │  A crash before 3 leaves the old file intact; readers never see a      │
//! │  half-written record.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Extension of every record file.
pub const RECORD_EXTENSION: &str = "json";

/// Extension of in-flight atomic writes.
pub const TEMP_EXTENSION: &str = "tmp";

/// Reads and parses a JSON file. `Ok(None)` when the file does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io(path, e)),
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| StoreError::malformed(path, e))
}

/// Serializes `value` as pretty JSON and atomically replaces `path`.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let json = serde_json::to_vec_pretty(value).map_err(StoreError::Serialize)?;
    let tmp = path.with_extension(TEMP_EXTENSION);

    std::fs::write(&tmp, &json).map_err(|e| StoreError::io(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(StoreError::io(path, e));
    }

    debug!(path = %path.display(), bytes = json.len(), "Wrote file");
    Ok(())
}

/// Removes a file. `Ok(false)` when it was already gone.
pub fn remove_file(path: &Path) -> StoreResult<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Removed file");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

/// Every `*.json` file directly inside `dir`, sorted by name.
///
/// A missing directory yields an empty list.
pub fn list_json_files(dir: &Path) -> StoreResult<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StoreError::io(dir, e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| StoreError::io(dir, e))?.path();
        let is_record = path.is_file()
            && path.extension().and_then(|ext| ext.to_str()) == Some(RECORD_EXTENSION);
        if is_record {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// `<dir>/<id>.json`
pub fn record_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{}.{}", id, RECORD_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let read: Option<Note> = read_json(&dir.path().join("absent.json")).unwrap();
        assert!(read.is_none());
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("note.json");
        let note = Note {
            text: "hello".into(),
        };

        write_json_atomic(&path, &note).unwrap();

        assert_eq!(read_json::<Note>(&path).unwrap(), Some(note));
        assert!(!path.with_extension(TEMP_EXTENSION).exists());
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains('\n'), "pretty-printed");
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = read_json::<Note>(&path).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn test_listing_ignores_other_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a.tmp"), "{}").unwrap();
        std::fs::create_dir(dir.path().join("sub.json")).unwrap();

        let files = list_json_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_missing_directory_lists_empty() {
        let dir = TempDir::new().unwrap();
        assert!(list_json_files(&dir.path().join("nope")).unwrap().is_empty());
    }

    #[test]
    fn test_remove_reports_absence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("x.json");
        std::fs::write(&path, "{}").unwrap();
        assert!(remove_file(&path).unwrap());
        assert!(!remove_file(&path).unwrap());
    }
}
