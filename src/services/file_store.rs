//! Supervised filesystem I/O returning closed outcome codes.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::domain::{DeleteOutcome, ReadOutcome, WriteOutcome};
use crate::ports::{FileChangeEvent, FileChangeObserver};
use crate::services::PathGuard;

/// Performs file I/O under supervision of a [`PathGuard`].
///
/// Every operation consults the guard first and returns exactly one outcome
/// code; no operation raises to its caller and none partially succeeds.
/// Registered observers are notified after each successful write.
pub struct FileStore {
    guard: PathGuard,
    observers: Vec<Arc<dyn FileChangeObserver>>,
}

impl FileStore {
    /// Create a store confined by the given guard.
    pub fn new(guard: PathGuard) -> Self {
        Self { guard, observers: Vec::new() }
    }

    /// Guard supervising this store.
    pub fn guard(&self) -> &PathGuard {
        &self.guard
    }

    /// Register an observer notified after each successful write.
    pub fn subscribe(&mut self, observer: Arc<dyn FileChangeObserver>) {
        self.observers.push(observer);
    }

    /// Overwrite-or-create `path` with `contents`.
    ///
    /// Missing parent directories are the caller's responsibility; this
    /// operation does not create them.
    pub fn write(&self, path: &Path, contents: &str) -> WriteOutcome {
        if !self.guard.is_allowed(path) {
            return WriteOutcome::NotAllowed;
        }
        if let Err(err) = fs::write(path, contents) {
            warn!(path = %path.display(), error = %err, "file write failed");
            return WriteOutcome::IoError;
        }
        self.notify(path);
        WriteOutcome::Written
    }

    /// Read the full contents of `path`.
    pub fn read(&self, path: &Path) -> ReadOutcome {
        if !self.guard.is_allowed(path) {
            return ReadOutcome::NotAllowed;
        }
        if !path.exists() {
            return ReadOutcome::NotFound;
        }
        match fs::read_to_string(path) {
            Ok(contents) => ReadOutcome::Content(contents),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "file read failed");
                ReadOutcome::IoError
            }
        }
    }

    /// Remove the file at `path`.
    pub fn delete(&self, path: &Path) -> DeleteOutcome {
        if !self.guard.is_allowed(path) {
            return DeleteOutcome::NotAllowed;
        }
        if !path.exists() {
            return DeleteOutcome::NotFound;
        }
        match fs::remove_file(path) {
            Ok(()) => DeleteOutcome::Deleted,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "file delete failed");
                DeleteOutcome::IoError
            }
        }
    }

    /// Best-effort at-most-once dispatch. Observer failures never fail the
    /// write that triggered them.
    fn notify(&self, path: &Path) {
        if self.observers.is_empty() {
            return;
        }
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let event = FileChangeEvent {
            path: path.to_path_buf(),
            message: format!("File updated: {name}"),
            timestamp: Utc::now(),
        };
        for observer in &self.observers {
            if let Err(err) = observer.file_changed(&event) {
                warn!(
                    path = %event.path.display(),
                    error = %err,
                    "file-change notification dropped"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AppError;
    use std::sync::Mutex;
    use tempfile::tempdir;

    fn store_for(root: &Path) -> FileStore {
        FileStore::new(PathGuard::new(root))
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempdir().unwrap();
        let store = store_for(dir.path());
        let path = dir.path().join("a.txt");

        assert_eq!(store.write(&path, "hello\nworld\n"), WriteOutcome::Written);
        assert_eq!(store.read(&path), ReadOutcome::Content("hello\nworld\n".into()));
    }

    #[test]
    fn empty_contents_round_trip() {
        let dir = tempdir().unwrap();
        let store = store_for(dir.path());
        let path = dir.path().join("empty.txt");

        assert_eq!(store.write(&path, ""), WriteOutcome::Written);
        assert_eq!(store.read(&path), ReadOutcome::Content(String::new()));
    }

    #[test]
    fn operations_outside_the_root_are_not_allowed() {
        let dir = tempdir().unwrap();
        let outside = tempdir().unwrap();
        let store = store_for(dir.path());
        let path = outside.path().join("a.txt");
        std::fs::write(&path, "exists").unwrap();

        assert_eq!(store.write(&path, "x"), WriteOutcome::NotAllowed);
        assert_eq!(store.read(&path), ReadOutcome::NotAllowed);
        assert_eq!(store.delete(&path), DeleteOutcome::NotAllowed);
        // The existing file is untouched.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "exists");
    }

    #[test]
    fn read_and_delete_missing_file_report_not_found() {
        let dir = tempdir().unwrap();
        let store = store_for(dir.path());
        let path = dir.path().join("missing.txt");

        assert_eq!(store.read(&path), ReadOutcome::NotFound);
        assert_eq!(store.delete(&path), DeleteOutcome::NotFound);
    }

    #[test]
    fn delete_then_read_reports_not_found() {
        let dir = tempdir().unwrap();
        let store = store_for(dir.path());
        let path = dir.path().join("a.txt");

        store.write(&path, "hello");
        assert_eq!(store.delete(&path), DeleteOutcome::Deleted);
        assert_eq!(store.read(&path), ReadOutcome::NotFound);
    }

    #[test]
    fn write_without_parent_directory_is_an_io_error() {
        let dir = tempdir().unwrap();
        let store = store_for(dir.path());
        let path = dir.path().join("missing-dir").join("a.txt");

        assert_eq!(store.write(&path, "x"), WriteOutcome::IoError);
    }

    struct RecordingObserver {
        events: Mutex<Vec<FileChangeEvent>>,
    }

    impl FileChangeObserver for RecordingObserver {
        fn file_changed(&self, event: &FileChangeEvent) -> Result<(), AppError> {
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    struct FailingObserver;

    impl FileChangeObserver for FailingObserver {
        fn file_changed(&self, _event: &FileChangeEvent) -> Result<(), AppError> {
            Err(AppError::configuration("subscriber gone"))
        }
    }

    #[test]
    fn successful_write_notifies_observers() {
        let dir = tempdir().unwrap();
        let mut store = store_for(dir.path());
        let observer = Arc::new(RecordingObserver { events: Mutex::new(Vec::new()) });
        store.subscribe(observer.clone());

        let path = dir.path().join("page.html");
        store.write(&path, "<html></html>");

        let events = observer.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "File updated: page.html");
        assert!(events[0].path.ends_with("page.html"));
    }

    #[test]
    fn rejected_write_does_not_notify() {
        let dir = tempdir().unwrap();
        let outside = tempdir().unwrap();
        let mut store = store_for(dir.path());
        let observer = Arc::new(RecordingObserver { events: Mutex::new(Vec::new()) });
        store.subscribe(observer.clone());

        store.write(&outside.path().join("a.txt"), "x");
        assert!(observer.events.lock().unwrap().is_empty());
    }

    #[test]
    fn failing_observer_does_not_fail_the_write() {
        let dir = tempdir().unwrap();
        let mut store = store_for(dir.path());
        store.subscribe(Arc::new(FailingObserver));

        let path = dir.path().join("a.txt");
        assert_eq!(store.write(&path, "hello"), WriteOutcome::Written);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    }
}
