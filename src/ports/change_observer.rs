//! File-change notification port.
//!
//! Replaces cross-process notification plumbing with an in-process
//! subscription point on the file store: delivery is at-most-once,
//! synchronous, and best-effort. A failing observer never fails the write
//! that triggered it.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::domain::AppError;

/// Notification emitted after a successful supervised write.
#[derive(Debug, Clone)]
pub struct FileChangeEvent {
    /// Absolute path of the file that changed.
    pub path: PathBuf,
    /// Human-readable description, e.g. "File updated: index.html".
    pub message: String,
    /// When the write completed.
    pub timestamp: DateTime<Utc>,
}

/// Subscriber for file-change notifications.
pub trait FileChangeObserver: Send + Sync {
    /// Handle one change event. Errors are logged by the dispatcher and
    /// otherwise ignored.
    fn file_changed(&self, event: &FileChangeEvent) -> Result<(), AppError>;
}
