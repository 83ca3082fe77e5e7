//! Closed outcome codes returned by supervised file operations.
//!
//! The file store reports results as values rather than errors so callers can
//! map each outcome to a stable user-facing message without exception
//! plumbing at every call site. The enums are non-exhaustive: callers outside
//! this crate must keep a defensive unknown-outcome arm when matching.

/// Result of a supervised write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum WriteOutcome {
    /// File was created or overwritten in full.
    Written,
    /// Path lies outside the active project root.
    NotAllowed,
    /// Filesystem write failed.
    IoError,
}

/// Result of a supervised read.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReadOutcome {
    /// Full file contents.
    Content(String),
    /// Path lies outside the active project root.
    NotAllowed,
    /// No file exists at the path.
    NotFound,
    /// Filesystem read failed.
    IoError,
}

/// Result of a supervised delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeleteOutcome {
    /// File was removed.
    Deleted,
    /// Path lies outside the active project root.
    NotAllowed,
    /// No file exists at the path.
    NotFound,
    /// Filesystem removal failed.
    IoError,
}
