//! Error types for the list widget.
//!
//! Only caller misuse is an error here. Render vetoes are ordinary boolean
//! results, drag-gesture edge cases are silent no-ops, and cleanup paths
//! never fail.

/// Result type alias for list operations.
pub type ListResult<T> = std::result::Result<T, ListError>;

/// Errors surfaced by the list widget.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ListError {
    /// An insert named an anchor value that is not in the list.
    ///
    /// Continuing would corrupt the order invariant, so this is a hard
    /// failure rather than a silent skip.
    #[error("no rendered item matches the anchor value")]
    AnchorNotFound,
}
