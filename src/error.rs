//! Error taxonomy for lesson operations.
//!
//! Provider failures and unparseable model replies never show up here: the
//! client degrades to offline content and the pipeline falls back to storing
//! the raw reply. What remains is what a caller can actually observe.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LessonError {
    /// The referenced lesson does not exist.
    #[error("Lesson with ID {0} not found")]
    NotFound(u64),

    /// The request failed validation before any work was done.
    #[error("{0}")]
    InvalidRequest(String),

    /// The lesson store is unusable (a writer panicked mid-update).
    #[error("Lesson store unavailable: {0}")]
    Storage(String),
}

impl LessonError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
