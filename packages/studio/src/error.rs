//! Error types for the studio layer

use courseforge_editor::EditorError;
use courseforge_providers::ProviderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A stored record did not match the expected shape. Treated as a data
    /// error, not a user-recoverable condition.
    #[error("Malformed stored record: {0}")]
    Data(#[from] serde_json::Error),

    #[error("Course not open: {0}")]
    CourseNotOpen(String),

    #[error("Course not found: {0}")]
    CourseNotFound(String),

    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),
}
