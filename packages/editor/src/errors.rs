//! Error types for the editor

use thiserror::Error;

use crate::forms::FormError;
use crate::mutations::MutationError;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    /// Local validation failure, surfaced to the user as a blocking alert.
    /// The operation is aborted and no state is mutated.
    #[error("Validation error: {0}")]
    Validation(#[from] FormError),

    #[error("Session is read-only")]
    ReadOnly,

    #[error("No matching modal is open")]
    NoOpenModal,
}
