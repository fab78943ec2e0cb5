//! Errors surfaced when encoding a depiction.
//!
//! Traversal itself never fails. Encoder errors are wrapped transparently so
//! their message and source reach the caller unchanged.

/// An encoder rejected the depicted tree or failed to write it.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The JSON encoder failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// The binary encoder failed.
    #[error(transparent)]
    Binary(#[from] bincode::Error),
}
