// crates/isbmap-core/src/error.rs

use thiserror::Error;

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures raised while loading a category dataset.
///
/// A per-category failure is recorded in the store and surfaced in the
/// [`crate::store::LoadReport`]; it never blocks the other categories.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("dataset not found: {0}")]
    NotFound(String),

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid dataset for {category}: {reason}")]
    InvalidDocument {
        category: &'static str,
        reason: &'static str,
    },
}
