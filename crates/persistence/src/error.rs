use thiserror::Error;

use fairshare_core::DomainError;

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Infrastructure-side failures: IO, serialization, or saved data that no
/// longer satisfies the ledger's structural invariants.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("saved data is invalid: {0}")]
    Domain(#[from] DomainError),
}
