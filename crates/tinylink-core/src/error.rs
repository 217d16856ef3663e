use thiserror::Error;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Failures reported by a [`LinkStore`](crate::store::LinkStore).
///
/// `Conflict` is an expected outcome of `create` and carries the code that
/// was already taken; every other variant is a backend failure.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("code already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// Caller-visible failures of the link registry.
///
/// Each variant maps to one stable outward signal: bad input
/// (`MissingField`, `InvalidUrl`, `InvalidCode`), conflict (`CodeTaken`),
/// not found (`NotFound`), or server error (`Exhausted`, `StorageUnavailable`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid code: {0}")]
    InvalidCode(String),
    #[error("code already exists: {0}")]
    CodeTaken(String),
    #[error("link not found: {0}")]
    NotFound(String),
    #[error("could not allocate a unique code after {attempts} attempts")]
    Exhausted { attempts: u32 },
    #[error("storage unavailable")]
    StorageUnavailable,
}
