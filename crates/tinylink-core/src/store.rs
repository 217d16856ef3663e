use crate::error::StorageError;
use crate::link::Link;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Durable table of links keyed by code.
///
/// The store is the sole writer of link records. `create` and
/// `resolve_and_increment` must each be atomic with respect to concurrent
/// callers on the same code.
#[async_trait]
pub trait LinkStore: Send + Sync + 'static {
    /// Inserts a new link with zero clicks.
    ///
    /// Returns `Err(StorageError::Conflict)` if the code is already present.
    async fn create(&self, code: &ShortCode, target_url: &str) -> Result<Link>;

    /// Retrieves the link for a code. Returns `None` if it does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<Link>>;

    /// Increments the click counter, stamps the click time and returns the
    /// updated link, all in one step. Returns `None` if the code does not exist.
    async fn resolve_and_increment(&self, code: &ShortCode) -> Result<Option<Link>>;

    /// Removes a link, freeing its code for reuse.
    /// Returns `true` if the link existed and was removed.
    async fn delete(&self, code: &ShortCode) -> Result<bool>;

    /// All live links, newest first.
    async fn list(&self) -> Result<Vec<Link>>;
}
