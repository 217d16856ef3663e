use crate::error::Result;
use crate::link::Link;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Parameters for creating a link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLink {
    /// The target URL to redirect to.
    pub url: String,
    /// Optional caller-chosen code. Generated when absent or blank.
    pub code: Option<String>,
}

impl CreateLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// The link registry: create, resolve, inspect and delete links.
#[async_trait]
pub trait Registry: Send + Sync + 'static {
    /// Validates the request and stores a new link.
    async fn create(&self, params: CreateLink) -> Result<Link>;

    /// Counts a click and returns the link to redirect to.
    async fn resolve(&self, code: &str) -> Result<Link>;

    /// Fetches a link without counting a click.
    async fn get(&self, code: &str) -> Result<Link>;

    /// Deletes a link.
    async fn delete(&self, code: &str) -> Result<()>;

    /// All links, newest first.
    async fn list(&self) -> Result<Vec<Link>>;
}
