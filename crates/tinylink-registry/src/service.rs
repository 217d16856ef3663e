use crate::settings::RegistrySettings;
use async_trait::async_trait;
use std::sync::Arc;
use tinylink_core::error::Result;
use tinylink_core::{
    is_reserved_code, is_valid_url, normalize_url, CreateLink, Link, LinkStore, Registry,
    RegistryError, ShortCode, StorageError,
};
use tinylink_generator::Generator;
use tracing::{debug, error, trace, warn};

/// A concrete implementation of the [`Registry`] trait.
///
/// This service wraps a [`LinkStore`] and a [`Generator`] to handle:
/// - URL and code validation, before any store call
/// - Short code generation, retrying generated codes that collide
/// - Screening of reserved codes
/// - Translation of store outcomes into [`RegistryError`] kinds
///
/// The service keeps no mutable state of its own; all coordination between
/// concurrent callers happens inside the store.
#[derive(Debug)]
pub struct RegistryService<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
    settings: RegistrySettings,
}

impl<S, G> Clone for RegistryService<S, G> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            generator: Arc::clone(&self.generator),
            settings: self.settings,
        }
    }
}

impl<S: LinkStore, G: Generator> RegistryService<S, G> {
    /// Creates a new `RegistryService` with default settings.
    pub fn new(store: S, generator: G) -> Self {
        Self::with_settings(store, generator, RegistrySettings::default())
    }

    /// Creates a new `RegistryService` with explicit settings.
    pub fn with_settings(store: S, generator: G, settings: RegistrySettings) -> Self {
        Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
            settings,
        }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates the target URL and returns it normalized.
    fn validate_url(url: &str) -> Result<String> {
        let url = normalize_url(url);
        if url.is_empty() {
            return Err(RegistryError::MissingField("url"));
        }

        if !is_valid_url(&url) {
            return Err(RegistryError::InvalidUrl(format!(
                "must be an absolute http or https URL: {}",
                url
            )));
        }

        Ok(url)
    }

    /// Validates a caller-chosen code.
    fn validate_custom_code(code: &str) -> Result<ShortCode> {
        let code = ShortCode::new(code)?;
        if is_reserved_code(code.as_str()) {
            return Err(RegistryError::InvalidCode(format!(
                "'{}' is reserved",
                code
            )));
        }
        Ok(code)
    }

    /// Parses a code used for lookup. A malformed code can never have been
    /// stored, so it is reported as not found.
    fn lookup_code(code: &str) -> Result<ShortCode> {
        ShortCode::new(code).map_err(|_| RegistryError::NotFound(code.trim().to_owned()))
    }

    async fn create_with_custom_code(&self, code: ShortCode, url: &str) -> Result<Link> {
        match self.store.create(&code, url).await {
            Ok(link) => {
                debug!(code = %link.code, "created link with custom code");
                Ok(link)
            }
            Err(StorageError::Conflict(code)) => {
                debug!(code = %code, "custom code already taken");
                Err(RegistryError::CodeTaken(code))
            }
            Err(e) => Err(storage_unavailable("create", e)),
        }
    }

    async fn create_with_generated_code(&self, url: &str) -> Result<Link> {
        let attempts = self.settings.attempts();

        for attempt in 1..=attempts {
            let code: ShortCode = self.generator.generate().into();
            if is_reserved_code(code.as_str()) {
                warn!(code = %code, attempt, "generated a reserved code, retrying");
                continue;
            }

            match self.store.create(&code, url).await {
                Ok(link) => {
                    debug!(code = %link.code, attempt, "created link with generated code");
                    return Ok(link);
                }
                Err(StorageError::Conflict(_)) => {
                    warn!(code = %code, attempt, "generated code collided, retrying");
                }
                Err(e) => return Err(storage_unavailable("create", e)),
            }
        }

        error!(attempts, "could not allocate a unique generated code");
        Err(RegistryError::Exhausted { attempts })
    }
}

#[async_trait]
impl<S: LinkStore, G: Generator> Registry for RegistryService<S, G> {
    async fn create(&self, params: CreateLink) -> Result<Link> {
        let url = Self::validate_url(&params.url)?;

        let custom_code = params
            .code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty());

        match custom_code {
            Some(code) => {
                let code = Self::validate_custom_code(code)?;
                self.create_with_custom_code(code, &url).await
            }
            None => self.create_with_generated_code(&url).await,
        }
    }

    async fn resolve(&self, code: &str) -> Result<Link> {
        trace!(code, "resolving short code");

        if is_reserved_code(code) {
            trace!(code, "reserved code is never resolved");
            return Err(RegistryError::NotFound(code.trim().to_owned()));
        }
        let code = Self::lookup_code(code)?;

        match self
            .store
            .resolve_and_increment(&code)
            .await
            .map_err(|e| storage_unavailable("resolve", e))?
        {
            Some(link) => {
                debug!(code = %code, url = %link.target_url, clicks = link.total_clicks, "resolved short code");
                Ok(link)
            }
            None => {
                trace!(code = %code, "short code not found");
                Err(RegistryError::NotFound(code.to_string()))
            }
        }
    }

    async fn get(&self, code: &str) -> Result<Link> {
        let code = Self::lookup_code(code)?;

        self.store
            .get(&code)
            .await
            .map_err(|e| storage_unavailable("get", e))?
            .ok_or_else(|| RegistryError::NotFound(code.to_string()))
    }

    async fn delete(&self, code: &str) -> Result<()> {
        let code = Self::lookup_code(code)?;

        let deleted = self
            .store
            .delete(&code)
            .await
            .map_err(|e| storage_unavailable("delete", e))?;

        if deleted {
            debug!(code = %code, "deleted link");
            Ok(())
        } else {
            Err(RegistryError::NotFound(code.to_string()))
        }
    }

    async fn list(&self) -> Result<Vec<Link>> {
        self.store
            .list()
            .await
            .map_err(|e| storage_unavailable("list", e))
    }
}

/// Logs a backend failure and hides its detail from the caller.
fn storage_unavailable(operation: &'static str, e: StorageError) -> RegistryError {
    error!(operation, error = %e, "link store operation failed");
    RegistryError::StorageUnavailable
}
