//! Core types and traits for the tinylink registry.
//!
//! This crate holds the link model, the format rules for codes and URLs,
//! and the store and registry contracts shared by the storage backends,
//! the registry service and the HTTP gateway.

pub mod clock;
pub mod error;
pub mod link;
pub mod registry;
pub mod shortcode;
pub mod store;
pub mod validation;

pub use clock::{Clock, SystemClock};
pub use error::{RegistryError, StorageError};
pub use link::Link;
pub use registry::{CreateLink, Registry};
pub use shortcode::ShortCode;
pub use store::LinkStore;
pub use validation::{is_reserved_code, is_valid_code, is_valid_url, normalize_url};
