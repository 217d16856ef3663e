//! Link registry service.
//!
//! [`RegistryService`] ties the code format rules, a code [`Generator`] and a
//! [`LinkStore`] together into the create / resolve / get / delete / list
//! operations. Core types are re-exported from `tinylink_core`.
//!
//! [`Generator`]: tinylink_generator::Generator
//! [`LinkStore`]: tinylink_core::LinkStore

pub mod service;
pub mod settings;

pub use service::RegistryService;
pub use settings::RegistrySettings;
pub use tinylink_core::{CreateLink, Link, Registry, RegistryError};
