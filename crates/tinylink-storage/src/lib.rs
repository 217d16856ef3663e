//! Link store backends.

pub mod memory;
pub mod mysql;

pub use memory::InMemoryStore;
pub use mysql::MySqlStore;
pub use tinylink_core::store::{LinkStore, Result};
pub use tinylink_core::StorageError;
