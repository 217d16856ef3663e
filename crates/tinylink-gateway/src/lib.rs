//! HTTP gateway for the tinylink registry.
//!
//! Exposes the registry's operations as a small JSON API under `/api/links`,
//! serves redirects at `/{code}` and reports liveness at `/healthz`.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use error::AppError;
pub use state::AppState;
