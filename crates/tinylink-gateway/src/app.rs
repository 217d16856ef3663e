use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, health_handler,
    list_links_handler, redirect_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    /// Builds the gateway router.
    ///
    /// Static routes win over `/{code}`, so `/healthz` is never looked up as
    /// a link; the remaining reserved codes are screened by the registry.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/healthz", get(health_handler))
            .route(
                "/api/links",
                get(list_links_handler).post(create_link_handler),
            )
            .route(
                "/api/links/{code}",
                get(get_link_handler).delete(delete_link_handler),
            )
            .route("/{code}", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
