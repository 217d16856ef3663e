use crate::error::Result;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Counts a click and answers with `302 Found` pointing at the target URL.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response> {
    let link = state.registry().resolve(&code).await?;
    Ok((StatusCode::FOUND, [(header::LOCATION, link.target_url)]).into_response())
}
