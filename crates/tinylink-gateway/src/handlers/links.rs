use crate::error::{AppError, Result};
use crate::model::{CreateLinkRequest, DeleteLinkResponse, LinkResponse, ListLinksResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>)> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(error = %rejection, "rejected create request body");
        AppError::BadRequest("invalid JSON body".to_string())
    })?;

    let link = state.registry().create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(link.into())))
}

pub async fn list_links_handler(State(state): State<AppState>) -> Result<Json<ListLinksResponse>> {
    let links = state.registry().list().await?;
    Ok(Json(ListLinksResponse {
        links: links.into_iter().map(LinkResponse::from).collect(),
    }))
}

pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkResponse>> {
    let link = state.registry().get(&code).await?;
    Ok(Json(link.into()))
}

pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<DeleteLinkResponse>> {
    state.registry().delete(&code).await?;
    Ok(Json(DeleteLinkResponse { ok: true }))
}
