use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tinylink_core::RegistryError;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Registry(error) => match error {
                RegistryError::MissingField(_)
                | RegistryError::InvalidUrl(_)
                | RegistryError::InvalidCode(_) => StatusCode::BAD_REQUEST,
                RegistryError::CodeTaken(_) => StatusCode::CONFLICT,
                RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
                RegistryError::Exhausted { .. } | RegistryError::StorageUnavailable => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
