use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Band {name} not found in dataset")]
    BandNotFound { name: String },

    #[error("No matching records")]
    NoMatchingRecords,

    #[error("Band {name} already exists in dataset")]
    AlreadyExists { name: String },

    #[error("Band {name} not modified")]
    NotModified { name: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("Store error: {cause}")]
    Store { cause: String },
}

/// Error body shape: a single human-readable message, no internals.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogError::BandNotFound { .. } | CatalogError::NoMatchingRecords => {
                StatusCode::NOT_FOUND
            }
            CatalogError::AlreadyExists { .. } | CatalogError::NotModified { .. } => {
                StatusCode::NOT_MODIFIED
            }
            CatalogError::Validation { .. } => StatusCode::BAD_REQUEST,
            CatalogError::Store { .. } => StatusCode::BAD_GATEWAY,
        };

        let body = ErrorResponse {
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<tokio_postgres::Error> for CatalogError {
    fn from(err: tokio_postgres::Error) -> Self {
        CatalogError::Store {
            cause: err.to_string(),
        }
    }
}

impl From<deadpool_postgres::PoolError> for CatalogError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        CatalogError::Store {
            cause: format!("Pool error: {}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
