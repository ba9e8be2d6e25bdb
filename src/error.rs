use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;
use tracing::error;

/// Failure while loading the locale directory. Any variant aborts the whole
/// load; a partially populated bundle is never returned.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("read locale directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read locale file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse locale file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("locale '{locale}' is defined by both {} and {}", .first.display(), .second.display())]
    DuplicateLocale {
        locale: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("default locale '{locale}' has no translation file")]
    MissingDefault { locale: String },
}

/// Errors surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("language not found")]
    LanguageNotFound,

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::LanguageNotFound => (StatusCode::NOT_FOUND, "language not found"),
            AppError::Internal(e) => {
                error!("Request failed: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
