use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Unknown index: {name}")]
    UnknownIndex { name: String },

    #[error("Invalid mapping: {cause}")]
    InvalidMapping { cause: String },

    #[error("Connection failed to {url}: {cause}")]
    ConnectionFailed { url: String, cause: String },

    #[error("Existence check failed for index {index}: {cause}")]
    IndexCheckFailed { index: String, cause: String },

    #[error("Index creation failed for {index} (status {status}): {cause}")]
    IndexCreateFailed {
        index: String,
        status: u16,
        cause: String,
    },

    #[error("Mapping fetch failed for index {index}: {cause}")]
    MappingFetchFailed { index: String, cause: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl IntoResponse for ProvisionError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            ProvisionError::UnknownIndex { name } => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "unknown_index".to_string(),
                    message: format!("Index '{}' is not part of the schema registry", name),
                    index: Some(name.clone()),
                    cause: None,
                },
            ),
            ProvisionError::InvalidMapping { cause } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "invalid_mapping".to_string(),
                    message: "Mapping does not match the field type vocabulary".to_string(),
                    index: None,
                    cause: Some(cause.clone()),
                },
            ),
            ProvisionError::ConnectionFailed { url, cause } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse {
                    error: "connection_failed".to_string(),
                    message: format!("Failed to reach OpenSearch at '{}'", url),
                    index: None,
                    cause: Some(cause.clone()),
                },
            ),
            ProvisionError::IndexCheckFailed { index, cause } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse {
                    error: "index_check_failed".to_string(),
                    message: format!("Failed to check whether index '{}' exists", index),
                    index: Some(index.clone()),
                    cause: Some(cause.clone()),
                },
            ),
            ProvisionError::IndexCreateFailed { index, status, cause } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse {
                    error: "index_create_failed".to_string(),
                    message: format!("Failed to create index '{}' (status {})", index, status),
                    index: Some(index.clone()),
                    cause: Some(cause.clone()),
                },
            ),
            ProvisionError::MappingFetchFailed { index, cause } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse {
                    error: "mapping_fetch_failed".to_string(),
                    message: format!("Failed to read mapping of index '{}'", index),
                    index: Some(index.clone()),
                    cause: Some(cause.clone()),
                },
            ),
            ProvisionError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "internal_error".to_string(),
                    message: msg.clone(),
                    index: None,
                    cause: None,
                },
            ),
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<reqwest::Error> for ProvisionError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        ProvisionError::ConnectionFailed {
            url,
            cause: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ProvisionError {
    fn from(err: serde_json::Error) -> Self {
        ProvisionError::InvalidMapping {
            cause: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ProvisionError {
    fn from(err: std::io::Error) -> Self {
        ProvisionError::Internal(format!("IO error: {}", err))
    }
}

impl From<anyhow::Error> for ProvisionError {
    fn from(err: anyhow::Error) -> Self {
        ProvisionError::Internal(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
