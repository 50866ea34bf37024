use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::debug;

/// Errors rendered to HTTP clients.
///
/// `Validation` becomes 422 with a `detail` list, `NotFound` becomes 404 with
/// a fixed `detail` string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("validation failed at {}: {msg}", .loc.join("."))]
    Validation {
        loc: Vec<String>,
        msg: String,
        kind: &'static str,
    },
    #[error("Message not found")]
    NotFound,
}

impl ApiError {
    pub fn validation(loc: &[&str], msg: impl Into<String>, kind: &'static str) -> Self {
        Self::Validation {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            kind,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => Self::NotFound,
            ServiceError::Validation(msg) => Self::validation(&["body", "message"], msg, "value_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        debug!(%status, error = %self, "request rejected");
        let body = match self {
            Self::Validation { loc, msg, kind } => {
                json!({"detail": [{"loc": loc, "msg": msg, "type": kind}]})
            }
            Self::NotFound => json!({"detail": "Message not found"}),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}
