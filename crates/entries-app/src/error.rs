use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Invalid entry: {0}")]
    ValidationError(#[from] garde::Report),

    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Database error: {0}")]
    DatabaseError(entries_dal::Error),
}

impl From<entries_dal::Error> for ApiError {
    fn from(value: entries_dal::Error) -> Self {
        match value {
            entries_dal::Error::ValidationError(report) => ApiError::ValidationError(report),
            other => ApiError::DatabaseError(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        ApiError::Rejected {
            status: value.status(),
            message: value.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        ApiError::Rejected {
            status: value.status(),
            message: value.body_text(),
        }
    }
}

/// JSON body of every error response
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::ValidationError(ref report) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Invalid entry: {}", report.to_string().trim_end()),
            ),
            ApiError::Rejected { status, message } => (status, message),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            ),
            ApiError::DatabaseError(e) => {
                error!("Storage failure: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
