use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use types::errors::VoteError;

/// Central error type for the gateway application
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Vote(#[from] VoteError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "Unauthorized", msg.clone())
            }
            AppError::Vote(err) => {
                // Duplicate votes are expected and frequent; everything here
                // is a rejection of this request only, never a server fault.
                let status = match err {
                    VoteError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                    VoteError::DuplicateVote => StatusCode::FORBIDDEN,
                    VoteError::ProgramNotFound(_) => StatusCode::NOT_FOUND,
                    VoteError::NoVoteFound => StatusCode::NOT_FOUND,
                };
                (status, err.code(), err.to_string())
            }
            AppError::Internal(err) => {
                tracing::error!(%err, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalError",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": code,
            "message": message
        }));

        (status, body).into_response()
    }
}
