use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::types::{ErrorBody, MessageBody};
use crate::db::DbError;
use crate::recommend::RecommendError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("mood_id is required")]
    MissingMoodId,
    #[error("{0}")]
    NotFound(String),
    #[error("No new movies found")]
    NoMovies,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(what) => ApiError::NotFound(what),
            e => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<RecommendError> for ApiError {
    fn from(e: RecommendError) -> Self {
        match e {
            RecommendError::MoodNotFound => ApiError::NotFound("Mood not found".to_string()),
            RecommendError::NoMovies => ApiError::NoMovies,
            RecommendError::Database(e) => e.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingMoodId => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error: self.to_string() })).into_response()
            }
            ApiError::NotFound(_) => {
                (StatusCode::NOT_FOUND, Json(ErrorBody { error: self.to_string() })).into_response()
            }
            ApiError::NoMovies => {
                (StatusCode::NOT_FOUND, Json(MessageBody { message: self.to_string() })).into_response()
            }
            ApiError::Internal(ref msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody { error: "Internal server error".to_string() }),
                )
                    .into_response()
            }
        }
    }
}
