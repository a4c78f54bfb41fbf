pub mod error;
pub mod handlers;
pub mod session;
pub mod types;

pub use error::ApiError;
pub use handlers::*;
pub use types::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::server::AppState;

/// Routes under `/api`. Every path also answers with a trailing slash.
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .route("/api/moods", get(list_moods))
        .route("/api/moods/", get(list_moods))
        .route("/api/moods/:id", get(get_mood))
        .route("/api/moods/:id/", get(get_mood))
        .route("/api/recommend", get(recommend))
        .route("/api/recommend/", get(recommend))
        .route("/api/feedback", post(submit_feedback))
        .route("/api/feedback/", post(submit_feedback))
}
