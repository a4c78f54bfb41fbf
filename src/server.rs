use axum::{extract::Request, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::db::SqliteRepository;
use crate::recommend::Recommender;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<SqliteRepository>,
    pub recommender: Arc<Recommender>,
}

impl AppState {
    pub fn new(db: Arc<SqliteRepository>, recommender: Arc<Recommender>) -> Self {
        Self { db, recommender }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/robots.txt", get(robots_txt_handler))
        .merge(crate::api::build_api_router())
        .fallback(fallback_handler)
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn robots_txt_handler() -> &'static str {
    "User-agent: *\nDisallow: /\n"
}

async fn fallback_handler(req: Request<axum::body::Body>) -> impl IntoResponse {
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}
