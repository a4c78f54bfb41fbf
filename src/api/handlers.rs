use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use super::error::ApiError;
use super::session::{resolve_session, session_cookie, session_from_cookies};
use super::types::*;
use crate::db::{FeedbackRepo, Mood, MoodRepo, MovieRepo, UserFeedback};
use crate::server::AppState;

pub async fn list_moods(State(state): State<AppState>) -> Result<Json<Vec<Mood>>, ApiError> {
    let moods = state.db.list_moods().await?;
    Ok(Json(moods))
}

pub async fn get_mood(
    State(state): State<AppState>,
    Path(mood_id): Path<i64>,
) -> Result<Json<Mood>, ApiError> {
    let mood = state.db.get_mood(mood_id).await?;
    Ok(Json(mood))
}

pub async fn recommend(
    State(state): State<AppState>,
    Query(query): Query<RecommendQuery>,
    headers: HeaderMap,
) -> Result<Json<MovieDto>, ApiError> {
    let mood_id = query
        .mood_id
        .as_deref()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .ok_or(ApiError::MissingMoodId)?;

    let session_id = query
        .session_id
        .filter(|s| !s.is_empty())
        .or_else(|| session_from_cookies(&headers));

    let movie = state
        .recommender
        .recommend(mood_id, session_id.as_deref())
        .await?;

    info!(mood_id, movie = %movie.title, "recommendation");
    Ok(Json(MovieDto::from(movie)))
}

pub async fn submit_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<FeedbackRequest>,
) -> Result<Response, ApiError> {
    let movie = state.db.get_movie(req.movie_id).await?;

    let (session_id, is_new) = resolve_session(req.session_id.as_deref(), &headers);

    state
        .db
        .upsert_feedback(&UserFeedback {
            movie_id: movie.id,
            session_id: session_id.clone(),
            feedback_type: req.status,
            created: None,
        })
        .await?;

    info!(movie = %movie.title, status = %req.status, session = %session_id, "feedback");

    let body = FeedbackResponse {
        movie_id: movie.id,
        status: req.status,
        session_id: session_id.clone(),
    };

    let mut response = (StatusCode::CREATED, Json(body)).into_response();
    if is_new {
        if let Some(cookie) = session_cookie(&session_id) {
            response.headers_mut().insert(header::SET_COOKIE, cookie);
        }
    }
    Ok(response)
}
