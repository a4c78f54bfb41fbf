use serde::{Deserialize, Serialize};

use crate::db::{FeedbackType, Movie};

/// A recommendation as sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDto {
    pub id: i64,
    #[serde(default)]
    pub tmdb_movie_id: Option<i64>,
    pub title: String,
    #[serde(alias = "summary", default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(alias = "rating", default)]
    pub vote_average: f64,
}

impl From<Movie> for MovieDto {
    fn from(m: Movie) -> Self {
        MovieDto {
            id: m.id,
            tmdb_movie_id: Some(m.tmdb_movie_id),
            title: m.title,
            overview: m.summary,
            poster_path: m.poster_path,
            vote_average: m.rating,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendQuery {
    #[serde(default)]
    pub mood_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub movie_id: i64,
    #[serde(alias = "feedback_type")]
    pub status: FeedbackType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub movie_id: i64,
    pub status: FeedbackType,
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}
