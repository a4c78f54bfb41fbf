use async_trait::async_trait;

use super::model::*;

#[async_trait]
pub trait MoodRepo: Send + Sync {
    async fn list_moods(&self) -> DbResult<Vec<Mood>>;
    async fn get_mood(&self, id: i64) -> DbResult<Mood>;
    /// Inserts a mood, or updates genre ids and description when the name exists.
    async fn upsert_mood(&self, name: &str, genre_ids: &[i64], description: Option<&str>) -> DbResult<Mood>;
    async fn delete_mood(&self, id: i64) -> DbResult<()>;
}

#[async_trait]
pub trait MovieRepo: Send + Sync {
    async fn get_movie(&self, id: i64) -> DbResult<Movie>;
    /// Inserts or updates a movie keyed by its TMDb id.
    async fn upsert_movie(&self, movie: &NewMovie) -> DbResult<Movie>;
    async fn delete_movie(&self, id: i64) -> DbResult<()>;
}

#[async_trait]
pub trait RecommendationCacheRepo: Send + Sync {
    /// Links a movie to a mood. Linking twice is a no-op.
    async fn link_movie(&self, mood_id: i64, movie_id: i64) -> DbResult<()>;
    async fn cached_movies(&self, mood_id: i64) -> DbResult<Vec<Movie>>;
}

#[async_trait]
pub trait FeedbackRepo: Send + Sync {
    /// One vote per movie per session; a later vote replaces the earlier one.
    async fn upsert_feedback(&self, feedback: &UserFeedback) -> DbResult<()>;
    async fn get_feedback(&self, movie_id: i64, session_id: &str) -> DbResult<UserFeedback>;
    /// TMDb ids of movies this session marked `Bad`.
    async fn excluded_tmdb_ids(&self, session_id: &str) -> DbResult<Vec<i64>>;
}
