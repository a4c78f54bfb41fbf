use rand::seq::IndexedRandom;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::db::{
    DbError, FeedbackRepo, MoodRepo, Movie, MovieRepo, NewMovie, RecommendationCacheRepo,
    SqliteRepository,
};
use crate::tmdb::MovieSource;

#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("Mood not found")]
    MoodNotFound,
    #[error("No new movies found")]
    NoMovies,
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

/// Picks one movie for a mood, preferring the local cache and filling it
/// from the movie source when nothing usable is cached.
pub struct Recommender {
    db: Arc<SqliteRepository>,
    source: Arc<dyn MovieSource>,
    fetch_limit: usize,
}

impl Recommender {
    pub fn new(db: Arc<SqliteRepository>, source: Arc<dyn MovieSource>, fetch_limit: usize) -> Self {
        Self {
            db,
            source,
            fetch_limit,
        }
    }

    pub async fn recommend(
        &self,
        mood_id: i64,
        session_id: Option<&str>,
    ) -> Result<Movie, RecommendError> {
        let mood = self.db.get_mood(mood_id).await.map_err(|e| match e {
            DbError::NotFound(_) => RecommendError::MoodNotFound,
            e => RecommendError::Database(e),
        })?;

        let excluded: HashSet<i64> = match session_id {
            Some(session) => self.db.excluded_tmdb_ids(session).await?.into_iter().collect(),
            None => HashSet::new(),
        };

        let cached: Vec<Movie> = self
            .db
            .cached_movies(mood.id)
            .await?
            .into_iter()
            .filter(|m| !excluded.contains(&m.tmdb_movie_id))
            .collect();

        if let Some(movie) = pick(&cached) {
            debug!(mood = %mood.name, candidates = cached.len(), "recommending from cache");
            return Ok(movie);
        }

        info!(mood = %mood.name, "recommendation cache empty, querying movie source");
        let discovered = self.source.discover(&mood.tmdb_genre_ids).await;

        let mut fresh = Vec::new();
        for found in discovered.into_iter().take(self.fetch_limit) {
            let movie = self.db.upsert_movie(&NewMovie::from(found)).await?;
            self.db.link_movie(mood.id, movie.id).await?;
            if !excluded.contains(&movie.tmdb_movie_id) {
                fresh.push(movie);
            }
        }

        pick(&fresh).ok_or(RecommendError::NoMovies)
    }
}

fn pick(movies: &[Movie]) -> Option<Movie> {
    movies.choose(&mut rand::rng()).cloned()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::{FeedbackType, UserFeedback};
    use crate::tmdb::DiscoveredMovie;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed list and counts calls.
    pub(crate) struct StubSource {
        pub movies: Vec<DiscoveredMovie>,
        pub calls: AtomicUsize,
    }

    impl StubSource {
        pub(crate) fn new(ids: &[i64]) -> Self {
            Self {
                movies: ids
                    .iter()
                    .map(|&id| DiscoveredMovie {
                        id,
                        title: format!("Movie {}", id),
                        poster_path: Some(format!("/{}.jpg", id)),
                        vote_average: Some(6.5),
                        overview: Some(format!("Overview {}", id)),
                    })
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MovieSource for StubSource {
        async fn discover(&self, _genre_ids: &[i64]) -> Vec<DiscoveredMovie> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.movies.clone()
        }
    }

    async fn setup(ids: &[i64]) -> (Arc<SqliteRepository>, Arc<StubSource>, Recommender, i64) {
        let db = Arc::new(SqliteRepository::in_memory().await.unwrap());
        let mood = db.upsert_mood("Happy", &[35], None).await.unwrap();
        let source = Arc::new(StubSource::new(ids));
        let recommender = Recommender::new(db.clone(), source.clone(), 10);
        (db, source, recommender, mood.id)
    }

    async fn vote_bad(db: &SqliteRepository, tmdb_id: i64, session: &str) {
        let movie = db
            .upsert_movie(&NewMovie {
                tmdb_movie_id: tmdb_id,
                title: format!("Movie {}", tmdb_id),
                poster_path: None,
                rating: 0.0,
                summary: None,
            })
            .await
            .unwrap();
        db.upsert_feedback(&UserFeedback {
            movie_id: movie.id,
            session_id: session.to_string(),
            feedback_type: FeedbackType::Bad,
            created: None,
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_unknown_mood() {
        let (_db, _source, recommender, _) = setup(&[1]).await;
        let result = recommender.recommend(4242, None).await;
        assert!(matches!(result, Err(RecommendError::MoodNotFound)));
    }

    #[tokio::test]
    async fn test_fills_cache_then_uses_it() {
        let (db, source, recommender, mood_id) = setup(&[1, 2, 3]).await;

        let first = recommender.recommend(mood_id, None).await.unwrap();
        assert!([1, 2, 3].contains(&first.tmdb_movie_id));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(db.cached_movies(mood_id).await.unwrap().len(), 3);

        recommender.recommend(mood_id, None).await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_limit() {
        let ids: Vec<i64> = (1..=15).collect();
        let (db, _source, recommender, mood_id) = setup(&ids).await;

        recommender.recommend(mood_id, None).await.unwrap();
        assert_eq!(db.cached_movies(mood_id).await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_bad_feedback_excluded_for_session() {
        let (db, _source, recommender, mood_id) = setup(&[1, 2]).await;
        recommender.recommend(mood_id, None).await.unwrap();

        vote_bad(&db, 1, "alice").await;

        for _ in 0..20 {
            let movie = recommender.recommend(mood_id, Some("alice")).await.unwrap();
            assert_eq!(movie.tmdb_movie_id, 2);
        }

        let mut seen = HashSet::new();
        for _ in 0..200 {
            let movie = recommender.recommend(mood_id, Some("bob")).await.unwrap();
            seen.insert(movie.tmdb_movie_id);
        }
        assert_eq!(seen.len(), 2);
    }

    #[tokio::test]
    async fn test_all_excluded_refetches_then_gives_up() {
        let (db, source, recommender, mood_id) = setup(&[1]).await;
        recommender.recommend(mood_id, None).await.unwrap();
        vote_bad(&db, 1, "alice").await;

        let result = recommender.recommend(mood_id, Some("alice")).await;
        assert!(matches!(result, Err(RecommendError::NoMovies)));
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_source() {
        let (_db, _source, recommender, mood_id) = setup(&[]).await;
        let result = recommender.recommend(mood_id, None).await;
        assert!(matches!(result, Err(RecommendError::NoMovies)));
    }
}
