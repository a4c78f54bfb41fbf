use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use super::model::*;
use super::repo::*;

type MoodRow = (i64, String, String, Option<String>);
type FeedbackRow = (i64, String, String, Option<String>);

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(db_path: &str) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.init_schema().await?;

        info!("Database initialized at {}", db_path);

        Ok(repo)
    }

    /// A private in-memory database. Uses a single long-lived connection,
    /// since every SQLite connection to `:memory:` is its own database.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.init_schema().await?;
        Ok(repo)
    }

    async fn init_schema(&self) -> DbResult<()> {
        let schema = include_str!("schema.sql");
        sqlx::raw_sql(schema).execute(&self.pool).await?;
        Ok(())
    }
}

fn mood_from_row(row: MoodRow) -> DbResult<Mood> {
    let tmdb_genre_ids: Vec<i64> = serde_json::from_str(&row.2)
        .map_err(|e| DbError::Invalid(format!("genre ids of mood {}: {}", row.0, e)))?;
    Ok(Mood {
        id: row.0,
        name: row.1,
        tmdb_genre_ids,
        description: row.3,
    })
}

fn not_found(what: String) -> impl FnOnce(sqlx::Error) -> DbError {
    move |e| match e {
        sqlx::Error::RowNotFound => DbError::NotFound(what),
        _ => DbError::Sqlx(e),
    }
}

#[async_trait]
impl MoodRepo for SqliteRepository {
    async fn list_moods(&self) -> DbResult<Vec<Mood>> {
        let rows = sqlx::query_as::<_, MoodRow>(
            "SELECT id, name, tmdb_genre_ids, description FROM moods ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(mood_from_row).collect()
    }

    async fn get_mood(&self, id: i64) -> DbResult<Mood> {
        let row = sqlx::query_as::<_, MoodRow>(
            "SELECT id, name, tmdb_genre_ids, description FROM moods WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(not_found(format!("Mood not found: {}", id)))?;

        mood_from_row(row)
    }

    async fn upsert_mood(&self, name: &str, genre_ids: &[i64], description: Option<&str>) -> DbResult<Mood> {
        let genres = serde_json::to_string(genre_ids)
            .map_err(|e| DbError::Invalid(e.to_string()))?;

        let row = sqlx::query_as::<_, MoodRow>(
            "INSERT INTO moods (name, tmdb_genre_ids, description) VALUES (?, ?, ?)
             ON CONFLICT(name) DO UPDATE SET
                tmdb_genre_ids = excluded.tmdb_genre_ids,
                description = excluded.description
             RETURNING id, name, tmdb_genre_ids, description",
        )
        .bind(name)
        .bind(&genres)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        mood_from_row(row)
    }

    async fn delete_mood(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM moods WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("Mood not found: {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl MovieRepo for SqliteRepository {
    async fn get_movie(&self, id: i64) -> DbResult<Movie> {
        sqlx::query_as::<_, Movie>(
            "SELECT id, tmdb_movie_id, title, poster_path, rating, summary FROM movies WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(not_found(format!("Movie not found: {}", id)))
    }

    async fn upsert_movie(&self, movie: &NewMovie) -> DbResult<Movie> {
        let movie = sqlx::query_as::<_, Movie>(
            "INSERT INTO movies (tmdb_movie_id, title, poster_path, rating, summary) VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(tmdb_movie_id) DO UPDATE SET
                title = excluded.title,
                poster_path = excluded.poster_path,
                rating = excluded.rating,
                summary = excluded.summary
             RETURNING id, tmdb_movie_id, title, poster_path, rating, summary",
        )
        .bind(movie.tmdb_movie_id)
        .bind(&movie.title)
        .bind(&movie.poster_path)
        .bind(round_rating(movie.rating))
        .bind(&movie.summary)
        .fetch_one(&self.pool)
        .await?;

        debug!(tmdb_id = movie.tmdb_movie_id, title = %movie.title, "movie upserted");
        Ok(movie)
    }

    async fn delete_movie(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("Movie not found: {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl RecommendationCacheRepo for SqliteRepository {
    async fn link_movie(&self, mood_id: i64, movie_id: i64) -> DbResult<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO recommendation_cache (mood_id, movie_id, created) VALUES (?, ?, ?)",
        )
        .bind(mood_id)
        .bind(movie_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn cached_movies(&self, mood_id: i64) -> DbResult<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(
            "SELECT m.id, m.tmdb_movie_id, m.title, m.poster_path, m.rating, m.summary
             FROM movies m
             JOIN recommendation_cache rc ON rc.movie_id = m.id
             WHERE rc.mood_id = ?
             ORDER BY rc.created DESC, rc.id DESC",
        )
        .bind(mood_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(movies)
    }
}

#[async_trait]
impl FeedbackRepo for SqliteRepository {
    async fn upsert_feedback(&self, feedback: &UserFeedback) -> DbResult<()> {
        let created = feedback.created.unwrap_or_else(Utc::now);
        sqlx::query(
            "INSERT INTO user_feedback (movie_id, session_id, feedback_type, created) VALUES (?, ?, ?, ?)
             ON CONFLICT(movie_id, session_id) DO UPDATE SET
                feedback_type = excluded.feedback_type,
                created = excluded.created",
        )
        .bind(feedback.movie_id)
        .bind(&feedback.session_id)
        .bind(feedback.feedback_type.as_str())
        .bind(created.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_feedback(&self, movie_id: i64, session_id: &str) -> DbResult<UserFeedback> {
        let row = sqlx::query_as::<_, FeedbackRow>(
            "SELECT movie_id, session_id, feedback_type, created
             FROM user_feedback WHERE movie_id = ? AND session_id = ?",
        )
        .bind(movie_id)
        .bind(session_id)
        .fetch_one(&self.pool)
        .await
        .map_err(not_found(format!("Feedback not found: {}/{}", movie_id, session_id)))?;

        let feedback_type = row.2.parse::<FeedbackType>().map_err(DbError::Invalid)?;

        Ok(UserFeedback {
            movie_id: row.0,
            session_id: row.1,
            feedback_type,
            created: row.3.and_then(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            }),
        })
    }

    async fn excluded_tmdb_ids(&self, session_id: &str) -> DbResult<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT m.tmdb_movie_id FROM user_feedback uf
             JOIN movies m ON m.id = uf.movie_id
             WHERE uf.session_id = ? AND uf.feedback_type = 'Bad'",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }
}
