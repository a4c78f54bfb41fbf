use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mood {
    pub id: i64,
    pub name: String,
    pub tmdb_genre_ids: Vec<i64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Movie {
    pub id: i64,
    pub tmdb_movie_id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub rating: f64,
    pub summary: Option<String>,
}

/// Movie data as received from the movie source, before it has a row id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub tmdb_movie_id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub rating: f64,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackType {
    Good,
    Bad,
    Meh,
}

impl FeedbackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackType::Good => "Good",
            FeedbackType::Bad => "Bad",
            FeedbackType::Meh => "Meh",
        }
    }
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "good" => Ok(FeedbackType::Good),
            "bad" => Ok(FeedbackType::Bad),
            "meh" => Ok(FeedbackType::Meh),
            _ => Err(format!("unknown feedback type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFeedback {
    pub movie_id: i64,
    pub session_id: String,
    pub feedback_type: FeedbackType,
    pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    Invalid(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Rounds a rating to the single decimal place it is stored with.
pub fn round_rating(rating: f64) -> f64 {
    if !rating.is_finite() {
        return 0.0;
    }
    (rating * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_type_parse() {
        assert_eq!("Good".parse::<FeedbackType>(), Ok(FeedbackType::Good));
        assert_eq!("bad".parse::<FeedbackType>(), Ok(FeedbackType::Bad));
        assert_eq!("MEH".parse::<FeedbackType>(), Ok(FeedbackType::Meh));
        assert!("great".parse::<FeedbackType>().is_err());
    }

    #[test]
    fn test_feedback_type_json() {
        let json = serde_json::to_string(&FeedbackType::Bad).unwrap();
        assert_eq!(json, "\"Bad\"");
        assert!(serde_json::from_str::<FeedbackType>("\"Awful\"").is_err());
    }

    #[test]
    fn test_round_rating() {
        assert_eq!(round_rating(7.26), 7.3);
        assert_eq!(round_rating(0.0), 0.0);
        assert_eq!(round_rating(f64::NAN), 0.0);
    }
}
