use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{FeedbackRequest, FeedbackResponse, MovieDto};
use crate::db::FeedbackType;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/";

/// A mood as the front end sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mood {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },
}

/// Talks to the recommendation API. Keeps cookies so feedback and later
/// recommendations share one session.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn list_moods(&self) -> Result<Vec<Mood>, ClientError> {
        let response = self.client.get(self.endpoint("moods/")).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn recommend(&self, mood_id: i64) -> Result<MovieDto, ClientError> {
        debug!(mood_id, "requesting recommendation");
        let response = self
            .client
            .get(self.endpoint("recommend/"))
            .query(&[("mood_id", mood_id)])
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn send_feedback(
        &self,
        movie_id: i64,
        status: FeedbackType,
    ) -> Result<FeedbackResponse, ClientError> {
        let body = FeedbackRequest {
            movie_id,
            status,
            session_id: None,
        };
        let response = self
            .client
            .post(self.endpoint("feedback/"))
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or(text);

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let client = ApiClient::new("http://example.com/api").unwrap();
        assert_eq!(normalize_base_url("http://example.com/api"), "http://example.com/api/");
        assert_eq!(normalize_base_url(" http://example.com/api/ "), "http://example.com/api/");
        assert_eq!(client.endpoint("moods/"), "http://example.com/api/moods/");
        assert_eq!(client.endpoint("/feedback/"), "http://example.com/api/feedback/");
    }

    #[test]
    fn test_mood_ignores_extra_fields() {
        let mood: Mood = serde_json::from_str(
            r#"{"id": 1, "name": "Happy", "tmdb_genre_ids": [35], "description": null}"#,
        )
        .unwrap();
        assert_eq!(mood.name, "Happy");
        assert_eq!(mood.description, None);
    }

    #[test]
    fn test_movie_accepts_model_field_names() {
        let movie: MovieDto = serde_json::from_str(
            r#"{"id": 4, "tmdb_movie_id": 550, "title": "Fight Club", "summary": "Rules.", "rating": 8.4}"#,
        )
        .unwrap();
        assert_eq!(movie.overview.as_deref(), Some("Rules."));
        assert_eq!(movie.vote_average, 8.4);
        assert_eq!(movie.poster_path, None);
    }
}
