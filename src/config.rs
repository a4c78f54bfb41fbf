use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub dbdir: Option<String>,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub moods: Vec<MoodConfig>,
    #[serde(skip)]
    pub debug_logs: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub sqlite: Option<SqliteConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    #[serde(alias = "apikey", default)]
    pub api_key: Option<String>,
    #[serde(default = "default_tmdb_url")]
    pub base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// How many discover results are cached per refill.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_tmdb_url(),
            language: default_language(),
            timeout_secs: default_timeout(),
            fetch_limit: default_fetch_limit(),
        }
    }
}

/// A mood seeded into the catalog at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoodConfig {
    pub name: String,
    #[serde(alias = "genres", default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_port() -> String {
    "8000".to_string()
}

fn default_tmdb_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_timeout() -> u64 {
    5
}

fn default_fetch_limit() -> usize {
    10
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        let mut config = Self::from_yaml(&content)
            .map_err(|e| ConfigError::ParseError(path.to_string(), e))?;

        if let Ok(key) = std::env::var("TMDB_API_KEY") {
            if !key.is_empty() {
                config.tmdb.api_key = Some(key);
            }
        }

        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn get_database_path(&self) -> Option<String> {
        if let Some(ref sqlite) = self.database.sqlite {
            return Some(sqlite.filename.clone());
        }

        if let Some(ref dbdir) = self.dbdir {
            let path = PathBuf::from(dbdir).join("moodmovie.db");
            return Some(path.to_string_lossy().to_string());
        }

        None
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.listen.port, "8000");
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb.language, "en-US");
        assert_eq!(config.tmdb.timeout_secs, 5);
        assert_eq!(config.tmdb.fetch_limit, 10);
        assert!(config.moods.is_empty());
        assert_eq!(config.get_database_path(), None);
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
listen:
  address: 127.0.0.1
  port: "9000"
database:
  sqlite:
    filename: /tmp/mm.db
tmdb:
  apikey: secret
  fetch_limit: 5
moods:
  - name: Happy
    genre_ids: [35, 10751]
    description: Light and fun
  - name: Scared
    genres: [27]
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.listen.address.as_deref(), Some("127.0.0.1"));
        assert_eq!(config.listen.port, "9000");
        assert_eq!(config.tmdb.api_key.as_deref(), Some("secret"));
        assert_eq!(config.tmdb.fetch_limit, 5);
        assert_eq!(config.moods.len(), 2);
        assert_eq!(config.moods[0].genre_ids, vec![35, 10751]);
        assert_eq!(config.moods[1].genre_ids, vec![27]);
        assert_eq!(config.moods[1].description, None);
        assert_eq!(config.get_database_path().as_deref(), Some("/tmp/mm.db"));
    }

    #[test]
    fn test_api_key_spellings() {
        let config = Config::from_yaml("tmdb:\n  api_key: k1\n").unwrap();
        assert_eq!(config.tmdb.api_key.as_deref(), Some("k1"));
        let config = Config::from_yaml("tmdb:\n  apikey: k2\n").unwrap();
        assert_eq!(config.tmdb.api_key.as_deref(), Some("k2"));
    }

    #[test]
    fn test_dbdir_path() {
        let config = Config::from_yaml("dbdir: /var/lib/moodmovie").unwrap();
        assert_eq!(
            config.get_database_path().as_deref(),
            Some("/var/lib/moodmovie/moodmovie.db")
        );
    }
}
