pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod middleware;
pub mod recommend;
pub mod server;
pub mod tmdb;
pub mod wheel;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use db::MoodRepo;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] db::DbError),
    #[error("TMDb error: {0}")]
    Tmdb(#[from] tmdb::TmdbError),
    #[error("Server error: {0}")]
    Server(String),
}

/// Inserts or refreshes the configured moods.
pub async fn seed_moods(db: &db::SqliteRepository, moods: &[config::MoodConfig]) -> Result<(), ServerError> {
    for mood in moods {
        let stored = db
            .upsert_mood(&mood.name, &mood.genre_ids, mood.description.as_deref())
            .await?;
        info!("Mood {} ({}) genres {:?}", stored.name, stored.id, stored.tmdb_genre_ids);
    }
    Ok(())
}

pub async fn run(config_path: &str, debug_logs: bool) -> Result<(), ServerError> {
    let mut config = config::Config::from_file(config_path)?;
    config.debug_logs = debug_logs;

    info!("Using config file: {}", config_path);
    if debug_logs {
        info!("Debug logging enabled");
    }

    let db_path = config
        .get_database_path()
        .ok_or_else(|| ServerError::Server("No database path configured".to_string()))?;

    info!("Opening database at {}", db_path);
    let db = Arc::new(db::SqliteRepository::new(&db_path).await?);

    seed_moods(&db, &config.moods).await?;

    let source = Arc::new(tmdb::TmdbClient::new(&config.tmdb)?);
    let recommender = Arc::new(recommend::Recommender::new(
        db.clone(),
        source,
        config.tmdb.fetch_limit,
    ));

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let port = &config.listen.port;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let tls = match (&config.listen.tlscert, &config.listen.tlskey) {
        (Some(cert), Some(key)) => Some((cert.clone(), key.clone())),
        _ => None,
    };

    let state = server::AppState::new(db, recommender);
    let app = server::build_router(state);

    if let Some((cert_path, key_path)) = tls {
        info!("Loading TLS certificate from {}", cert_path);
        info!("Loading TLS key from {}", key_path);

        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(&cert_path, &key_path)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to load TLS config: {}", e)))?;

        info!("Serving HTTPS on {}", addr);

        axum_server::bind_rustls(addr, tls_config)
            .serve(app.into_make_service())
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    } else {
        info!("Serving HTTP on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    }

    Ok(())
}
