use anyhow::Context;
use subject_store_api::config::AppConfig;
use subject_store_api::store::SubjectStore;
use subject_store_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, CORS_ORIGINS, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    // A store that cannot be opened is unrecoverable at startup.
    let store = SubjectStore::connect(&config.database_url)
        .await
        .with_context(|| format!("failed to open subject store at {}", config.database_url))?;

    let router = app(AppState { store }, &config.cors_origins);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("subject store gateway listening on http://{}", bind_addr);

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
