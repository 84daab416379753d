use std::env;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite://subjects.db?mode=rwc";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    /// Build configuration from the environment. `main` loads `.env` first,
    /// so a local fallback file can supply any of these.
    pub fn from_env() -> Self {
        let port = env::var("SUBJECT_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_else(|_| default_origins());

        Self { port, database_url, cors_origins }
    }
}

/// Comma-separated origin allow-list; `*` selects any-origin.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn default_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()]
}
