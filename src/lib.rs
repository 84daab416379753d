pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod store;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use store::SubjectStore;

#[derive(Clone)]
pub struct AppState {
    pub store: SubjectStore,
}

pub fn app(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/subjects",
            get(handlers::subjects::list).post(handlers::subjects::create),
        )
        .route(
            "/api/subjects/:id",
            get(handlers::subjects::show)
                .put(handlers::subjects::rename)
                .delete(handlers::subjects::remove),
        )
        .route("/api/subjects/:id/files", post(handlers::files::create))
        .route(
            "/api/subjects/:id/files/:file_id",
            delete(handlers::files::remove),
        )
        // Global middleware
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Allow-list CORS; a literal `*` in the list opens the API to any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring unparsable CORS origin: {}", origin);
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(allowed))
}
