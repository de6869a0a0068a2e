use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::config::Config;
use crate::handlers;

/// Create file server routes
pub fn file_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/api/health", get(handlers::health))
        // Debug view of the root's folders
        .route("/api/debug/structure", get(handlers::debug_structure))
        // File operations
        .route("/api/files/{*path}", get(handlers::get_file))
        .route("/api/download/{*path}", get(handlers::download_file))
}

/// CORS restricted to the configured front-end origin.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let layer = match config.allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => {
            tracing::info!("CORS: Allowing origin {}", config.allowed_origin);
            CorsLayer::new().allow_origin(origin)
        }
        Err(_) => {
            tracing::error!(
                "CORS: Invalid origin in config: {}, denying all cross-origin requests",
                config.allowed_origin
            );
            CorsLayer::new().allow_origin(AllowOrigin::exact(HeaderValue::from_static("null")))
        }
    };

    layer
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::RANGE])
        .expose_headers([header::CONTENT_DISPOSITION, header::CONTENT_LENGTH])
        .allow_credentials(config.allow_credentials)
}

/// Build the complete application router.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .merge(file_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
