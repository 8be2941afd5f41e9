//! Axum router configuration with middleware.
//!
//! Envelope routes are under `/api/v1/`; `/health` sits at the root. The
//! unversioned `/api/{health,session,chat,reset}` routes serve the web client.
//! Middleware: CORS (origins from `[server] cors_origins`) and request tracing.

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    let api_routes = Router::new()
        .route("/sessions", post(handlers::session::create_session))
        .route(
            "/sessions/{id}/messages",
            get(handlers::session::get_messages),
        )
        .route(
            "/sessions/{id}/reset",
            post(handlers::session::reset_session),
        )
        .route("/chat", post(handlers::chat::chat));

    let legacy_routes = Router::new()
        .route("/health", get(handlers::legacy::health))
        .route("/session", post(handlers::legacy::create_session))
        .route("/chat", post(handlers::legacy::chat))
        .route("/reset", post(handlers::legacy::reset));

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/api", legacy_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS layer for the configured origins; `"*"` (or nothing valid) allows any.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        base.allow_origin(Any)
    } else {
        base.allow_origin(AllowOrigin::list(parsed))
    }
}

/// GET /health - Simple liveness check.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
