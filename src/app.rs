use std::sync::Arc;

use axum::{
    handler::Handler,
    http::{header, HeaderValue, Method},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config;
use crate::database::Store;
use crate::handlers::{self, method_not_allowed_get, method_not_allowed_post};
use crate::middleware::{caller_middleware, require_admin};

/// Shared application state. The store is the only cross-request resource;
/// everything else comes from the config singleton.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

/// Build the full application router.
///
/// Gates are applied per handler rather than per route so that a request
/// with the wrong verb is answered 405 by the MethodRouter fallback before
/// any authentication runs (method check precedes the gate).
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root).fallback(method_not_allowed_get))
        .route("/health", get(health).fallback(method_not_allowed_get))
        // Public routes
        .route(
            "/auth/login",
            post(handlers::auth::login).fallback(method_not_allowed_post),
        )
        .route(
            "/auth/logout",
            post(handlers::auth::logout).fallback(method_not_allowed_post),
        )
        .route(
            "/announcements/active",
            get(handlers::announcements::active).fallback(method_not_allowed_get),
        )
        // Authenticated routes
        .route(
            "/api/auth/whoami",
            get(handlers::auth::whoami.layer(from_fn(caller_middleware)))
                .fallback(method_not_allowed_get),
        )
        // Admin routes
        .route(
            "/api/admin/unlock-account",
            post(
                handlers::admin::unlock_account
                    .layer(from_fn(require_admin))
                    .layer(from_fn(caller_middleware)),
            )
            .fallback(method_not_allowed_post),
        )
        .route(
            "/api/users/admins",
            get(
                handlers::admin::list_admins
                    .layer(from_fn(require_admin))
                    .layer(from_fn(caller_middleware)),
            )
            .fallback(method_not_allowed_get),
        )
        // Global middleware
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = config::config()
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Storefront API",
            "version": version,
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "login": "POST /auth/login (public)",
                "logout": "POST /auth/logout (public)",
                "announcement": "GET /announcements/active (public)",
                "whoami": "GET /api/auth/whoami (authenticated)",
                "unlock": "POST /api/admin/unlock-account (admin)",
                "admins": "GET /api/users/admins (admin)",
            }
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "SERVICE_UNAVAILABLE",
                "message": format!("database unavailable: {}", e),
            })),
        ),
    }
}
