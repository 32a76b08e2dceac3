//! # Lodge Management API
//!
//! REST server for the lodge management system.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          API Server                                     │
//! │                                                                         │
//! │  Client ───► HTTP (5000) ───► Handlers ───► lodge-db ───► SQLite       │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │          JWT bearer auth                                                │
//! │      (every route except /health and /api/auth/login)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use lodge_db::{Database, DbConfig};

use crate::auth::JwtManager;
use crate::config::ApiConfig;

/// Shared state handed to every handler.
pub struct AppState {
    pub db: Database,
    pub jwt: JwtManager,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(db: Database, config: ApiConfig) -> Self {
        let jwt = JwtManager::new(config.jwt_secret.clone(), config.jwt_lifetime_secs);
        AppState { db, jwt, config }
    }
}

/// Create the Axum router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS wide open; the API serves browser frontends on other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", routes::api_router())
        .layer(middleware)
        .with_state(state)
}

/// Liveness probe. No auth, no database.
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "service": "lodge-api" }))
}

/// Run the server until shutdown.
pub async fn run(config: ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!(path = %config.database_path, "Database ready");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let state = Arc::new(AppState::new(db, config));
    let app = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::warn!(?e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::test_support::test_app;

    #[tokio::test]
    async fn health_needs_no_token() {
        let (app, _state) = test_app().await;
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn protected_route_without_token_is_401() {
        let (app, _state) = test_app().await;
        let response = app
            .oneshot(Request::builder().uri("/api/rooms").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_token_is_401() {
        let (app, _state) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/rooms")
                    .header("authorization", "Bearer not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
