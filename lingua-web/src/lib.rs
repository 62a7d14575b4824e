//! Lingua Web Server
//!
//! HTTP surface of the Lingua platform: authentication, role-gated
//! navigation resolution, and the table-oriented CRUD operations every
//! management screen consumes.

pub mod auth;
pub mod db;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;

// Re-export main types
pub use server::LinguaServer;
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Json, Response},
    Router,
};
use lingua_core::LinguaError;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    // Configure CORS for the local SPA dev server
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
        .allow_origin("http://127.0.0.1:3000".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_credentials(true)
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE]);

    Router::new()
        .nest("/api", routes::api_routes(&state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .with_state(state)
}

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Enable the auxiliary development route tree
    pub dev_mode: bool,
    /// Database URL
    pub database_url: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            dev_mode: false,
            database_url: "sqlite::memory:".to_string(),
        }
    }
}

impl WebConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("LINGUA_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("LINGUA_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            dev_mode: std::env::var("LINGUA_DEV_MODE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite::memory:".to_string()),
        }
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Error types for the web server
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    App(#[from] LinguaError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, error_code, body) = match &self {
            WebError::App(LinguaError::Validation(fields)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_failed",
                serde_json::json!({ "fields": fields }),
            ),
            WebError::App(LinguaError::Conflict { message }) => (
                StatusCode::CONFLICT,
                "conflict",
                serde_json::json!({ "message": message }),
            ),
            WebError::App(LinguaError::NotFound { entity }) => (
                StatusCode::NOT_FOUND,
                "not_found",
                serde_json::json!({ "message": format!("{} not found", entity) }),
            ),
            WebError::App(LinguaError::Authentication { message }) => (
                StatusCode::UNAUTHORIZED,
                "authentication_failed",
                serde_json::json!({ "message": message }),
            ),
            other => {
                tracing::error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    serde_json::json!({ "message": "The operation failed; please retry" }),
                )
            }
        };

        let mut payload = serde_json::json!({ "error": error_code });
        if let Some(map) = payload.as_object_mut() {
            if let Some(extra) = body.as_object() {
                for (k, v) in extra {
                    map.insert(k.clone(), v.clone());
                }
            }
        }

        (status, Json(payload)).into_response()
    }
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;

/// Initialize logging for the web server
pub fn init_logging() {
    let config = lingua_core::LoggingConfig::default();
    if let Err(e) = lingua_core::init_logging(&config) {
        eprintln!("Failed to initialize logging: {}", e);
    }
}
