//! Authentication handlers for user registration, login, and token management

use super::{
    jwt::AuthError,
    users::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest},
    CurrentUser,
};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::Json, Json as JsonExtractor};
use serde_json::{json, Value};
use tracing::info;

/// User registration endpoint
///
/// Register a new student account with username, email, and password.
/// Returns user information and JWT tokens on success.
pub async fn register_user(
    State(app_state): State<AppState>,
    JsonExtractor(request): JsonExtractor<RegisterRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    info!("User registration attempt: {}", request.username);

    let response = app_state.user_service.register(request).await?;

    info!("User registered successfully: {}", response.user.username);
    Ok(Json(response))
}

/// User login endpoint
///
/// Authenticate user with username and password.
/// Returns user information and JWT tokens on success.
pub async fn login_user(
    State(app_state): State<AppState>,
    JsonExtractor(request): JsonExtractor<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    info!("User login attempt: {}", request.username);

    let response = app_state.user_service.login(request).await?;

    info!("User logged in successfully: {}", response.user.username);
    Ok(Json(response))
}

/// Token refresh endpoint
///
/// Refresh access token using a valid refresh token.
/// Returns new token pair on success.
pub async fn refresh_token(
    State(app_state): State<AppState>,
    JsonExtractor(request): JsonExtractor<RefreshRequest>,
) -> Result<Json<Value>, AuthError> {
    info!("Token refresh attempt");

    let tokens = app_state.user_service.refresh_token(request).await?;

    info!("Token refreshed successfully");
    Ok(Json(json!(tokens)))
}

/// Get current session information
///
/// Returns the identity snapshot of the authenticated session.
pub async fn get_current_user(CurrentUser(session): CurrentUser) -> Result<Json<Value>, StatusCode> {
    Ok(Json(json!({
        "user_id": session.user_id,
        "display_name": session.display_name,
        "role": session.role,
        "email": session.email,
    })))
}

/// Logout endpoint (client-side token invalidation)
///
/// This endpoint doesn't actually invalidate tokens server-side (stateless
/// JWT), but provides a standard logout endpoint for clients to call.
/// Clients should discard their tokens after calling this endpoint.
pub async fn logout_user(CurrentUser(session): CurrentUser) -> Result<Json<Value>, StatusCode> {
    info!("User logout: {}", session.user_id);

    Ok(Json(json!({
        "message": "Logged out successfully",
        "user_id": session.user_id
    })))
}
