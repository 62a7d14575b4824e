//! Tests for the authentication and authorization extractors

use super::*;
use crate::auth::jwt::JwtService;
use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, Method, Request},
};
use lingua_app::Role;

/// Helper function to create test request parts with AppState
async fn create_test_parts_with_headers(
    headers: HeaderMap,
) -> (axum::http::request::Parts, crate::AppState) {
    let mut request = Request::builder()
        .method(Method::GET)
        .uri("/test")
        .body(Body::empty())
        .unwrap();

    *request.headers_mut() = headers;

    let (parts, _) = request.into_parts();
    let state = crate::AppState::new(crate::WebConfig::default())
        .await
        .unwrap();
    (parts, state)
}

/// Helper function to create demo-path headers
fn headers_with_user(user_id: &str, role: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("x-user-id", HeaderValue::from_str(user_id).unwrap());
    if let Some(role) = role {
        headers.insert("x-user-role", HeaderValue::from_str(role).unwrap());
    }
    headers
}

/// Helper function to create headers with Bearer token
fn headers_with_bearer_token(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let auth_value = format!("Bearer {}", token);
    headers.insert("authorization", HeaderValue::from_str(&auth_value).unwrap());
    headers
}

#[tokio::test]
async fn test_session_from_demo_headers() {
    let headers = headers_with_user("user-123", Some("teacher"));
    let (mut parts, state) = create_test_parts_with_headers(headers).await;

    let result = CurrentUser::from_request_parts(&mut parts, &state).await;

    assert!(result.is_ok());
    let CurrentUser(session) = result.unwrap();
    assert_eq!(session.user_id, "user-123");
    assert_eq!(session.role, Role::Teacher);
}

#[tokio::test]
async fn test_demo_headers_without_role_default_to_student() {
    let headers = headers_with_user("user-456", None);
    let (mut parts, state) = create_test_parts_with_headers(headers).await;

    let CurrentUser(session) = CurrentUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap();
    assert_eq!(session.role, Role::Student);
}

#[tokio::test]
async fn test_unknown_role_value_defaults_to_student() {
    let headers = headers_with_user("user-789", Some("moderator"));
    let (mut parts, state) = create_test_parts_with_headers(headers).await;

    let CurrentUser(session) = CurrentUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap();
    assert_eq!(session.role, Role::Student);
}

#[tokio::test]
async fn test_extraction_without_auth_redirects() {
    let headers = HeaderMap::new();
    let (mut parts, state) = create_test_parts_with_headers(headers).await;

    let result = CurrentUser::from_request_parts(&mut parts, &state).await;

    // Should return AuthRedirect for unauthenticated requests
    assert!(result.is_err());
}

#[tokio::test]
async fn test_optional_user_without_auth() {
    let headers = HeaderMap::new();
    let (mut parts, state) = create_test_parts_with_headers(headers).await;

    let OptionalUser(maybe_session) = OptionalUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap();
    assert!(maybe_session.is_none());
}

#[tokio::test]
async fn test_optional_user_with_auth() {
    let headers = headers_with_user("user-1", Some("admin"));
    let (mut parts, state) = create_test_parts_with_headers(headers).await;

    let OptionalUser(maybe_session) = OptionalUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap();
    let session = maybe_session.unwrap();
    assert_eq!(session.role, Role::Admin);
}

#[tokio::test]
async fn test_admin_extractor_allows_admin() {
    let headers = headers_with_user("admin-1", Some("admin"));
    let (mut parts, state) = create_test_parts_with_headers(headers).await;

    let result = AdminUser::from_request_parts(&mut parts, &state).await;

    assert!(result.is_ok());
    let AdminUser(session) = result.unwrap();
    assert!(session.role.is_admin());
}

#[tokio::test]
async fn test_admin_extractor_denies_student() {
    let headers = headers_with_user("student-1", Some("student"));
    let (mut parts, state) = create_test_parts_with_headers(headers).await;

    let result = AdminUser::from_request_parts(&mut parts, &state).await;

    // Should fail for non-admin users
    assert!(result.is_err());
}

#[tokio::test]
async fn test_teacher_extractor_allows_teaching_roles() {
    for role in ["teacher", "admin"] {
        let headers = headers_with_user("user-1", Some(role));
        let (mut parts, state) = create_test_parts_with_headers(headers).await;

        let result = TeacherUser::from_request_parts(&mut parts, &state).await;
        assert!(result.is_ok(), "role {} should pass", role);
    }
}

#[tokio::test]
async fn test_teacher_extractor_denies_student() {
    let headers = headers_with_user("student-1", Some("student"));
    let (mut parts, state) = create_test_parts_with_headers(headers).await;

    let result = TeacherUser::from_request_parts(&mut parts, &state).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_session_from_jwt_access_token() {
    let token = JwtService::generate_access_token(
        "user-jwt".to_string(),
        Some("JWT User".to_string()),
        Some("jwt@example.com".to_string()),
        Role::Teacher,
    )
    .unwrap();

    let headers = headers_with_bearer_token(&token);
    let (mut parts, state) = create_test_parts_with_headers(headers).await;

    let CurrentUser(session) = CurrentUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap();
    assert_eq!(session.user_id, "user-jwt");
    assert_eq!(session.role, Role::Teacher);
    assert_eq!(session.email.as_deref(), Some("jwt@example.com"));
}

#[tokio::test]
async fn test_refresh_token_is_not_a_session() {
    let token = JwtService::generate_refresh_token("user-refresh".to_string()).unwrap();

    let headers = headers_with_bearer_token(&token);
    let (mut parts, state) = create_test_parts_with_headers(headers).await;

    // A refresh token must not authenticate a request.
    let result = CurrentUser::from_request_parts(&mut parts, &state).await;
    assert!(result.is_err());
}
