//! Authentication and authorization using Axum best practices
//!
//! Extractors build a [`Session`] per request — from a verified JWT first,
//! then from the simplified demo headers — and run the authorization gate
//! against the route's role set. The gate decides; the rejection types here
//! perform the redirect or error response it asks for.

pub mod handlers;
pub mod jwt;
pub mod users;

#[cfg(test)]
mod tests;

use crate::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Redirect, Response},
};
use lingua_app::{authorize, Decision, Role, Session, LOGIN_PATH, UNAUTHORIZED_PATH};
use tracing::warn;

/// Authentication redirect for failed auth
#[derive(Debug)]
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::temporary(LOGIN_PATH).into_response()
    }
}

/// Role mismatch on a protected route.
#[derive(Debug)]
pub struct RoleDenied {
    pub required: Vec<Role>,
    pub role: Role,
}

impl RoleDenied {
    pub fn new(required: &[Role], role: Role) -> Self {
        Self {
            required: required.to_vec(),
            role,
        }
    }
}

impl IntoResponse for RoleDenied {
    fn into_response(self) -> Response {
        let required: Vec<String> = self.required.iter().map(|r| r.to_string()).collect();
        (
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({
                "error": "unauthorized",
                "message": format!(
                    "Role '{}' is not allowed here; requires one of: {}",
                    self.role,
                    required.join(", ")
                ),
                "required_roles": required,
                "redirect": UNAUTHORIZED_PATH,
            })),
        )
            .into_response()
    }
}

/// The authenticated session for this request.
///
/// Tries JWT authentication first, then the simplified demo headers.
/// Rejection redirects to the login path.
pub struct CurrentUser(pub Session);

impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let _app_state = AppState::from_ref(state);

        // First try JWT authentication
        if let Ok(claims) = jwt::Claims::from_request_parts(parts, state).await {
            if let Ok(session) = claims.to_session() {
                return Ok(CurrentUser(session));
            }
        }

        // Fallback to the demo header path
        if let Some(session) = session_from_headers(&parts.headers) {
            Ok(CurrentUser(session))
        } else {
            Err(AuthRedirect)
        }
    }
}

/// Optional session extractor - doesn't fail if the visitor is anonymous.
pub struct OptionalUser(pub Option<Session>);

impl<S> FromRequestParts<S> for OptionalUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let _app_state = AppState::from_ref(state);

        if let Ok(claims) = jwt::Claims::from_request_parts(parts, state).await {
            if let Ok(session) = claims.to_session() {
                return Ok(OptionalUser(Some(session)));
            }
        }

        Ok(OptionalUser(session_from_headers(&parts.headers)))
    }
}

/// Build a session from the simplified demo sign-in headers.
///
/// Presence of `x-user-id` is the sole signal of "authenticated" on this
/// path; an absent or unknown `x-user-role` means student.
fn session_from_headers(headers: &HeaderMap) -> Option<Session> {
    let user_id = header_value(headers, "x-user-id")?;
    let role = header_value(headers, "x-user-role");
    let display_name = header_value(headers, "x-user-name");
    Some(Session::demo(user_id, role.as_deref(), display_name))
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|s| s.to_string())
}

/// Admin-only extractor.
pub struct AdminUser(pub Session);

impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, state, &[Role::Admin]).await.map(AdminUser)
    }
}

/// Extractor for teaching roles (teacher or admin).
pub struct TeacherUser(pub Session);

impl<S> FromRequestParts<S> for TeacherUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, state, &[Role::Teacher, Role::Admin])
            .await
            .map(TeacherUser)
    }
}

/// Resolve the session and run the gate against `allowed`.
async fn require_role<S>(
    parts: &mut Parts,
    state: &S,
    allowed: &[Role],
) -> Result<Session, Response>
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    let session = match OptionalUser::from_request_parts(parts, state).await {
        Ok(OptionalUser(session)) => session,
        Err(never) => match never {},
    };

    match authorize(session.as_ref(), allowed) {
        Decision::Allow => Ok(session.expect("allow implies a session")),
        Decision::RedirectLogin => Err(AuthRedirect.into_response()),
        Decision::RedirectUnauthorized => {
            let session = session.expect("unauthorized implies a session");
            warn!(
                "Access denied for user '{}' with role '{}'",
                session.user_id, session.role
            );
            Err(RoleDenied::new(allowed, session.role).into_response())
        }
    }
}
