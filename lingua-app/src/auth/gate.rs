//! Authorization gate
//!
//! The single access-control decision point for protected routes. The gate
//! is a pure function of the session and the route's allowed roles; the web
//! layer performs the actual redirect or error response.

use super::roles::Role;
use super::session::Session;
use serde::Serialize;

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The session may see the requested view.
    Allow,
    /// No session — send the visitor to the login screen.
    RedirectLogin,
    /// Authenticated, but the role is not in the route's allowed set.
    RedirectUnauthorized,
}

/// Decide whether `session` may access a route restricted to `allowed`.
///
/// An empty `allowed` set means any authenticated session is acceptable.
pub fn authorize(session: Option<&Session>, allowed: &[Role]) -> Decision {
    let Some(session) = session else {
        return Decision::RedirectLogin;
    };

    if !allowed.is_empty() && !allowed.contains(&session.role) {
        return Decision::RedirectUnauthorized;
    }

    Decision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session::new("u-1", Some("Test User".to_string()), role, None)
    }

    #[test]
    fn missing_session_redirects_to_login_regardless_of_roles() {
        assert_eq!(authorize(None, &[]), Decision::RedirectLogin);
        assert_eq!(authorize(None, &[Role::Admin]), Decision::RedirectLogin);
        assert_eq!(authorize(None, &Role::ALL), Decision::RedirectLogin);
    }

    #[test]
    fn role_outside_non_empty_set_is_unauthorized() {
        for role in [Role::Student, Role::Teacher] {
            assert_eq!(
                authorize(Some(&session(role)), &[Role::Admin]),
                Decision::RedirectUnauthorized
            );
        }
        assert_eq!(
            authorize(Some(&session(Role::Student)), &[Role::Teacher, Role::Admin]),
            Decision::RedirectUnauthorized
        );
    }

    #[test]
    fn role_inside_set_is_allowed() {
        assert_eq!(
            authorize(Some(&session(Role::Admin)), &[Role::Admin]),
            Decision::Allow
        );
        assert_eq!(
            authorize(Some(&session(Role::Teacher)), &[Role::Teacher, Role::Admin]),
            Decision::Allow
        );
    }

    #[test]
    fn empty_set_admits_any_authenticated_session() {
        for role in Role::ALL {
            assert_eq!(authorize(Some(&session(role)), &[]), Decision::Allow);
        }
    }
}
