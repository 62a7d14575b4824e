//! Session identity
//!
//! A [`Session`] is the identity snapshot of one authenticated principal,
//! built per request by the web layer (from a verified token or from the
//! simplified demo headers) and threaded through the gate and the view
//! dispatcher as a plain argument. Nothing in the system holds a
//! process-wide "current user".

use super::roles::Role;
use serde::{Deserialize, Serialize};

/// Identity of an authenticated principal for the duration of one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Account id.
    pub user_id: String,
    /// Name shown in the navigation header.
    pub display_name: Option<String>,
    /// The account's role. Always one of the three platform roles.
    pub role: Role,
    /// Email, when the sign-in path provided one.
    pub email: Option<String>,
}

impl Session {
    pub fn new(
        user_id: impl Into<String>,
        display_name: Option<String>,
        role: Role,
        email: Option<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            display_name,
            role,
            email,
        }
    }

    /// Session from the simplified demo sign-in path: an id plus an optional
    /// stored role value. An absent or unknown role means student.
    pub fn demo(user_id: impl Into<String>, role: Option<&str>, display_name: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name,
            role: Role::parse_or_default(role),
            email: None,
        }
    }

    /// Name to show in the UI, falling back to the account id.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_session_defaults_to_student() {
        let session = Session::demo("u-1", None, None);
        assert_eq!(session.role, Role::Student);

        let session = Session::demo("u-2", Some("teacher"), Some("Ms. Vega".to_string()));
        assert_eq!(session.role, Role::Teacher);
        assert_eq!(session.display_name(), "Ms. Vega");
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let session = Session::new("u-3", None, Role::Student, None);
        assert_eq!(session.display_name(), "u-3");
    }
}
