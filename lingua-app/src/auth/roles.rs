//! Platform roles
//!
//! A role determines which navigation entries are visible and which views a
//! session may reach. Every account carries exactly one role.

use serde::{Deserialize, Serialize};

/// Platform roles, ordered from least to most privileged.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Learns: browses courses, keeps vocabulary/sentence collections,
    /// practices, posts on the forum.
    Student,
    /// Teaches: everything a student can, plus schedule and lesson
    /// management.
    Teacher,
    /// Administers: content, users, settings, payments.
    Admin,
}

impl Role {
    /// All roles, in privilege order.
    pub const ALL: [Role; 3] = [Role::Student, Role::Teacher, Role::Admin];

    /// Parse a stored role value, falling back to [`Role::Student`] when the
    /// value is absent or unrecognized. A session always has one of the
    /// three roles.
    pub fn parse_or_default(value: Option<&str>) -> Role {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or(Role::Student)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Whether this role may manage teaching schedules and lessons.
    pub fn can_teach(&self) -> bool {
        matches!(self, Role::Teacher | Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Teacher => write!(f, "teacher"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_round_trip_through_strings() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("TEACHER".parse::<Role>().unwrap(), Role::Teacher);
    }

    #[test]
    fn absent_or_unknown_role_defaults_to_student() {
        assert_eq!(Role::parse_or_default(None), Role::Student);
        assert_eq!(Role::parse_or_default(Some("moderator")), Role::Student);
        assert_eq!(Role::parse_or_default(Some("admin")), Role::Admin);
    }

    #[test]
    fn teaching_privilege() {
        assert!(!Role::Student.can_teach());
        assert!(Role::Teacher.can_teach());
        assert!(Role::Admin.can_teach());
        assert!(Role::Admin.is_admin());
    }
}
