//! Client route table
//!
//! Maps URL paths to a (view, sub-tab) pair plus the role set allowed to
//! reach it. An empty role set admits any authenticated session. The table
//! is data, not code: the web layer looks a path up, runs the gate, and
//! dispatches the view — no per-path branching anywhere.

use crate::auth::roles::Role;

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";
/// Where role-mismatched visitors are sent.
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// One protected route.
#[derive(Debug, Clone, Copy)]
pub struct RouteMatch {
    pub path: &'static str,
    pub view: &'static str,
    pub sub_tab: Option<&'static str>,
    /// Roles admitted to this route. Empty = any authenticated session.
    pub allowed: &'static [Role],
}

const ANY: &[Role] = &[];
const ADMIN: &[Role] = &[Role::Admin];
const TEACHING: &[Role] = &[Role::Teacher, Role::Admin];

const ROUTES: &[RouteMatch] = &[
    RouteMatch {
        path: "/",
        view: "dashboard",
        sub_tab: None,
        allowed: ANY,
    },
    RouteMatch {
        path: "/dashboard",
        view: "dashboard",
        sub_tab: None,
        allowed: ANY,
    },
    RouteMatch {
        path: "/content",
        view: "content",
        sub_tab: None,
        allowed: ADMIN,
    },
    RouteMatch {
        path: "/content/languages",
        view: "content",
        sub_tab: Some("languages"),
        allowed: ADMIN,
    },
    RouteMatch {
        path: "/content/courses",
        view: "content",
        sub_tab: Some("courses"),
        allowed: ADMIN,
    },
    RouteMatch {
        path: "/content/dictionary",
        view: "content",
        sub_tab: Some("dictionary"),
        allowed: ADMIN,
    },
    RouteMatch {
        path: "/content/materials",
        view: "content",
        sub_tab: Some("materials"),
        allowed: ADMIN,
    },
    RouteMatch {
        path: "/users",
        view: "users",
        sub_tab: None,
        allowed: ADMIN,
    },
    RouteMatch {
        path: "/settings",
        view: "settings",
        sub_tab: None,
        allowed: ADMIN,
    },
    RouteMatch {
        path: "/payments",
        view: "payments",
        sub_tab: None,
        allowed: ADMIN,
    },
    RouteMatch {
        path: "/courses",
        view: "courses",
        sub_tab: None,
        allowed: ANY,
    },
    RouteMatch {
        path: "/vocabulary",
        view: "vocabulary",
        sub_tab: None,
        allowed: ANY,
    },
    RouteMatch {
        path: "/sentences",
        view: "sentences",
        sub_tab: None,
        allowed: ANY,
    },
    RouteMatch {
        path: "/practice/listening",
        view: "listening",
        sub_tab: None,
        allowed: ANY,
    },
    RouteMatch {
        path: "/practice/dialogues",
        view: "dialogues",
        sub_tab: None,
        allowed: ANY,
    },
    RouteMatch {
        path: "/practice/stories",
        view: "stories",
        sub_tab: None,
        allowed: ANY,
    },
    RouteMatch {
        path: "/forum",
        view: "forum",
        sub_tab: None,
        allowed: ANY,
    },
    RouteMatch {
        path: "/memberships",
        view: "memberships",
        sub_tab: None,
        allowed: ANY,
    },
    RouteMatch {
        path: "/schedule",
        view: "schedule",
        sub_tab: None,
        allowed: TEACHING,
    },
    RouteMatch {
        path: "/lessons",
        view: "lessons",
        sub_tab: None,
        allowed: ANY,
    },
];

/// The platform route table.
pub struct RouteTable {
    routes: &'static [RouteMatch],
}

impl RouteTable {
    pub fn platform() -> Self {
        Self { routes: ROUTES }
    }

    /// Look a path up. Trailing slashes are ignored; unknown paths return
    /// `None`.
    pub fn lookup(&self, path: &str) -> Option<RouteMatch> {
        let normalized = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        self.routes
            .iter()
            .find(|route| route.path == normalized)
            .copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteMatch> {
        self.routes.iter()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::platform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_resolve() {
        let table = RouteTable::platform();
        let route = table.lookup("/content/languages").unwrap();
        assert_eq!(route.view, "content");
        assert_eq!(route.sub_tab, Some("languages"));
        assert_eq!(route.allowed, &[Role::Admin]);
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let table = RouteTable::platform();
        assert_eq!(table.lookup("/users/").unwrap().view, "users");
        assert_eq!(table.lookup("/").unwrap().view, "dashboard");
    }

    #[test]
    fn unknown_paths_return_none() {
        let table = RouteTable::platform();
        assert!(table.lookup("/no/such/path").is_none());
    }

    #[test]
    fn practice_routes_admit_any_session() {
        let table = RouteTable::platform();
        for path in ["/practice/listening", "/practice/dialogues", "/practice/stories"] {
            assert!(table.lookup(path).unwrap().allowed.is_empty());
        }
    }
}
