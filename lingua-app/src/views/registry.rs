//! View dispatch
//!
//! Maps an authenticated role and a view name to the screen the client
//! should render. The mapping is one data table rather than per-role
//! branching, so the whole dispatch surface can be validated at startup and
//! tested in isolation. Unknown view names fall back to the role's
//! dashboard.

use crate::auth::roles::Role;
use crate::views::routes::RouteTable;
use lingua_core::{LinguaError, LinguaResult};
use serde::Serialize;
use std::collections::HashMap;

/// Every screen the platform can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenId {
    AdminDashboard,
    TeacherDashboard,
    StudentDashboard,
    ContentManagement,
    UserManagement,
    SystemSettings,
    PaymentHistory,
    CourseCatalog,
    VocabularyCollection,
    SentenceCollection,
    ListeningPractice,
    DialoguePractice,
    StoryPractice,
    Forum,
    MembershipPlans,
    TeacherSchedule,
    PrivateLessons,
}

/// What the dispatcher hands back: which screen to instantiate, under which
/// view name, with the sub-tab forwarded unchanged. The screen itself
/// validates the sub-tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenDescriptor {
    pub screen: ScreenId,
    pub view: String,
    pub sub_tab: Option<String>,
}

struct DispatchEntry {
    roles: &'static [Role],
    view: &'static str,
    screen: ScreenId,
}

const ALL: &[Role] = &Role::ALL;
const ADMIN: &[Role] = &[Role::Admin];
const TEACHING: &[Role] = &[Role::Teacher, Role::Admin];

/// The dispatch table. Dashboards are role-specific; management screens are
/// admin-only; schedule management is for teaching roles; everything else is
/// shared across roles.
const DISPATCH: &[DispatchEntry] = &[
    DispatchEntry {
        roles: &[Role::Admin],
        view: "dashboard",
        screen: ScreenId::AdminDashboard,
    },
    DispatchEntry {
        roles: &[Role::Teacher],
        view: "dashboard",
        screen: ScreenId::TeacherDashboard,
    },
    DispatchEntry {
        roles: &[Role::Student],
        view: "dashboard",
        screen: ScreenId::StudentDashboard,
    },
    DispatchEntry {
        roles: ADMIN,
        view: "content",
        screen: ScreenId::ContentManagement,
    },
    DispatchEntry {
        roles: ADMIN,
        view: "users",
        screen: ScreenId::UserManagement,
    },
    DispatchEntry {
        roles: ADMIN,
        view: "settings",
        screen: ScreenId::SystemSettings,
    },
    DispatchEntry {
        roles: ADMIN,
        view: "payments",
        screen: ScreenId::PaymentHistory,
    },
    DispatchEntry {
        roles: ALL,
        view: "courses",
        screen: ScreenId::CourseCatalog,
    },
    DispatchEntry {
        roles: ALL,
        view: "vocabulary",
        screen: ScreenId::VocabularyCollection,
    },
    DispatchEntry {
        roles: ALL,
        view: "sentences",
        screen: ScreenId::SentenceCollection,
    },
    DispatchEntry {
        roles: ALL,
        view: "listening",
        screen: ScreenId::ListeningPractice,
    },
    DispatchEntry {
        roles: ALL,
        view: "dialogues",
        screen: ScreenId::DialoguePractice,
    },
    DispatchEntry {
        roles: ALL,
        view: "stories",
        screen: ScreenId::StoryPractice,
    },
    DispatchEntry {
        roles: ALL,
        view: "forum",
        screen: ScreenId::Forum,
    },
    DispatchEntry {
        roles: ALL,
        view: "memberships",
        screen: ScreenId::MembershipPlans,
    },
    DispatchEntry {
        roles: TEACHING,
        view: "schedule",
        screen: ScreenId::TeacherSchedule,
    },
    DispatchEntry {
        roles: ALL,
        view: "lessons",
        screen: ScreenId::PrivateLessons,
    },
];

/// Per-role finite mapping from view name to screen.
pub struct ViewRegistry {
    table: HashMap<Role, HashMap<&'static str, ScreenId>>,
}

impl ViewRegistry {
    /// Build the platform dispatch table.
    pub fn platform() -> Self {
        let mut table: HashMap<Role, HashMap<&'static str, ScreenId>> = HashMap::new();
        for entry in DISPATCH {
            for role in entry.roles {
                table.entry(*role).or_default().insert(entry.view, entry.screen);
            }
        }
        Self { table }
    }

    /// The dashboard screen for a role. Every role has one; the table is
    /// validated for that at startup.
    pub fn dashboard(&self, role: Role) -> ScreenDescriptor {
        let screen = self
            .table
            .get(&role)
            .and_then(|views| views.get("dashboard"))
            .copied()
            .unwrap_or(ScreenId::StudentDashboard);
        ScreenDescriptor {
            screen,
            view: "dashboard".to_string(),
            sub_tab: None,
        }
    }

    /// Resolve a view name for a role. Unknown names fall back to the
    /// role's dashboard; the sub-tab is forwarded unchanged either way.
    pub fn resolve(&self, role: Role, view: &str, sub_tab: Option<&str>) -> ScreenDescriptor {
        match self.table.get(&role).and_then(|views| views.get(view)) {
            Some(screen) => ScreenDescriptor {
                screen: *screen,
                view: view.to_string(),
                sub_tab: sub_tab.map(str::to_string),
            },
            None => {
                let mut descriptor = self.dashboard(role);
                descriptor.sub_tab = sub_tab.map(str::to_string);
                descriptor
            }
        }
    }

    /// Whether a (role, view) pair is in the table, without fallback.
    pub fn knows(&self, role: Role, view: &str) -> bool {
        self.table
            .get(&role)
            .is_some_and(|views| views.contains_key(view))
    }

    /// Startup validation of the dispatch surface: every role has a
    /// dashboard, and every route in `routes` dispatches for every role the
    /// route admits.
    pub fn validate(&self, routes: &RouteTable) -> LinguaResult<()> {
        for role in Role::ALL {
            if !self.knows(role, "dashboard") {
                return Err(LinguaError::config(format!(
                    "role {} has no dashboard screen",
                    role
                )));
            }
        }

        for route in routes.iter() {
            let admitted: &[Role] = if route.allowed.is_empty() {
                &Role::ALL
            } else {
                route.allowed
            };
            for role in admitted {
                if !self.knows(*role, route.view) {
                    return Err(LinguaError::config(format!(
                        "route {} admits role {} but view '{}' does not dispatch for it",
                        route.path, role, route.view
                    )));
                }
            }
        }

        tracing::debug!("view dispatch table validated against the route table");
        Ok(())
    }
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::platform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_view_falls_back_to_role_dashboard() {
        let registry = ViewRegistry::platform();
        assert_eq!(
            registry.resolve(Role::Admin, "no-such-view", None).screen,
            ScreenId::AdminDashboard
        );
        assert_eq!(
            registry.resolve(Role::Teacher, "no-such-view", None).screen,
            ScreenId::TeacherDashboard
        );
        assert_eq!(
            registry.resolve(Role::Student, "no-such-view", None).screen,
            ScreenId::StudentDashboard
        );
    }

    #[test]
    fn sub_tab_is_forwarded_unchanged() {
        let registry = ViewRegistry::platform();
        let descriptor = registry.resolve(Role::Admin, "content", Some("languages"));
        assert_eq!(descriptor.screen, ScreenId::ContentManagement);
        assert_eq!(descriptor.sub_tab.as_deref(), Some("languages"));
    }

    #[test]
    fn admin_views_do_not_dispatch_for_students() {
        let registry = ViewRegistry::platform();
        assert!(!registry.knows(Role::Student, "users"));
        // Falls back to the student dashboard rather than leaking the screen.
        assert_eq!(
            registry.resolve(Role::Student, "users", None).screen,
            ScreenId::StudentDashboard
        );
    }

    #[test]
    fn schedule_dispatches_for_teaching_roles_only() {
        let registry = ViewRegistry::platform();
        assert!(registry.knows(Role::Teacher, "schedule"));
        assert!(registry.knows(Role::Admin, "schedule"));
        assert!(!registry.knows(Role::Student, "schedule"));
    }

    #[test]
    fn platform_table_passes_validation() {
        let registry = ViewRegistry::platform();
        let routes = RouteTable::platform();
        registry.validate(&routes).expect("dispatch table is complete");
    }
}
