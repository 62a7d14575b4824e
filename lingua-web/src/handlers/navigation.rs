//! Navigation resolution
//!
//! The client asks the server what to render for a path: route lookup →
//! authorization gate → view dispatch. The response either names the screen
//! to instantiate or the path to redirect to; the client performs the
//! actual navigation.

use crate::auth::OptionalUser;
use crate::AppState;
use axum::{
    extract::{Query, State},
    response::Json,
};
use lingua_app::{authorize, Decision, Role, ScreenDescriptor, LOGIN_PATH, UNAUTHORIZED_PATH};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub outcome: Decision,
    pub redirect_to: Option<String>,
    pub screen: Option<ScreenDescriptor>,
}

/// Resolve a client path into an authorization outcome and a screen.
pub async fn resolve_view(
    State(state): State<AppState>,
    OptionalUser(session): OptionalUser,
    Query(params): Query<ResolveParams>,
) -> Json<NavigationResponse> {
    let route = state.routes.lookup(&params.path);

    // Unknown paths dispatch like an unknown view name: the role's
    // dashboard, for any authenticated session.
    let (view, sub_tab, allowed): (&str, Option<&str>, &[Role]) = match &route {
        Some(route) => (route.view, route.sub_tab, route.allowed),
        None => ("dashboard", None, &[]),
    };

    let response = match authorize(session.as_ref(), allowed) {
        Decision::Allow => {
            let session = session.expect("allow implies a session");
            let screen = state.views.resolve(session.role, view, sub_tab);
            NavigationResponse {
                outcome: Decision::Allow,
                redirect_to: None,
                screen: Some(screen),
            }
        }
        Decision::RedirectLogin => NavigationResponse {
            outcome: Decision::RedirectLogin,
            redirect_to: Some(LOGIN_PATH.to_string()),
            screen: None,
        },
        Decision::RedirectUnauthorized => {
            debug!(
                "Unauthorized navigation to {} by role {:?}",
                params.path,
                session.as_ref().map(|s| s.role)
            );
            NavigationResponse {
                outcome: Decision::RedirectUnauthorized,
                redirect_to: Some(UNAUTHORIZED_PATH.to_string()),
                screen: None,
            }
        }
    };

    Json(response)
}
