//! Lingua application layer
//!
//! Pure decision logic for the platform: roles and sessions, the
//! authorization gate that guards protected routes, and the data-driven
//! view dispatch that picks a screen for an authenticated role. No I/O
//! happens here — the web layer feeds sessions in and acts on the
//! decisions that come out.

pub mod auth;
pub mod views;

pub use auth::gate::{authorize, Decision};
pub use auth::roles::Role;
pub use auth::session::Session;
pub use views::registry::{ScreenDescriptor, ScreenId, ViewRegistry};
pub use views::routes::{RouteMatch, RouteTable, LOGIN_PATH, UNAUTHORIZED_PATH};
