//! Sessions, roles, and the authorization gate.

pub mod gate;
pub mod roles;
pub mod session;
