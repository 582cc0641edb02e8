//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (auth redirect, fetches,
//! loading flags) and delegates rendering details to `components`.

pub mod dashboard;
pub mod details;
pub mod digital;
pub mod download;
pub mod forbidden;
pub mod historico;
pub mod login;
pub mod not_found;
pub mod signup;
