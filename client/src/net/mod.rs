//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` wraps the server's `/api` REST routes and `types` defines the shared
//! session DTOs. Reconciliation payloads stay opaque JSON.

pub mod api;
pub mod types;
