//! Services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own outbound integration concerns so route handlers can
//! stay focused on protocol translation and cookie plumbing.

pub mod backend;
