//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render page chrome and reconciliation widgets while reading
//! shared auth and toast state from Leptos context providers.

pub mod data_table;
pub mod filter_bar;
pub mod nav_bar;
pub mod role_guard;
pub mod status_select;
pub mod toaster;
