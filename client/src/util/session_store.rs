//! Browser persistence for the session user.
//!
//! Mirrors the logged-in user into `localStorage` so a reload keeps the
//! session without a round trip. The auth cookie stays the source of truth
//! for the server; this copy only drives rendering.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort browser-only behavior; SSR paths no-op so
//! server rendering stays deterministic.

#[cfg(test)]
#[path = "session_store_test.rs"]
mod session_store_test;

use crate::net::types::SessionUser;

#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "recon_session_user";

#[cfg(feature = "hydrate")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(any(test, feature = "hydrate"))]
fn decode(raw: &str) -> Option<SessionUser> {
    serde_json::from_str(raw).ok()
}

#[cfg(any(test, feature = "hydrate"))]
fn encode(user: &SessionUser) -> Option<String> {
    serde_json::to_string(user).ok()
}

/// Read the stored session user. Corrupt entries read as no session.
pub fn load() -> Option<SessionUser> {
    #[cfg(feature = "hydrate")]
    {
        let raw = storage()?.get_item(STORAGE_KEY).ok().flatten()?;
        decode(&raw)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

pub fn save(user: &SessionUser) {
    #[cfg(feature = "hydrate")]
    {
        if let (Some(storage), Some(raw)) = (storage(), encode(user)) {
            let _ = storage.set_item(STORAGE_KEY, &raw);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = user;
    }
}

pub fn clear() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(STORAGE_KEY);
        }
    }
}
