//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login
//! redirects and role-dependent rendering. Mutated only by login and logout.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{Role, SessionUser};

/// Authentication state tracking the current user and loading status.
///
/// Starts in the loading state; the app flips it once the stored session
/// has been read in the browser, so SSR output never claims a user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl AuthState {
    /// Resolved state after reading storage.
    #[must_use]
    pub fn resolved(user: Option<SessionUser>) -> Self {
        Self { user, loading: false }
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    /// `Role::Unknown` never matches, even if listed in `allowed`.
    #[must_use]
    pub fn has_role(&self, allowed: &[Role]) -> bool {
        self.role()
            .is_some_and(|role| role != Role::Unknown && allowed.contains(&role))
    }
}
