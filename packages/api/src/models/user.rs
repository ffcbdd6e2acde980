//! # Signed-in user reference
//!
//! [`UserInfo`] is what the auth provider hands to session listeners. It is the
//! only user data the session holds; the editable profile lives separately in the
//! `users` collection (see [`store::Profile`]), keyed by [`UserInfo::id`].

use serde::{Deserialize, Serialize};

/// The user an auth provider reports as signed in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub provider: String,
}

impl UserInfo {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }

    /// The part of the sign-in identifier before `@`; the phone number for staff accounts.
    pub fn login_name(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }
}
