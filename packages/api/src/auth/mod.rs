//! # Authentication provider contract
//!
//! [`AuthProvider`] is the session source the app depends on: it reports every
//! sign-in and sign-out to registered listeners and performs credential sign-in.
//! [`LocalAuth`] is the implementation backed by the document store.
//!
//! Sign-in failures are classified into the fixed set of [`AuthError`] kinds and
//! turned into user-facing text by [`AuthError::user_message`]; none are retried.

use std::future::Future;
use std::sync::Arc;

use store::{StoreError, Subscription};

use crate::models::UserInfo;

mod local;
mod password;

pub use local::LocalAuth;
pub use password::{hash_password, verify_password};

/// Callback receiving the signed-in user (or `None`) on every session change.
pub type SessionListener = Arc<dyn Fn(Option<&UserInfo>) + Send + Sync>;

/// Source of session changes and credential sign-in.
pub trait AuthProvider {
    /// Register a listener. It is called at once with the current user and then
    /// on every change until the returned subscription is cancelled.
    fn on_session_change(&self, listener: SessionListener) -> Subscription;

    fn sign_in_with_credential(
        &self,
        identifier: &str,
        secret: &str,
    ) -> impl Future<Output = Result<UserInfo, AuthError>>;

    fn sign_out(&self) -> impl Future<Output = Result<(), AuthError>>;

    fn current_user(&self) -> Option<UserInfo>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("no account matches the identifier")]
    UserNotFound,
    #[error("the secret does not match")]
    WrongPassword,
    #[error("the identifier is malformed")]
    InvalidEmail,
    #[error("the credential is incomplete or invalid")]
    InvalidCredential,
    #[error("an account with this identifier already exists")]
    EmailInUse,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Message shown next to the login form.
    pub fn user_message(&self) -> String {
        match self {
            Self::UserNotFound => "No user found with this phone number".to_string(),
            Self::WrongPassword => "Invalid password".to_string(),
            Self::InvalidEmail => "Invalid phone number".to_string(),
            Self::InvalidCredential => "Invalid phone number or password".to_string(),
            other => other.to_string(),
        }
    }
}

/// Staff sign in with a phone number; the provider expects an email-shaped identifier.
pub fn login_identifier(phone: &str, domain: &str) -> String {
    format!("{}@{}", phone.trim(), domain)
}

/// Whether `identifier` has the `local@domain.tld` shape the provider accepts.
pub fn is_valid_identifier(identifier: &str) -> bool {
    let Some((local, domain)) = identifier.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !identifier.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_maps_to_identifier() {
        assert_eq!(
            login_identifier(" 0900000000 ", "example.com"),
            "0900000000@example.com"
        );
    }

    #[test]
    fn test_identifier_shape() {
        assert!(is_valid_identifier("0900000000@example.com"));
        assert!(!is_valid_identifier("@example.com"));
        assert!(!is_valid_identifier("0900000000@"));
        assert!(!is_valid_identifier("09 00@example.com"));
        assert!(!is_valid_identifier("0900000000@localhost"));
        assert!(!is_valid_identifier("a@b@example.com"));
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(AuthError::WrongPassword.user_message(), "Invalid password");
        assert_eq!(
            AuthError::UserNotFound.user_message(),
            "No user found with this phone number"
        );
        assert_eq!(AuthError::InvalidEmail.user_message(), "Invalid phone number");
        assert_eq!(
            AuthError::InvalidCredential.user_message(),
            "Invalid phone number or password"
        );
    }
}
