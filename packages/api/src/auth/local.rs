//! # Store-backed credential provider
//!
//! Accounts live in the `accounts` collection, one document per identifier
//! (the document id is the lower-cased identifier). Each holds a generated user
//! id and an Argon2id password hash; plaintext secrets are never stored.
//!
//! Sign-in checks, in order: identifier shape ([`AuthError::InvalidEmail`]),
//! empty secret ([`AuthError::InvalidCredential`]), account existence
//! ([`AuthError::UserNotFound`]), secret ([`AuthError::WrongPassword`]).
//! A successful sign-in or a sign-out replaces the current user and notifies
//! every listener synchronously before returning.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store::{Collection, DocumentId, DocumentStore, ListenerRegistry, Record, Subscription};

use super::{is_valid_identifier, password, AuthError, AuthProvider, SessionListener};
use crate::models::UserInfo;

const PROVIDER: &str = "password";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Account {
    uid: String,
    email: String,
    password_hash: String,
    #[serde(default)]
    display_name: Option<String>,
    created_at: DateTime<Utc>,
}

impl Record for Account {
    const COLLECTION: &'static str = "accounts";
}

impl Account {
    fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.uid.clone(),
            email: self.email.clone(),
            name: self.display_name.clone(),
            avatar_url: None,
            provider: PROVIDER.to_string(),
        }
    }
}

/// Email/password provider whose accounts live in a [`DocumentStore`].
pub struct LocalAuth<S> {
    accounts: Collection<S, Account>,
    current: Arc<Mutex<Option<UserInfo>>>,
    listeners: ListenerRegistry<SessionListener>,
}

impl<S: Clone> Clone for LocalAuth<S> {
    fn clone(&self) -> Self {
        Self {
            accounts: self.accounts.clone(),
            current: Arc::clone(&self.current),
            listeners: self.listeners.clone(),
        }
    }
}

fn account_key(identifier: &str) -> DocumentId {
    DocumentId::new(identifier.trim().to_lowercase())
}

impl<S: DocumentStore> LocalAuth<S> {
    pub fn new(store: S) -> Self {
        Self {
            accounts: Collection::new(store),
            current: Arc::new(Mutex::new(None)),
            listeners: ListenerRegistry::new(),
        }
    }

    /// Create an account. Does not sign it in.
    pub async fn register(
        &self,
        identifier: &str,
        secret: &str,
        display_name: Option<String>,
    ) -> Result<UserInfo, AuthError> {
        let email = identifier.trim().to_lowercase();
        if !is_valid_identifier(&email) {
            return Err(AuthError::InvalidEmail);
        }
        if secret.is_empty() {
            return Err(AuthError::InvalidCredential);
        }

        let key = account_key(&email);
        if self.accounts.get(&key).await?.is_some() {
            return Err(AuthError::EmailInUse);
        }

        let account = Account {
            uid: uuid::Uuid::new_v4().simple().to_string(),
            email,
            password_hash: password::hash_password(secret)?,
            display_name,
            created_at: Utc::now(),
        };
        self.accounts.set(&key, &account).await?;
        tracing::info!(uid = %account.uid, "registered account");
        Ok(account.to_info())
    }

    /// Register the account unless the identifier is already taken.
    pub async fn ensure_account(&self, identifier: &str, secret: &str) -> Result<(), AuthError> {
        match self.register(identifier, secret, None).await {
            Ok(_) | Err(AuthError::EmailInUse) => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn replace_current(&self, user: Option<UserInfo>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = user.clone();
        self.listeners.for_each(|listener| listener(user.as_ref()));
    }
}

impl<S: DocumentStore> AuthProvider for LocalAuth<S> {
    fn on_session_change(&self, listener: SessionListener) -> Subscription {
        let subscription = self.listeners.register(Arc::clone(&listener));
        listener(self.current_user().as_ref());
        subscription
    }

    async fn sign_in_with_credential(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<UserInfo, AuthError> {
        if !is_valid_identifier(identifier.trim()) {
            return Err(AuthError::InvalidEmail);
        }
        if secret.is_empty() {
            return Err(AuthError::InvalidCredential);
        }

        let Some(account) = self.accounts.get(&account_key(identifier)).await? else {
            return Err(AuthError::UserNotFound);
        };
        if !password::verify_password(secret, &account.data.password_hash)? {
            return Err(AuthError::WrongPassword);
        }

        let user = account.data.to_info();
        tracing::info!(uid = %user.id, "signed in");
        self.replace_current(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        tracing::info!("signed out");
        self.replace_current(None);
        Ok(())
    }

    fn current_user(&self) -> Option<UserInfo> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use store::MemoryStore;

    const PHONE_ID: &str = "0900000000@example.com";

    async fn auth_with_staff() -> LocalAuth<MemoryStore> {
        let auth = LocalAuth::new(MemoryStore::new());
        auth.register(PHONE_ID, "correct horse", None).await.unwrap();
        auth
    }

    #[tokio::test]
    async fn test_sign_in_and_out_notify_listeners() {
        let auth = auth_with_staff().await;
        let seen: Arc<Mutex<Vec<Option<String>>>> = Arc::default();
        let sink = Arc::clone(&seen);
        let _sub = auth.on_session_change(Arc::new(move |user: Option<&UserInfo>| {
            sink.lock().unwrap().push(user.map(|u| u.email.clone()));
        }));

        let user = auth
            .sign_in_with_credential(PHONE_ID, "correct horse")
            .await
            .unwrap();
        assert_eq!(user.email, PHONE_ID);
        assert_eq!(auth.current_user(), Some(user));

        auth.sign_out().await.unwrap();
        assert!(auth.current_user().is_none());

        assert_eq!(
            *seen.lock().unwrap(),
            vec![None, Some(PHONE_ID.to_string()), None]
        );
    }

    #[tokio::test]
    async fn test_sign_in_error_kinds() {
        let auth = auth_with_staff().await;

        let wrong = auth.sign_in_with_credential(PHONE_ID, "nope").await;
        assert!(matches!(wrong, Err(AuthError::WrongPassword)));

        let unknown = auth
            .sign_in_with_credential("0911111111@example.com", "correct horse")
            .await;
        assert!(matches!(unknown, Err(AuthError::UserNotFound)));

        let malformed = auth.sign_in_with_credential("@example.com", "x").await;
        assert!(matches!(malformed, Err(AuthError::InvalidEmail)));

        let empty = auth.sign_in_with_credential(PHONE_ID, "").await;
        assert!(matches!(empty, Err(AuthError::InvalidCredential)));

        assert!(auth.current_user().is_none());
    }

    #[tokio::test]
    async fn test_identifier_is_case_insensitive() {
        let auth = auth_with_staff().await;
        let user = auth
            .sign_in_with_credential("0900000000@EXAMPLE.com", "correct horse")
            .await
            .unwrap();
        assert_eq!(user.email, PHONE_ID);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates() {
        let auth = auth_with_staff().await;
        let again = auth.register(PHONE_ID, "other", None).await;
        assert!(matches!(again, Err(AuthError::EmailInUse)));
        auth.ensure_account(PHONE_ID, "other").await.unwrap();

        // The first secret still works.
        auth.sign_in_with_credential(PHONE_ID, "correct horse")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_listener_hears_nothing() {
        let auth = auth_with_staff().await;
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let sub = auth.on_session_change(Arc::new(move |_: Option<&UserInfo>| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        sub.cancel();
        sub.cancel();

        auth.sign_in_with_credential(PHONE_ID, "correct horse")
            .await
            .unwrap();
        // Only the immediate call made at registration.
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
