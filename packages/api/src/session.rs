//! # Session observer
//!
//! Holds the one process-wide answer to "who, if anyone, is signed in". It is an
//! owned value created by [`SessionObserver::start`] and handed to whoever needs
//! it, rather than ambient global state.
//!
//! The observer registers exactly one listener with the auth provider. Every
//! notification replaces the held [`SessionState`] wholesale. Dependents either
//! read [`SessionObserver::current`] or await changes on a
//! [`tokio::sync::watch`] receiver from [`SessionObserver::watch`].
//!
//! The returned [`Subscription`] is the teardown handle: once cancelled, later
//! provider notifications no longer reach the observer or its watchers.

use std::sync::Arc;

use store::{DocumentId, Subscription};
use tokio::sync::watch;

use crate::auth::AuthProvider;
use crate::models::UserInfo;

/// Session as last reported by the auth provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub user: Option<UserInfo>,
    /// True until the provider's first notification arrives.
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl SessionState {
    pub fn resolved(user: Option<UserInfo>) -> Self {
        Self {
            user,
            loading: false,
        }
    }

    /// Id of the signed-in user's document in the profiles collection.
    pub fn profile_id(&self) -> Option<DocumentId> {
        self.user.as_ref().map(|user| DocumentId::new(user.id.clone()))
    }
}

/// Owned, shareable view of the current session.
#[derive(Clone, Debug)]
pub struct SessionObserver {
    sender: Arc<watch::Sender<SessionState>>,
}

impl PartialEq for SessionObserver {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.sender, &other.sender)
    }
}

impl SessionObserver {
    /// Subscribe to `auth` once. Returns the observer and its cancellation handle.
    pub fn start<A: AuthProvider>(auth: &A) -> (Self, Subscription) {
        let (sender, _) = watch::channel(SessionState::default());
        let sender = Arc::new(sender);

        let target = Arc::downgrade(&sender);
        let subscription = auth.on_session_change(Arc::new(move |user: Option<&UserInfo>| {
            let Some(sender) = target.upgrade() else {
                return;
            };
            tracing::debug!(signed_in = user.is_some(), "session notification");
            sender.send_replace(SessionState::resolved(user.cloned()));
        }));

        (Self { sender }, subscription)
    }

    /// The last-known signed-in user, if any.
    pub fn current(&self) -> Option<UserInfo> {
        self.sender.borrow().user.clone()
    }

    pub fn state(&self) -> SessionState {
        self.sender.borrow().clone()
    }

    /// Receiver that wakes on every session notification.
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.sender.subscribe()
    }
}
