//! # Root navigation gate
//!
//! Decides which navigation tree the app shows. While the session is still
//! loading the gate is [`Gate::Pending`] and the app renders a neutral splash, so
//! a signed-in user never sees the login screen flash by on startup.
//!
//! [`RootNavigator::observe`] is fed every [`SessionState`] and reports when the
//! tree has to be swapped. The swap replaces the whole stack; there is no back
//! navigation from one tree into the other.

use crate::session::SessionState;

/// Which navigation tree is mounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    Pending,
    Unauthenticated,
    Authenticated,
}

impl Gate {
    pub fn of(state: &SessionState) -> Self {
        match (state.loading, &state.user) {
            (true, _) => Gate::Pending,
            (false, Some(_)) => Gate::Authenticated,
            (false, None) => Gate::Unauthenticated,
        }
    }
}

/// A tree swap reported by [`RootNavigator::observe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: Gate,
    pub to: Gate,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RootNavigator {
    gate: Gate,
}

impl Default for RootNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl RootNavigator {
    pub fn new() -> Self {
        Self {
            gate: Gate::Pending,
        }
    }

    pub fn gate(&self) -> Gate {
        self.gate
    }

    /// Apply a session change. Returns the swap if the mounted tree changes.
    pub fn observe(&mut self, state: &SessionState) -> Option<Transition> {
        let next = Gate::of(state);
        if next == self.gate {
            return None;
        }
        let transition = Transition {
            from: self.gate,
            to: next,
        };
        tracing::info!(from = ?transition.from, to = ?transition.to, "swapping navigation tree");
        self.gate = next;
        Some(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{login_identifier, AuthProvider, LocalAuth};
    use crate::session::tests::{staff, ScriptedAuth};
    use crate::session::SessionObserver;
    use store::MemoryStore;

    #[test]
    fn test_gate_follows_session() {
        assert_eq!(Gate::of(&SessionState::default()), Gate::Pending);
        assert_eq!(Gate::of(&SessionState::resolved(None)), Gate::Unauthenticated);
        assert_eq!(
            Gate::of(&SessionState::resolved(Some(staff("a")))),
            Gate::Authenticated
        );
    }

    #[test]
    fn test_authenticated_iff_user_present() {
        let auth = ScriptedAuth::default();
        let (observer, _sub) = SessionObserver::start(&auth);
        let mut navigator = RootNavigator::new();

        let script = [
            Some(staff("a")),
            None,
            None,
            Some(staff("b")),
            Some(staff("c")),
            None,
        ];
        for user in script {
            auth.emit(user);
            navigator.observe(&observer.state());
            assert_eq!(
                navigator.gate() == Gate::Authenticated,
                observer.current().is_some()
            );
        }
    }

    #[test]
    fn test_observe_reports_only_swaps() {
        let mut navigator = RootNavigator::new();
        assert_eq!(navigator.observe(&SessionState::default()), None);

        let signed_out = SessionState::resolved(None);
        assert_eq!(
            navigator.observe(&signed_out),
            Some(Transition {
                from: Gate::Pending,
                to: Gate::Unauthenticated
            })
        );
        assert_eq!(navigator.observe(&signed_out), None);

        let signed_in = SessionState::resolved(Some(staff("a")));
        assert_eq!(
            navigator.observe(&signed_in).map(|t| t.to),
            Some(Gate::Authenticated)
        );
        // A different user keeps the same tree.
        let other = SessionState::resolved(Some(staff("b")));
        assert_eq!(navigator.observe(&other), None);
    }

    #[tokio::test]
    async fn test_phone_sign_in_swaps_to_app_tree() {
        let auth = LocalAuth::new(MemoryStore::new());
        let identifier = login_identifier("0900000000", "example.com");
        assert_eq!(identifier, "0900000000@example.com");
        auth.register(&identifier, "secret-1", None).await.unwrap();

        let (observer, _sub) = SessionObserver::start(&auth);
        let mut navigator = RootNavigator::new();
        navigator.observe(&observer.state());
        assert_eq!(navigator.gate(), Gate::Unauthenticated);

        let err = auth
            .sign_in_with_credential(&identifier, "wrong")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Invalid password");
        assert_eq!(navigator.observe(&observer.state()), None);
        assert_eq!(navigator.gate(), Gate::Unauthenticated);

        auth.sign_in_with_credential(&identifier, "secret-1")
            .await
            .unwrap();
        navigator.observe(&observer.state());
        assert_eq!(navigator.gate(), Gate::Authenticated);

        auth.sign_out().await.unwrap();
        navigator.observe(&observer.state());
        assert_eq!(navigator.gate(), Gate::Unauthenticated);
    }
}
