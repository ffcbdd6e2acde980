//! Session context and hooks for the UI.

use api::{Gate, RootNavigator, SessionObserver, SessionState};
use dioxus::prelude::*;

/// Current session state. Updates on every sign-in and sign-out.
pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// Which navigation tree should be mounted.
pub fn use_gate() -> Signal<Gate> {
    use_context::<Signal<Gate>>()
}

/// Provider component that mirrors a [`SessionObserver`] into signals.
/// Wrap the app with this component before reading [`use_session`] or [`use_gate`].
#[component]
pub fn SessionProvider(observer: SessionObserver, children: Element) -> Element {
    let (session, gate) = use_hook(|| {
        // Subscribe before reading so no notification falls between the two.
        let mut receiver = observer.watch();
        let initial = observer.state();

        let mut navigator = RootNavigator::new();
        navigator.observe(&initial);
        let mut session = Signal::new(initial);
        let mut gate = Signal::new(navigator.gate());

        spawn(async move {
            while receiver.changed().await.is_ok() {
                let next = receiver.borrow_and_update().clone();
                if navigator.observe(&next).is_some() {
                    gate.set(navigator.gate());
                }
                session.set(next);
            }
        });

        (session, gate)
    });

    use_context_provider(|| session);
    use_context_provider(|| gate);

    rsx! {
        {children}
    }
}
