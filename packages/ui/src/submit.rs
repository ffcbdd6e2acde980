use std::future::Future;

use api::SubmitGuard;
use dioxus::prelude::*;

/// Reactive wrapper around a [`SubmitGuard`] for one screen.
#[derive(Clone, Copy)]
pub struct Submit {
    guard: CopyValue<SubmitGuard>,
    busy: Signal<bool>,
}

pub fn use_submit() -> Submit {
    let guard = use_hook(|| CopyValue::new(SubmitGuard::new()));
    let busy = use_signal(|| false);
    Submit { guard, busy }
}

impl Submit {
    /// Whether a submission is in flight; bind it to the control's `disabled`.
    pub fn busy(&self) -> bool {
        (self.busy)()
    }

    /// Spawn `task` unless one is already running. Returns whether it started.
    pub fn run(&self, task: impl Future<Output = ()> + 'static) -> bool {
        let Some(ticket) = self.guard.read().try_begin() else {
            tracing::debug!("ignoring submit while another is in flight");
            return false;
        };
        let mut busy = self.busy;
        busy.set(true);
        spawn(async move {
            task.await;
            drop(ticket);
            busy.set(false);
        });
        true
    }
}
