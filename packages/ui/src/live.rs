use dioxus::prelude::*;
use store::LiveQuery;

/// Mirror a live query into a signal for the lifetime of the calling component.
///
/// The query is opened once, on first render. Unmounting the component ends the
/// forwarding task, which drops the query and cancels its subscription.
pub fn use_live<V: Clone + 'static>(open: impl FnOnce() -> LiveQuery<V>) -> Signal<V> {
    use_hook(|| {
        let mut live = open();
        let mut value = Signal::new(live.current());
        spawn(async move {
            while let Some(next) = live.changed().await {
                value.set(next);
            }
        });
        value
    })
}
