use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AlertKind {
    Error,
    #[default]
    Success,
}

/// Content of an alert a screen wants to show.
#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Modal card with a title, a message and Confirm / Close buttons.
/// Clicking outside the card closes it. Without `on_confirm`, Confirm also closes.
#[component]
pub fn AlertBox(
    alert: Alert,
    on_close: EventHandler<()>,
    on_confirm: Option<EventHandler<()>>,
) -> Element {
    let card = match alert.kind {
        AlertKind::Error => "alert-card alert-error",
        AlertKind::Success => "alert-card alert-success",
    };

    rsx! {
        div {
            class: "alert-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: card,
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                h2 { class: "alert-title", "{alert.title}" }
                p { class: "alert-message", "{alert.message}" }
                div {
                    class: "alert-actions",
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| match on_confirm {
                            Some(handler) => handler.call(()),
                            None => on_close.call(()),
                        },
                        "Confirm"
                    }
                    button {
                        class: "btn btn-outline",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
            }
        }
    }
}
