use dioxus::prelude::*;

/// Neutral screen shown until the first session notification arrives.
#[component]
pub fn Splash(title: String) -> Element {
    rsx! {
        div {
            class: "splash",
            h1 { class: "splash-title", "{title}" }
            div { class: "spinner" }
        }
    }
}
