use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaArrowLeft;
use dioxus_free_icons::Icon;

/// Title bar of a screen. Shows a back button when `on_back` is set and any
/// trailing actions passed as children.
#[component]
pub fn ScreenHeader(
    title: String,
    on_back: Option<EventHandler<()>>,
    #[props(default = VNode::empty())] children: Element,
) -> Element {
    rsx! {
        header {
            class: "screen-header",
            if let Some(on_back) = on_back {
                button {
                    class: "icon-button",
                    title: "Back",
                    onclick: move |_| on_back.call(()),
                    Icon { icon: FaArrowLeft, width: 18, height: 18 }
                }
            }
            h1 { class: "screen-title", "{title}" }
            div { class: "screen-header-actions", {children} }
        }
    }
}
