use api::Backend;
use dioxus::prelude::*;
use store::{service_matches, DocumentId, Service, Stored};
use ui::icons::{FaCircleUser, FaPlus};
use ui::{use_live, Icon, ScreenHeader, SearchBar, ServiceItem, Tab, SALON_NAME};

use super::AppTabs;
use crate::AppRoute;

#[component]
pub fn Home() -> Element {
    let backend = use_context::<Backend>();
    let nav = use_navigator();
    let services = use_live(|| backend.services.live());
    let mut search = use_signal(String::new);

    let visible: Vec<Stored<Service>> = services
        .read()
        .iter()
        .filter(|s| service_matches(&s.data, &search.read()))
        .cloned()
        .collect();

    rsx! {
        div {
            class: "screen",
            ScreenHeader {
                title: SALON_NAME.to_string(),
                button {
                    class: "icon-button",
                    title: "Add service",
                    onclick: move |_| {
                        nav.push(AppRoute::AddService {});
                    },
                    Icon { icon: FaPlus, width: 18, height: 18 }
                }
                button {
                    class: "icon-button",
                    title: "Account",
                    onclick: move |_| {
                        nav.push(AppRoute::AccountProfile {});
                    },
                    Icon { icon: FaCircleUser, width: 20, height: 20 }
                }
            }
            div {
                class: "screen-body",
                SearchBar {
                    value: search(),
                    placeholder: "Search services...",
                    oninput: move |value: String| search.set(value),
                }
                if visible.is_empty() {
                    p { class: "empty-state", "No services found" }
                }
                for service in visible {
                    ServiceItem {
                        key: "{service.id}",
                        service,
                        on_select: move |id: DocumentId| {
                            nav.push(AppRoute::ServiceDetail { id: id.to_string() });
                        },
                    }
                }
            }
            AppTabs { active: Tab::Home }
        }
    }
}
