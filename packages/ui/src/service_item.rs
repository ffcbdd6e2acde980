use dioxus::prelude::*;
use store::{DocumentId, Service, Stored};

/// One row of the service list. Tapping it reports the service id.
#[component]
pub fn ServiceItem(service: Stored<Service>, on_select: EventHandler<DocumentId>) -> Element {
    let Stored { id, data } = service;

    rsx! {
        button {
            class: "list-item",
            onclick: move |_| on_select.call(id.clone()),
            div {
                class: "list-item-header",
                span { class: "list-item-title", "{data.name}" }
                span { class: "service-price", "{data.price}" }
            }
            p { class: "service-description", "{data.description}" }
            div {
                class: "list-item-footer",
                span { "{data.duration} minutes" }
                span { class: "service-category", "{data.category}" }
            }
        }
    }
}
