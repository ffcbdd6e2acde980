use api::Backend;
use dioxus::prelude::*;
use store::{customer_matches, Customer, DocumentId, Stored};
use ui::icons::FaPlus;
use ui::{use_live, use_submit, Alert, AlertBox, CustomerItem, Icon, ScreenHeader, SearchBar, Tab};

use super::AppTabs;
use crate::AppRoute;

#[component]
pub fn Customers() -> Element {
    let backend = use_context::<Backend>();
    let nav = use_navigator();
    let customers = use_live(|| backend.customers.live());
    let mut search = use_signal(String::new);
    let mut alert = use_signal(|| None::<Alert>);
    let submit = use_submit();

    let visible: Vec<Stored<Customer>> = customers
        .read()
        .iter()
        .filter(|c| customer_matches(&c.data, &search.read()))
        .cloned()
        .collect();

    let collection = backend.customers.clone();
    let on_delete = use_callback(move |id: DocumentId| {
        let collection = collection.clone();
        submit.run(async move {
            match collection.delete(&id).await {
                Ok(()) => tracing::info!(%id, "deleted customer"),
                Err(e) => {
                    tracing::error!("Failed to delete customer: {}", e);
                    alert.set(Some(Alert::error(
                        "Error",
                        "Failed to delete customer. Please try again.",
                    )));
                }
            }
        });
    });

    rsx! {
        div {
            class: "screen",
            ScreenHeader {
                title: "Customers",
                button {
                    class: "icon-button",
                    title: "Add customer",
                    onclick: move |_| {
                        nav.push(AppRoute::AddCustomer {});
                    },
                    Icon { icon: FaPlus, width: 18, height: 18 }
                }
            }
            div {
                class: "screen-body",
                SearchBar {
                    value: search(),
                    placeholder: "Search customers...",
                    oninput: move |value: String| search.set(value),
                }
                if visible.is_empty() {
                    p { class: "empty-state", "No customers found" }
                }
                for customer in visible {
                    CustomerItem {
                        key: "{customer.id}",
                        customer,
                        disabled: submit.busy(),
                        on_select: move |id: DocumentId| {
                            nav.push(AppRoute::CustomerDetail { id: id.to_string() });
                        },
                        on_delete,
                    }
                }
            }
            AppTabs { active: Tab::Customers }
            if let Some(error) = alert() {
                AlertBox { alert: error, on_close: move |_| alert.set(None) }
            }
        }
    }
}
