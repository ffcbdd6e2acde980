use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaTrashCan;
use dioxus_free_icons::Icon;
use store::{Customer, DocumentId, Stored};

/// One row of the customer list, with an inline delete button.
#[component]
pub fn CustomerItem(
    customer: Stored<Customer>,
    on_select: EventHandler<DocumentId>,
    on_delete: EventHandler<DocumentId>,
    #[props(default)] disabled: bool,
) -> Element {
    let Stored { id, data } = customer;
    let delete_id = id.clone();

    rsx! {
        div {
            class: "list-item list-item-row",
            button {
                class: "list-item-body",
                onclick: move |_| on_select.call(id.clone()),
                span { class: "list-item-title", "{data.name}" }
                span { class: "customer-email", "{data.email}" }
                span { class: "customer-phone", "{data.phone}" }
            }
            button {
                class: "icon-button icon-button-danger",
                title: "Delete",
                disabled,
                onclick: move |_| on_delete.call(delete_id.clone()),
                Icon { icon: FaTrashCan, width: 16, height: 16 }
            }
        }
    }
}
