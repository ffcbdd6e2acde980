use api::Backend;
use dioxus::prelude::*;
use store::DocumentId;
use ui::{use_live, use_submit, Alert, AlertBox, ScreenHeader};

use super::service_detail::DetailRow;
use super::Missing;
use crate::AppRoute;

#[component]
pub fn CustomerDetail(id: String) -> Element {
    let backend = use_context::<Backend>();
    let nav = use_navigator();
    let doc_id = DocumentId::from(id.as_str());
    let customer = use_live(|| backend.customers.live_document(doc_id.clone()));
    let mut confirming = use_signal(|| false);
    let mut alert = use_signal(|| None::<Alert>);
    let submit = use_submit();

    let Some(customer) = customer() else {
        return rsx! {
            Missing { title: "Customer Details", message: "This customer no longer exists." }
        };
    };

    let customers = backend.customers.clone();
    let on_confirm_delete = move |_: ()| {
        confirming.set(false);
        let customers = customers.clone();
        let target = doc_id.clone();
        submit.run(async move {
            match customers.delete(&target).await {
                Ok(()) => {
                    tracing::info!(id = %target, "deleted customer");
                    nav.go_back();
                }
                Err(e) => {
                    tracing::error!("Failed to delete customer: {}", e);
                    alert.set(Some(Alert::error(
                        "Error",
                        "Failed to delete customer. Please try again.",
                    )));
                }
            }
        });
    };

    let data = customer.data;

    rsx! {
        div {
            class: "screen",
            ScreenHeader { title: "Customer Details", on_back: move |_| nav.go_back() }
            div {
                class: "screen-body",
                DetailRow { label: "Name:", value: data.name.clone() }
                DetailRow { label: "Email:", value: data.email.clone() }
                DetailRow { label: "Phone:", value: data.phone.clone() }

                div {
                    class: "action-row",
                    button {
                        class: "btn btn-primary",
                        disabled: submit.busy(),
                        onclick: move |_| {
                            nav.push(AppRoute::EditCustomer { id: id.clone() });
                        },
                        "Edit Customer"
                    }
                    button {
                        class: "btn btn-danger",
                        disabled: submit.busy(),
                        onclick: move |_| confirming.set(true),
                        "Delete Customer"
                    }
                }
            }
            if confirming() {
                AlertBox {
                    alert: Alert::error("Delete customer", "Are you sure you want to delete this customer?"),
                    on_close: move |_| confirming.set(false),
                    on_confirm: on_confirm_delete,
                }
            }
            if let Some(error) = alert() {
                AlertBox { alert: error, on_close: move |_| alert.set(None) }
            }
        }
    }
}
