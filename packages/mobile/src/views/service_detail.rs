use api::Backend;
use dioxus::prelude::*;
use store::DocumentId;
use ui::icons::{FaPenToSquare, FaTrashCan};
use ui::{use_live, use_submit, Alert, AlertBox, Icon, ScreenHeader};

use super::{format_time, Missing};
use crate::AppRoute;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Action {
    Edit,
    Delete,
}

#[component]
pub fn ServiceDetail(id: String) -> Element {
    let backend = use_context::<Backend>();
    let nav = use_navigator();
    let doc_id = DocumentId::from(id.as_str());
    let service = use_live(|| backend.services.live_document(doc_id.clone()));
    let mut confirming = use_signal(|| None::<Action>);
    let mut alert = use_signal(|| None::<Alert>);
    let submit = use_submit();

    let Some(service) = service() else {
        return rsx! {
            Missing {
                title: "Service detail",
                message: "This service no longer exists.",
            }
        };
    };

    let services = backend.services.clone();
    let on_confirm = move |_: ()| match confirming.take() {
        Some(Action::Edit) => {
            nav.push(AppRoute::EditService { id: id.clone() });
        }
        Some(Action::Delete) => {
            let services = services.clone();
            let target = doc_id.clone();
            submit.run(async move {
                match services.delete(&target).await {
                    Ok(()) => {
                        tracing::info!(id = %target, "deleted service");
                        nav.go_back();
                    }
                    Err(e) => {
                        tracing::error!("Failed to delete service: {}", e);
                        alert.set(Some(Alert::error(
                            "Error",
                            "Failed to delete service. Please try again.",
                        )));
                    }
                }
            });
        }
        None => {}
    };

    let data = service.data;
    let confirm_alert = confirming().map(|action| match action {
        Action::Edit => Alert::success("Edit service", "Do you want to edit this service?"),
        Action::Delete => Alert::error("Delete service", "Do you want to delete this service?"),
    });

    rsx! {
        div {
            class: "screen",
            ScreenHeader { title: "Service detail", on_back: move |_| nav.go_back() }
            div {
                class: "screen-body",
                DetailRow { label: "Service name:", value: data.name.clone() }
                DetailRow { label: "Price:", value: data.price.to_string() }
                DetailRow { label: "Description:", value: data.description.clone() }
                DetailRow { label: "Duration:", value: format!("{} minutes", data.duration) }
                DetailRow { label: "Category:", value: data.category.to_string() }
                DetailRow { label: "Created:", value: format_time(data.created_at) }
                DetailRow { label: "Last updated:", value: format_time(data.updated_at()) }

                div {
                    class: "action-row",
                    button {
                        class: "btn btn-primary",
                        disabled: submit.busy(),
                        onclick: move |_| confirming.set(Some(Action::Edit)),
                        Icon { icon: FaPenToSquare, width: 14, height: 14 }
                        " Edit"
                    }
                    button {
                        class: "btn btn-danger",
                        disabled: submit.busy(),
                        onclick: move |_| confirming.set(Some(Action::Delete)),
                        Icon { icon: FaTrashCan, width: 14, height: 14 }
                        " Delete"
                    }
                }
            }
            if let Some(confirm_alert) = confirm_alert {
                AlertBox {
                    alert: confirm_alert,
                    on_close: move |_| confirming.set(None),
                    on_confirm,
                }
            }
            if let Some(error) = alert() {
                AlertBox { alert: error, on_close: move |_| alert.set(None) }
            }
        }
    }
}

#[component]
pub(crate) fn DetailRow(label: String, value: String) -> Element {
    rsx! {
        div {
            class: "detail-row",
            span { class: "detail-label", "{label}" }
            span { class: "detail-value", "{value}" }
        }
    }
}
