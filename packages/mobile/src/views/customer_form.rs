use api::forms::CustomerDraft;
use api::{Backend, CustomerForm, FieldErrors};
use chrono::Utc;
use dioxus::prelude::*;
use store::DocumentId;
use ui::{use_live, use_submit, Alert, AlertBox, FormField, ScreenHeader};

use super::Missing;

#[component]
pub fn AddCustomer() -> Element {
    let backend = use_context::<Backend>();
    let nav = use_navigator();
    let mut alert = use_signal(|| None::<Alert>);
    let submit = use_submit();
    let form = use_signal(CustomerForm::default);

    let on_save = move |draft: CustomerDraft| {
        let customers = backend.customers.clone();
        submit.run(async move {
            match customers.add(draft.create(Utc::now())).await {
                Ok(created) => {
                    tracing::info!(id = %created.id, "added customer");
                    nav.go_back();
                }
                Err(e) => {
                    tracing::error!("Failed to add customer: {}", e);
                    alert.set(Some(Alert::error(
                        "Error",
                        "Failed to add customer. Please try again.",
                    )));
                }
            }
        });
    };

    rsx! {
        div {
            class: "screen",
            ScreenHeader { title: "Add Customer", on_back: move |_| nav.go_back() }
            CustomerFormBody { form, busy: submit.busy(), submit_label: "Save Customer", on_save }
            if let Some(error) = alert() {
                AlertBox { alert: error, on_close: move |_| alert.set(None) }
            }
        }
    }
}

#[component]
pub fn EditCustomer(id: String) -> Element {
    let backend = use_context::<Backend>();
    let nav = use_navigator();
    let record = use_live(|| backend.customers.live_document(DocumentId::from(id.as_str())));
    let mut alert = use_signal(|| None::<Alert>);
    let submit = use_submit();
    let form = use_signal(|| {
        record
            .peek()
            .as_ref()
            .map(|c| CustomerForm::from_customer(&c.data))
            .unwrap_or_default()
    });

    if record.read().is_none() {
        return rsx! {
            Missing { title: "Edit Customer", message: "This customer no longer exists." }
        };
    }

    let on_save = move |draft: CustomerDraft| {
        let Some(existing) = record() else {
            return;
        };
        let customers = backend.customers.clone();
        submit.run(async move {
            let updated = draft.apply(&existing.data);
            match customers.update(&existing.id, &updated).await {
                Ok(()) => {
                    tracing::info!(id = %existing.id, "updated customer");
                    nav.go_back();
                }
                Err(e) => {
                    tracing::error!("Failed to update customer: {}", e);
                    alert.set(Some(Alert::error(
                        "Error",
                        "Failed to update customer. Please try again.",
                    )));
                }
            }
        });
    };

    rsx! {
        div {
            class: "screen",
            ScreenHeader { title: "Edit Customer", on_back: move |_| nav.go_back() }
            CustomerFormBody { form, busy: submit.busy(), submit_label: "Save Changes", on_save }
            if let Some(error) = alert() {
                AlertBox { alert: error, on_close: move |_| alert.set(None) }
            }
        }
    }
}

#[component]
fn CustomerFormBody(
    form: Signal<CustomerForm>,
    busy: bool,
    submit_label: String,
    on_save: EventHandler<CustomerDraft>,
) -> Element {
    let mut form = form;
    let mut errors = use_signal(FieldErrors::default);
    let error = move |field: &str| errors.read().get(field).map(str::to_string);

    let handle_submit = move |_| match form.read().validate() {
        Ok(draft) => {
            errors.set(FieldErrors::default());
            on_save.call(draft);
        }
        Err(invalid) => errors.set(invalid),
    };

    let current = form.read().clone();

    rsx! {
        div {
            class: "screen-body",
            FormField {
                id: "customer-name",
                label: "Name",
                placeholder: "Enter customer name",
                value: current.name,
                oninput: move |v: String| form.write().name = v,
                error: error("name"),
            }
            FormField {
                id: "customer-email",
                label: "Email",
                placeholder: "Enter customer email",
                input_type: "email",
                value: current.email,
                oninput: move |v: String| form.write().email = v,
                error: error("email"),
            }
            FormField {
                id: "customer-phone",
                label: "Phone",
                placeholder: "Enter customer phone",
                input_type: "tel",
                value: current.phone,
                oninput: move |v: String| form.write().phone = v,
                error: error("phone"),
            }
            button {
                class: "btn btn-primary btn-block",
                disabled: busy,
                onclick: handle_submit,
                if busy { "Saving..." } else { "{submit_label}" }
            }
        }
    }
}
