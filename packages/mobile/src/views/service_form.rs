use api::forms::ServiceDraft;
use api::{Backend, FieldErrors, ServiceForm};
use chrono::Utc;
use dioxus::prelude::*;
use store::{DocumentId, ServiceCategory};
use ui::{use_live, use_submit, Alert, AlertBox, FormErrorMessage, FormField, ScreenHeader};

use super::Missing;

#[component]
pub fn AddService() -> Element {
    let backend = use_context::<Backend>();
    let nav = use_navigator();
    let mut alert = use_signal(|| None::<Alert>);
    let submit = use_submit();
    let form = use_signal(|| ServiceForm {
        category: ServiceCategory::default().label().to_string(),
        ..ServiceForm::default()
    });

    let on_save = move |draft: ServiceDraft| {
        let services = backend.services.clone();
        submit.run(async move {
            match services.add(draft.create(Utc::now())).await {
                Ok(created) => {
                    tracing::info!(id = %created.id, "added service");
                    nav.go_back();
                }
                Err(e) => {
                    tracing::error!("Failed to add service: {}", e);
                    alert.set(Some(Alert::error(
                        "Error",
                        "Failed to add service. Please try again.",
                    )));
                }
            }
        });
    };

    rsx! {
        div {
            class: "screen",
            ScreenHeader { title: "Add service", on_back: move |_| nav.go_back() }
            ServiceFormBody { form, busy: submit.busy(), submit_label: "Add Service", on_save }
            if let Some(error) = alert() {
                AlertBox { alert: error, on_close: move |_| alert.set(None) }
            }
        }
    }
}

#[component]
pub fn EditService(id: String) -> Element {
    let backend = use_context::<Backend>();
    let nav = use_navigator();
    let record = use_live(|| backend.services.live_document(DocumentId::from(id.as_str())));
    let mut alert = use_signal(|| None::<Alert>);
    let submit = use_submit();
    let form = use_signal(|| {
        record
            .peek()
            .as_ref()
            .map(|s| ServiceForm::from_service(&s.data))
            .unwrap_or_default()
    });

    if record.read().is_none() {
        return rsx! {
            Missing { title: "Edit service", message: "This service no longer exists." }
        };
    }

    let on_save = move |draft: ServiceDraft| {
        let Some(existing) = record() else {
            return;
        };
        let services = backend.services.clone();
        submit.run(async move {
            let updated = draft.apply(&existing.data, Utc::now());
            match services.update(&existing.id, &updated).await {
                Ok(()) => {
                    tracing::info!(id = %existing.id, "updated service");
                    nav.go_back();
                }
                Err(e) => {
                    tracing::error!("Failed to update service: {}", e);
                    alert.set(Some(Alert::error(
                        "Error",
                        "Failed to update service. Please try again.",
                    )));
                }
            }
        });
    };

    rsx! {
        div {
            class: "screen",
            ScreenHeader { title: "Edit service", on_back: move |_| nav.go_back() }
            ServiceFormBody { form, busy: submit.busy(), submit_label: "Save Changes", on_save }
            if let Some(error) = alert() {
                AlertBox { alert: error, on_close: move |_| alert.set(None) }
            }
        }
    }
}

/// Inputs shared by the add and edit screens. Validates on submit and hands
/// the draft up only when every field is valid.
#[component]
fn ServiceFormBody(
    form: Signal<ServiceForm>,
    busy: bool,
    submit_label: String,
    on_save: EventHandler<ServiceDraft>,
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
                id: "service-name",
                label: "Service name",
                placeholder: "Enter service name",
                value: current.name,
                oninput: move |v: String| form.write().name = v,
                error: error("name"),
            }
            FormField {
                id: "service-price",
                label: "Price",
                placeholder: "Enter price",
                input_type: "number",
                value: current.price,
                oninput: move |v: String| form.write().price = v,
                error: error("price"),
            }
            FormField {
                id: "service-description",
                label: "Description",
                placeholder: "Enter description",
                value: current.description,
                oninput: move |v: String| form.write().description = v,
                error: error("description"),
            }
            FormField {
                id: "service-duration",
                label: "Duration (minutes)",
                placeholder: "Enter duration",
                input_type: "number",
                value: current.duration,
                oninput: move |v: String| form.write().duration = v,
                error: error("duration"),
            }
            div {
                class: "form-field",
                label { class: "form-label", r#for: "service-category", "Category" }
                select {
                    id: "service-category",
                    class: "form-select",
                    value: current.category,
                    onchange: move |evt: FormEvent| form.write().category = evt.value(),
                    for category in ServiceCategory::ALL {
                        option { key: "{category}", value: category.label(), "{category}" }
                    }
                }
                FormErrorMessage { message: error("category") }
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
