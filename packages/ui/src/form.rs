use dioxus::prelude::*;

/// Inline validation message under an input. Renders nothing without a message.
#[component]
pub fn FormErrorMessage(message: Option<String>) -> Element {
    match message {
        Some(message) => rsx! {
            p { class: "form-error", "{message}" }
        },
        None => rsx! {},
    }
}

/// Labelled text input with its validation message.
#[component]
pub fn FormField(
    id: String,
    label: String,
    value: String,
    oninput: EventHandler<String>,
    #[props(default = "".to_string())] placeholder: String,
    #[props(default = "text".to_string())] input_type: String,
    error: Option<String>,
) -> Element {
    rsx! {
        div {
            class: "form-field",
            label { class: "form-label", r#for: "{id}", "{label}" }
            input {
                id: "{id}",
                class: if error.is_some() { "form-input form-input-invalid" } else { "form-input" },
                r#type: "{input_type}",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
            FormErrorMessage { message: error.clone() }
        }
    }
}
