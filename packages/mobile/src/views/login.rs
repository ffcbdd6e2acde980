use api::Backend;
use dioxus::prelude::*;
use ui::icons::{FaEye, FaEyeSlash};
use ui::{use_submit, FormErrorMessage, Icon};

#[component]
pub fn Login() -> Element {
    let backend = use_context::<Backend>();
    let mut phone = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut show_password = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let submit = use_submit();

    let handle_login = move |_| {
        let backend = backend.clone();
        let (number, secret) = (phone(), password());
        error.set(None);
        submit.run(async move {
            // On success the session gate swaps this screen out.
            if let Err(e) = backend.sign_in_with_phone(&number, &secret).await {
                tracing::warn!("Sign-in failed: {}", e);
                error.set(Some(e.user_message()));
            }
        });
    };

    rsx! {
        div {
            class: "login",
            h1 { class: "login-title", "Login" }
            div {
                class: "form-field",
                input {
                    class: "form-input",
                    r#type: "tel",
                    placeholder: "Phone",
                    value: phone(),
                    oninput: move |evt: FormEvent| phone.set(evt.value()),
                }
            }
            div {
                class: "form-field password-row",
                input {
                    class: "form-input",
                    r#type: if show_password() { "text" } else { "password" },
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
                button {
                    class: "icon-button",
                    title: if show_password() { "Hide password" } else { "Show password" },
                    onclick: move |_| show_password.toggle(),
                    if show_password() {
                        Icon { icon: FaEyeSlash, width: 18, height: 18 }
                    } else {
                        Icon { icon: FaEye, width: 18, height: 18 }
                    }
                }
            }
            FormErrorMessage { message: error() }
            button {
                class: "btn btn-primary btn-block",
                disabled: submit.busy(),
                onclick: handle_login,
                if submit.busy() { "Signing in..." } else { "Login" }
            }
        }
    }
}
