use api::{AuthProvider, Backend, FieldErrors, ProfileForm, UserInfo};
use dioxus::prelude::*;
use store::{DocumentId, Profile};
use ui::{use_live, use_session, use_submit, Alert, AlertBox, FormField, ScreenHeader, Tab};

use super::service_detail::DetailRow;
use super::AppTabs;

#[component]
pub fn AccountProfile() -> Element {
    let session = use_session();
    let (uid, user) = {
        let state = session.read();
        (state.profile_id(), state.user.clone())
    };
    let (Some(uid), Some(user)) = (uid, user) else {
        return rsx! {};
    };

    // Keyed so a different user gets a fresh card and a fresh live query.
    rsx! {
        ProfileCard { key: "{uid}", uid, user }
    }
}

#[component]
fn ProfileCard(uid: DocumentId, user: UserInfo) -> Element {
    let backend = use_context::<Backend>();
    let nav = use_navigator();
    let profile = use_live(|| backend.profiles.live_document(uid.clone()));

    let mut editing = use_signal(|| false);
    let mut form = use_signal(ProfileForm::default);
    let mut errors = use_signal(FieldErrors::default);
    let mut alert = use_signal(|| None::<Alert>);
    let mut confirming_logout = use_signal(|| false);
    let submit = use_submit();

    let current = profile().map(|p| p.data).unwrap_or_else(|| Profile {
        email: user.email.clone(),
        ..Profile::default()
    });

    let start_editing = {
        let current = current.clone();
        move |_| {
            form.set(ProfileForm::from_profile(&current));
            errors.set(FieldErrors::default());
            editing.set(true);
        }
    };

    let profiles = backend.profiles.clone();
    let save = move |_| {
        let updated = match form.read().validate() {
            Ok(profile) => profile,
            Err(invalid) => {
                errors.set(invalid);
                return;
            }
        };
        errors.set(FieldErrors::default());
        let profiles = profiles.clone();
        let uid = uid.clone();
        submit.run(async move {
            // Upsert: the document may not exist yet for a new account.
            match profiles.set(&uid, &updated).await {
                Ok(()) => {
                    tracing::info!(%uid, "saved profile");
                    editing.set(false);
                    alert.set(Some(Alert::success("Success", "Profile updated successfully!")));
                }
                Err(e) => {
                    tracing::error!("Failed to update profile: {}", e);
                    alert.set(Some(Alert::error(
                        "Error",
                        "Failed to update profile. Please try again.",
                    )));
                }
            }
        });
    };

    let auth = backend.auth.clone();
    let logout = move |_: ()| {
        confirming_logout.set(false);
        let auth = auth.clone();
        submit.run(async move {
            if let Err(e) = auth.sign_out().await {
                tracing::error!("Failed to sign out: {}", e);
                alert.set(Some(Alert::error("Error", e.to_string())));
            }
        });
    };

    let error = move |field: &str| errors.read().get(field).map(str::to_string);
    let draft = form.read().clone();

    rsx! {
        div {
            class: "screen",
            ScreenHeader { title: "Account Profile", on_back: move |_| nav.go_back() }
            div {
                class: "screen-body",
                if !current.avatar_url.is_empty() {
                    img { class: "avatar", src: "{current.avatar_url}", alt: "Avatar" }
                } else {
                    div { class: "avatar" }
                }

                if editing() {
                    FormField {
                        id: "profile-name",
                        label: "Name",
                        value: draft.name,
                        oninput: move |v: String| form.write().name = v,
                        error: error("name"),
                    }
                    FormField {
                        id: "profile-email",
                        label: "Email",
                        input_type: "email",
                        value: draft.email,
                        oninput: move |v: String| form.write().email = v,
                        error: error("email"),
                    }
                    FormField {
                        id: "profile-phone",
                        label: "Phone",
                        input_type: "tel",
                        value: draft.phone,
                        oninput: move |v: String| form.write().phone = v,
                        error: error("phone"),
                    }
                    FormField {
                        id: "profile-address",
                        label: "Address",
                        value: draft.address,
                        oninput: move |v: String| form.write().address = v,
                        error: error("address"),
                    }
                    FormField {
                        id: "profile-avatar",
                        label: "Avatar URL",
                        placeholder: "https://",
                        input_type: "url",
                        value: draft.avatar_url,
                        oninput: move |v: String| form.write().avatar_url = v,
                        error: error("avatar_url"),
                    }
                    div {
                        class: "action-row",
                        button {
                            class: "btn btn-primary",
                            disabled: submit.busy(),
                            onclick: save,
                            if submit.busy() { "Saving..." } else { "Save Changes" }
                        }
                        button {
                            class: "btn btn-outline",
                            disabled: submit.busy(),
                            onclick: move |_| editing.set(false),
                            "Cancel"
                        }
                    }
                } else {
                    DetailRow { label: "Name", value: current.name.clone() }
                    DetailRow { label: "Email", value: current.email.clone() }
                    DetailRow { label: "Phone", value: current.phone.clone() }
                    DetailRow { label: "Address", value: current.address.clone() }
                    button {
                        class: "btn btn-primary btn-block",
                        onclick: start_editing,
                        "Edit Profile"
                    }
                }

                button {
                    class: "btn btn-danger btn-block",
                    disabled: submit.busy(),
                    onclick: move |_| confirming_logout.set(true),
                    "Logout"
                }
            }
            AppTabs { active: Tab::Profile }
            if confirming_logout() {
                AlertBox {
                    alert: Alert::error("Logout", "Are you sure you want to log out?"),
                    on_close: move |_| confirming_logout.set(false),
                    on_confirm: logout,
                }
            }
            if let Some(message) = alert() {
                AlertBox { alert: message, on_close: move |_| alert.set(None) }
            }
        }
    }
}
