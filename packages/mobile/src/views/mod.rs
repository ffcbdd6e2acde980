use chrono::{DateTime, Local, Utc};
use dioxus::prelude::*;
use ui::{BottomNav, Tab};

use crate::AppRoute;

mod home;
pub use home::Home;

mod service_detail;
pub use service_detail::ServiceDetail;

mod service_form;
pub use service_form::{AddService, EditService};

mod customers;
pub use customers::Customers;

mod customer_detail;
pub use customer_detail::CustomerDetail;

mod customer_form;
pub use customer_form::{AddCustomer, EditCustomer};

mod account_profile;
pub use account_profile::AccountProfile;

mod login;
pub use login::Login;

/// Timestamps are shown in the device's local time.
pub(crate) fn format_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string()
}

/// Bottom navigation for the top-level screens. Switching tabs replaces the
/// current entry instead of stacking another one.
#[component]
pub(crate) fn AppTabs(active: Tab) -> Element {
    let nav = use_navigator();

    rsx! {
        BottomNav {
            active,
            on_select: move |tab: Tab| {
                let route = match tab {
                    Tab::Home => AppRoute::Home {},
                    Tab::Customers => AppRoute::Customers {},
                    Tab::Profile => AppRoute::AccountProfile {},
                };
                nav.replace(route);
            },
        }
    }
}

/// Shown when a route names a record that does not exist (anymore).
#[component]
pub(crate) fn Missing(title: String, message: String) -> Element {
    let nav = use_navigator();

    rsx! {
        div {
            class: "screen",
            ui::ScreenHeader { title, on_back: move |_| nav.go_back() }
            div {
                class: "screen-body",
                p { class: "empty-state", "{message}" }
            }
        }
    }
}
