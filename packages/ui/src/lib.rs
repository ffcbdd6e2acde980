//! This crate contains all shared UI for the salon app.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Shown in the home header and on the splash screen.
pub const SALON_NAME: &str = "HUYỀN TRINH";

mod session;
pub use session::{use_gate, use_session, SessionProvider};

mod live;
pub use live::use_live;

mod alert_box;
pub use alert_box::{Alert, AlertBox, AlertKind};

mod form;
pub use form::{FormErrorMessage, FormField};

mod service_item;
pub use service_item::ServiceItem;

mod customer_item;
pub use customer_item::CustomerItem;

mod search_bar;
pub use search_bar::SearchBar;

mod screen_header;
pub use screen_header::ScreenHeader;

mod bottom_nav;
pub use bottom_nav::{BottomNav, Tab};

mod splash;
pub use splash::Splash;

mod submit;
pub use submit::{use_submit, Submit};
