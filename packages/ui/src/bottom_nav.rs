use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaHouse, FaUser, FaUsers};
use dioxus_free_icons::Icon;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Home,
    Customers,
    Profile,
}

/// Tab bar along the bottom of the top-level screens.
#[component]
pub fn BottomNav(active: Tab, on_select: EventHandler<Tab>) -> Element {
    let class = move |tab: Tab| {
        if tab == active {
            "bottom-nav-item bottom-nav-item-active"
        } else {
            "bottom-nav-item"
        }
    };

    rsx! {
        nav {
            class: "bottom-nav",
            button {
                class: class(Tab::Home),
                onclick: move |_| on_select.call(Tab::Home),
                Icon { icon: FaHouse, width: 18, height: 18 }
                span { "Home" }
            }
            button {
                class: class(Tab::Customers),
                onclick: move |_| on_select.call(Tab::Customers),
                Icon { icon: FaUsers, width: 18, height: 18 }
                span { "Customers" }
            }
            button {
                class: class(Tab::Profile),
                onclick: move |_| on_select.call(Tab::Profile),
                Icon { icon: FaUser, width: 18, height: 18 }
                span { "Profile" }
            }
        }
    }
}
