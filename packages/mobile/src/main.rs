use std::rc::Rc;

use api::{AppConfig, Backend, BackendError, Gate, SessionObserver};
use dioxus::prelude::*;
use store::Subscription;
use ui::{use_gate, SessionProvider, Splash, SALON_NAME};
use views::{
    AccountProfile, AddCustomer, AddService, CustomerDetail, Customers, EditCustomer,
    EditService, Home, Login, ServiceDetail,
};

mod views;

/// Screens reachable while signed in.
#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum AppRoute {
    #[route("/")]
    Home {},
    #[route("/service/:id")]
    ServiceDetail { id: String },
    #[route("/service/:id/edit")]
    EditService { id: String },
    #[route("/add-service")]
    AddService {},
    #[route("/customers")]
    Customers {},
    #[route("/add-customer")]
    AddCustomer {},
    #[route("/customer/:id")]
    CustomerDetail { id: String },
    #[route("/customer/:id/edit")]
    EditCustomer { id: String },
    #[route("/profile")]
    AccountProfile {},
}

/// Screens reachable while signed out.
#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum AuthRoute {
    #[route("/")]
    Login {},
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    // A subscriber may already be installed by the platform launcher.
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();

    dioxus::launch(App);
}

/// Everything opened once at launch.
#[derive(Clone)]
struct Started {
    backend: Backend,
    observer: SessionObserver,
    session: Rc<Subscription>,
}

fn start() -> Result<Started, BackendError> {
    let backend = Backend::open(AppConfig::from_env()?)?;
    let (observer, session) = SessionObserver::start(&backend.auth);
    Ok(Started {
        backend,
        observer,
        session: Rc::new(session),
    })
}

#[component]
fn App() -> Element {
    let started = use_hook(|| {
        start().map_err(|e| {
            tracing::error!("Failed to start: {}", e);
            e.to_string()
        })
    });

    let session = started.as_ref().ok().map(|s| Rc::clone(&s.session));
    use_drop(move || {
        if let Some(session) = session {
            session.cancel();
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: ui::MAIN_CSS }
        match started {
            Ok(Started { backend, observer, .. }) => rsx! {
                Shell { backend, observer }
            },
            Err(message) => rsx! {
                div {
                    class: "fatal",
                    h1 { "Unable to start" }
                    p { "{message}" }
                }
            },
        }
    }
}

#[component]
fn Shell(backend: Backend, observer: SessionObserver) -> Element {
    use_hook(|| {
        let backend = backend.clone();
        spawn(async move {
            if let Err(e) = backend.seed_staff().await {
                tracing::error!("Failed to register staff account: {}", e);
            }
        });
    });
    use_context_provider(|| backend);

    rsx! {
        SessionProvider { observer, Root {} }
    }
}

/// Mounts exactly one navigation tree, chosen by the session gate.
#[component]
fn Root() -> Element {
    let gate = use_gate();

    match gate() {
        Gate::Pending => rsx! {
            Splash { title: SALON_NAME.to_string() }
        },
        Gate::Unauthenticated => rsx! {
            Router::<AuthRoute> {}
        },
        Gate::Authenticated => rsx! {
            Router::<AppRoute> {}
        },
    }
}
