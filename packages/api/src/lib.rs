//! # API crate: session, navigation state and screen logic for the salon app
//!
//! Everything the screens do that is not rendering lives here, so it can be
//! tested without a UI runtime. The `ui` and `mobile` crates bridge these types
//! into Dioxus signals.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Auth provider contract, store-backed credential provider, password hashing |
//! | [`backend`] | Collections and provider opened over the file store at launch |
//! | [`config`] | Environment configuration (`SALON_*` variables, `.env`) |
//! | [`forms`] | Form validation and record drafts for the edit screens |
//! | [`models`] | The signed-in user reference (`UserInfo`) |
//! | [`navigation`] | Which navigation tree is mounted, derived from the session |
//! | [`session`] | The session observer and its state |
//! | [`submit`] | Double-submit guard for write-triggering actions |

pub mod auth;
pub mod backend;
pub mod config;
pub mod forms;
pub mod models;
pub mod navigation;
pub mod session;
pub mod submit;

pub use auth::{login_identifier, AuthError, AuthProvider, LocalAuth};
pub use backend::{Backend, BackendError};
pub use config::{AppConfig, ConfigError, StaffAccount};
pub use forms::{CustomerForm, FieldErrors, ProfileForm, ServiceForm};
pub use models::UserInfo;
pub use navigation::{Gate, RootNavigator, Transition};
pub use session::{SessionObserver, SessionState};
pub use submit::{SubmitGuard, SubmitTicket};
