//! Models shared between the auth provider, the session and the screens.

pub mod user;

pub use user::UserInfo;
