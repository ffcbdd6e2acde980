//! # App backend
//!
//! Bundles the typed collections and the auth provider over one file-backed
//! store. The mobile shell opens it once at launch and provides it to every
//! screen through context; the handles inside are cheap clones sharing state.

use std::sync::Arc;

use store::{Collection, Customer, FileStore, Profile, Service, StoreError};

use crate::auth::{login_identifier, AuthError, AuthProvider, LocalAuth};
use crate::config::{AppConfig, ConfigError};
use crate::models::UserInfo;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to open the data store: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

#[derive(Clone)]
pub struct Backend {
    pub services: Collection<FileStore, Service>,
    pub customers: Collection<FileStore, Customer>,
    pub profiles: Collection<FileStore, Profile>,
    pub auth: LocalAuth<FileStore>,
    pub config: Arc<AppConfig>,
}

impl PartialEq for Backend {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.config, &other.config)
    }
}

impl Backend {
    pub fn open(config: AppConfig) -> Result<Self, BackendError> {
        let dir = config.data_dir_or_default()?;
        tracing::info!(dir = %dir.display(), "opening data store");
        let store = FileStore::open(dir)?;
        Ok(Self {
            services: Collection::new(store.clone()),
            customers: Collection::new(store.clone()),
            profiles: Collection::new(store.clone()),
            auth: LocalAuth::new(store),
            config: Arc::new(config),
        })
    }

    /// Register the configured staff account if it does not exist yet.
    pub async fn seed_staff(&self) -> Result<(), BackendError> {
        let Some(staff) = &self.config.staff_account else {
            return Ok(());
        };
        let identifier = login_identifier(&staff.phone, &self.config.login_domain);
        self.auth.ensure_account(&identifier, &staff.password).await?;
        Ok(())
    }

    /// Sign in with a phone number, mapped to the identifier the provider expects.
    pub async fn sign_in_with_phone(
        &self,
        phone: &str,
        password: &str,
    ) -> Result<UserInfo, AuthError> {
        let identifier = login_identifier(phone, &self.config.login_domain);
        self.auth.sign_in_with_credential(&identifier, password).await
    }
}
