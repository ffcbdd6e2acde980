//! App configuration from environment variables.

use std::path::PathBuf;

const DEFAULT_LOGIN_DOMAIN: &str = "example.com";

/// Staff account registered at start-up when absent.
#[derive(Clone, PartialEq, Eq)]
pub struct StaffAccount {
    pub phone: String,
    pub password: String,
}

impl std::fmt::Debug for StaffAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaffAccount")
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Appended to a phone number to form the sign-in identifier.
    pub login_domain: String,
    pub data_dir: Option<PathBuf>,
    pub staff_account: Option<StaffAccount>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SALON_LOGIN_DOMAIN must not be empty")]
    EmptyLoginDomain,
    #[error("{missing} must be set together with {present}")]
    IncompleteStaffAccount {
        present: &'static str,
        missing: &'static str,
    },
    #[error("no data directory: set SALON_DATA_DIR")]
    NoDataDir,
}

impl AppConfig {
    /// Read configuration from the process environment and a `.env` file if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let login_domain = match lookup("SALON_LOGIN_DOMAIN") {
            Some(domain) if domain.trim().is_empty() => return Err(ConfigError::EmptyLoginDomain),
            Some(domain) => domain.trim().to_string(),
            None => DEFAULT_LOGIN_DOMAIN.to_string(),
        };

        let staff_account = match (var("SALON_STAFF_PHONE"), var("SALON_STAFF_PASSWORD")) {
            (Some(phone), Some(password)) => Some(StaffAccount { phone, password }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::IncompleteStaffAccount {
                    present: "SALON_STAFF_PHONE",
                    missing: "SALON_STAFF_PASSWORD",
                })
            }
            (None, Some(_)) => {
                return Err(ConfigError::IncompleteStaffAccount {
                    present: "SALON_STAFF_PASSWORD",
                    missing: "SALON_STAFF_PHONE",
                })
            }
        };

        Ok(Self {
            login_domain,
            data_dir: var("SALON_DATA_DIR").map(PathBuf::from),
            staff_account,
        })
    }

    /// The configured data directory, else `<platform data dir>/salon`.
    pub fn data_dir_or_default(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join("salon"))
                .ok_or(ConfigError::NoDataDir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.login_domain, "example.com");
        assert!(config.data_dir.is_none());
        assert!(config.staff_account.is_none());
    }

    #[test]
    fn test_full_config() {
        let config = parse(&[
            ("SALON_LOGIN_DOMAIN", "salon.test"),
            ("SALON_DATA_DIR", "/tmp/salon"),
            ("SALON_STAFF_PHONE", "0900000000"),
            ("SALON_STAFF_PASSWORD", "secret"),
        ])
        .unwrap();
        assert_eq!(config.login_domain, "salon.test");
        assert_eq!(config.data_dir_or_default().unwrap(), PathBuf::from("/tmp/salon"));
        let staff = config.staff_account.unwrap();
        assert_eq!(staff.phone, "0900000000");
        assert!(!format!("{staff:?}").contains("secret"));
    }

    #[test]
    fn test_invalid_combinations() {
        assert_eq!(
            parse(&[("SALON_LOGIN_DOMAIN", " ")]).unwrap_err(),
            ConfigError::EmptyLoginDomain
        );
        assert!(matches!(
            parse(&[("SALON_STAFF_PHONE", "0900000000")]).unwrap_err(),
            ConfigError::IncompleteStaffAccount {
                missing: "SALON_STAFF_PASSWORD",
                ..
            }
        ));
        assert!(matches!(
            parse(&[("SALON_STAFF_PASSWORD", "x")]).unwrap_err(),
            ConfigError::IncompleteStaffAccount { .. }
        ));
    }
}
