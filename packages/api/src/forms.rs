//! # Form input for the edit screens
//!
//! Screens hold raw text in a form struct and call `validate` on submit. A
//! failing validation returns [`FieldErrors`] keyed by field name, shown inline
//! next to the inputs, and nothing is written to the store.
//!
//! A valid form yields a draft. Drafts turn into records with `create(now)` for
//! a new document or `apply(existing, now)` for an edit, which keeps the
//! creation time and never moves it after the update time.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use store::{Customer, Price, Profile, Service, ServiceCategory};

pub const REQUIRED: &str = "This field is required";

/// Validation messages keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.keys().copied().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for FieldErrors {}

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Record a required-field error when `value` is blank; returns the trimmed value.
    fn require(&mut self, field: &'static str, value: &str) -> String {
        let value = value.trim();
        if value.is_empty() {
            self.insert(field, REQUIRED);
        }
        value.to_string()
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServiceForm {
    pub name: String,
    pub price: String,
    pub description: String,
    pub duration: String,
    pub category: String,
}

/// A validated service, not yet stamped with times.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceDraft {
    pub name: String,
    pub price: Price,
    pub description: String,
    pub duration: NonZeroU32,
    pub category: ServiceCategory,
}

impl ServiceForm {
    /// Form prefilled from a stored service, for the edit screen.
    pub fn from_service(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            price: service.price.amount().normalize().to_string(),
            description: service.description.clone(),
            duration: service.duration.to_string(),
            category: service.category.label().to_string(),
        }
    }

    pub fn validate(&self) -> Result<ServiceDraft, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = errors.require("name", &self.name);
        let description = errors.require("description", &self.description);

        let raw_price = errors.require("price", &self.price);
        let price = match Decimal::from_str(&raw_price) {
            Ok(amount) => match Price::new(amount) {
                Ok(price) => Some(price),
                Err(_) => {
                    errors.insert("price", "Price must not be negative");
                    None
                }
            },
            Err(_) => {
                errors.insert("price", "Price must be a number");
                None
            }
        };

        let raw_duration = errors.require("duration", &self.duration);
        let duration = match raw_duration.parse::<NonZeroU32>() {
            Ok(minutes) => Some(minutes),
            Err(_) => {
                errors.insert("duration", "Duration must be a whole number of minutes");
                None
            }
        };

        let raw_category = errors.require("category", &self.category);
        let category = match raw_category.parse::<ServiceCategory>() {
            Ok(category) => Some(category),
            Err(e) => {
                errors.insert("category", e.to_string());
                None
            }
        };

        match (price, duration, category) {
            (Some(price), Some(duration), Some(category)) => errors.finish(|| ServiceDraft {
                name,
                price,
                description,
                duration,
                category,
            }),
            _ => Err(errors),
        }
    }
}

impl ServiceDraft {
    pub fn create(self, now: DateTime<Utc>) -> Service {
        Service {
            name: self.name,
            price: self.price,
            description: self.description,
            duration: self.duration,
            category: self.category,
            created_at: now,
            updated_at: None,
        }
    }

    /// Edited copy of `existing`. The creation time is kept.
    pub fn apply(self, existing: &Service, now: DateTime<Utc>) -> Service {
        Service {
            name: self.name,
            price: self.price,
            description: self.description,
            duration: self.duration,
            category: self.category,
            created_at: existing.created_at,
            updated_at: Some(now.max(existing.created_at)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CustomerForm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerForm {
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
        }
    }

    pub fn validate(&self) -> Result<CustomerDraft, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = errors.require("name", &self.name);
        let email = errors.require("email", &self.email);
        let phone = errors.require("phone", &self.phone);
        errors.finish(|| CustomerDraft { name, email, phone })
    }
}

impl CustomerDraft {
    pub fn create(self, now: DateTime<Utc>) -> Customer {
        Customer {
            name: self.name,
            email: self.email,
            phone: self.phone,
            created_at: now,
        }
    }

    pub fn apply(self, existing: &Customer) -> Customer {
        Customer {
            name: self.name,
            email: self.email,
            phone: self.phone,
            created_at: existing.created_at,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub avatar_url: String,
}

impl ProfileForm {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            address: profile.address.clone(),
            avatar_url: profile.avatar_url.clone(),
        }
    }

    pub fn validate(&self) -> Result<Profile, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = errors.require("name", &self.name);
        let email = errors.require("email", &self.email);
        let phone = errors.require("phone", &self.phone);
        let address = errors.require("address", &self.address);
        let avatar_url = self.avatar_url.trim().to_string();
        errors.finish(|| Profile {
            name,
            email,
            phone,
            address,
            avatar_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use store::{Collection, MemoryStore};

    fn facial_basic_form() -> ServiceForm {
        ServiceForm {
            name: "Facial Basic".to_string(),
            price: "250000".to_string(),
            description: "Deep cleanse and mask".to_string(),
            duration: "60".to_string(),
            category: "Facial".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        "2024-05-01T10:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_service_form_requires_every_field() {
        let errors = ServiceForm::default().validate().unwrap_err();
        for field in ["name", "price", "description", "duration", "category"] {
            assert_eq!(errors.get(field), Some(REQUIRED), "{field}");
        }
    }

    #[test]
    fn test_service_form_rejects_bad_values() {
        let mut form = facial_basic_form();
        form.price = "-1".to_string();
        form.duration = "0".to_string();
        form.category = "Tattoo".to_string();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("price"), Some("Price must not be negative"));
        assert!(errors.get("duration").is_some());
        assert!(errors.get("category").unwrap().contains("Tattoo"));
        assert!(errors.get("name").is_none());
    }

    #[test]
    fn test_service_form_round_trips_through_from_service() {
        let service = facial_basic_form().validate().unwrap().create(now());
        assert_eq!(ServiceForm::from_service(&service), facial_basic_form());
    }

    #[test]
    fn test_apply_keeps_created_before_updated() {
        let existing = facial_basic_form().validate().unwrap().create(now());
        let edited = facial_basic_form()
            .validate()
            .unwrap()
            .apply(&existing, now() + Duration::minutes(5));
        assert_eq!(edited.created_at, existing.created_at);
        assert_eq!(edited.updated_at(), now() + Duration::minutes(5));

        // A clock behind the creation time does not reorder the stamps.
        let skewed = facial_basic_form()
            .validate()
            .unwrap()
            .apply(&existing, now() - Duration::hours(1));
        assert!(skewed.created_at <= skewed.updated_at());
    }

    #[tokio::test]
    async fn test_added_service_reads_back() {
        let services = Collection::<_, Service>::new(MemoryStore::new());
        let created = services
            .add(facial_basic_form().validate().unwrap().create(now()))
            .await
            .unwrap();

        let loaded = services.get(&created.id).await.unwrap().unwrap();
        assert_eq!(loaded.data.name, "Facial Basic");
        assert_eq!(loaded.data.price.amount(), Decimal::from(250_000));
        assert_eq!(loaded.data.duration.get(), 60);
        assert_eq!(loaded.data.category, ServiceCategory::Facial);
        assert!(loaded.data.created_at <= loaded.data.updated_at());
    }

    #[tokio::test]
    async fn test_invalid_category_writes_nothing() {
        let services = Collection::<_, Service>::new(MemoryStore::new());
        let mut live = services.live();

        let mut form = facial_basic_form();
        form.category = "Tattoo".to_string();
        if let Ok(draft) = form.validate() {
            services.add(draft.create(now())).await.unwrap();
        }
        assert!(live.current().is_empty());
    }

    #[test]
    fn test_customer_form() {
        let form = CustomerForm {
            name: " Lan ".to_string(),
            email: "lan@mail.test".to_string(),
            phone: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("phone"), Some(REQUIRED));
        assert_eq!(errors.len(), 1);

        let form = CustomerForm {
            phone: "0901234567".to_string(),
            ..form
        };
        let customer = form.validate().unwrap().create(now());
        assert_eq!(customer.name, "Lan");

        let edited = CustomerForm {
            name: "Lan Anh".to_string(),
            ..CustomerForm::from_customer(&customer)
        }
        .validate()
        .unwrap()
        .apply(&customer);
        assert_eq!(edited.created_at, customer.created_at);
        assert_eq!(edited.name, "Lan Anh");
    }

    #[test]
    fn test_profile_avatar_is_optional() {
        let form = ProfileForm {
            name: "Hoa".to_string(),
            email: "hoa@mail.test".to_string(),
            phone: "0900000000".to_string(),
            address: "12 Le Loi".to_string(),
            avatar_url: String::new(),
        };
        let profile = form.validate().unwrap();
        assert_eq!(profile.avatar_url, "");
        assert_eq!(ProfileForm::from_profile(&profile), form);

        let errors = ProfileForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.get("avatar_url").is_none());
    }
}
