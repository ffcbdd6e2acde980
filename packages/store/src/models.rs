//! # Record types for the salon collections
//!
//! Every collection has an explicit schema. [`Record::decode`] is the store
//! boundary: a document that is missing a field, carries the wrong type, names
//! a category outside [`ServiceCategory`], or has a zero duration fails with a
//! [`DecodeError`] instead of flowing into the UI half-formed.
//!
//! | Struct | Collection | Ordered by |
//! |--------|-----------|------------|
//! | [`Service`] | `services` | `createdAt` |
//! | [`Customer`] | `customers` | `createdAt` |
//! | [`Profile`] | `users` (keyed by session user id) | none |

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::document::{Document, DocumentId, Fields};
use crate::error::{DecodeError, StoreError};

/// A typed view of one collection's documents.
pub trait Record: Serialize + DeserializeOwned {
    /// Collection the records live in.
    const COLLECTION: &'static str;
    /// Field subscriptions order by, newest first.
    const ORDER_BY: Option<&'static str> = Some("createdAt");

    fn encode(&self) -> Result<Fields, StoreError> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(fields) => Ok(fields),
            _ => Err(StoreError::Encode {
                collection: Self::COLLECTION.to_string(),
            }),
        }
    }

    fn decode(doc: &Document) -> Result<Stored<Self>, DecodeError> {
        let data = serde_json::from_value(serde_json::Value::Object(doc.fields.clone()))
            .map_err(|source| DecodeError {
                collection: Self::COLLECTION.to_string(),
                id: doc.id.clone(),
                source,
            })?;
        Ok(Stored {
            id: doc.id.clone(),
            data,
        })
    }
}

/// A record together with the id the store assigned it.
#[derive(Clone, Debug, PartialEq)]
pub struct Stored<T> {
    pub id: DocumentId,
    pub data: T,
}

/// The fixed set of service categories offered by the salon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceCategory {
    #[default]
    Facial,
    Massage,
    #[serde(rename = "Hair Care")]
    HairCare,
    #[serde(rename = "Nail Care")]
    NailCare,
    #[serde(rename = "Body Treatment")]
    BodyTreatment,
    Other,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 6] = [
        Self::Facial,
        Self::Massage,
        Self::HairCare,
        Self::NailCare,
        Self::BodyTreatment,
        Self::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Facial => "Facial",
            Self::Massage => "Massage",
            Self::HairCare => "Hair Care",
            Self::NailCare => "Nail Care",
            Self::BodyTreatment => "Body Treatment",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ServiceCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A non-negative, currency-agnostic amount.
///
/// Stored as a decimal string so every digit survives the round trip. Plain
/// JSON numbers are still accepted when decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("price must not be negative, got {0}")]
pub struct NegativePrice(pub Decimal);

impl Price {
    pub fn new(amount: Decimal) -> Result<Self, NegativePrice> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(NegativePrice(amount));
        }
        Ok(Self(amount))
    }

    pub fn amount(self) -> Decimal {
        self.0
    }

    /// Render with `.` thousands separators and `,` decimals, e.g. `250.000`.
    pub fn grouped(self) -> String {
        let normalized = self.0.normalize().to_string();
        let (int_part, frac_part) = match normalized.split_once('.') {
            Some((i, f)) => (i.to_string(), Some(f.to_string())),
            None => (normalized, None),
        };

        let digits: Vec<char> = int_part.chars().collect();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.iter().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(*ch);
        }

        match frac_part {
            Some(frac) => format!("{grouped},{frac}"),
            None => grouped,
        }
    }
}

impl TryFrom<Decimal> for Price {
    type Error = NegativePrice;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} đ", self.grouped())
    }
}

/// A service on the salon's menu.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub name: String,
    pub price: Price,
    pub description: String,
    /// Minutes.
    pub duration: NonZeroU32,
    pub category: ServiceCategory,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Service {
    /// Time of the last modification; the creation time if never modified.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

impl Record for Service {
    const COLLECTION: &'static str = "services";
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl Record for Customer {
    const COLLECTION: &'static str = "customers";
}

/// Account profile of the signed-in staff member.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(rename = "avatarURL", default)]
    pub avatar_url: String,
}

impl Record for Profile {
    const COLLECTION: &'static str = "users";
    const ORDER_BY: Option<&'static str> = None;
}
