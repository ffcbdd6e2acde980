//! Live search over listed records.
//!
//! Matching is a case-insensitive substring test; an empty (or all-blank)
//! query matches every record.

use crate::models::{Customer, Service};

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn normalize(query: &str) -> Option<String> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Match against name, description or category label.
pub fn service_matches(service: &Service, query: &str) -> bool {
    let Some(needle) = normalize(query) else {
        return true;
    };
    contains(&service.name, &needle)
        || contains(&service.description, &needle)
        || contains(service.category.label(), &needle)
}

/// Match against name, email or phone.
pub fn customer_matches(customer: &Customer, query: &str) -> bool {
    let Some(needle) = normalize(query) else {
        return true;
    };
    contains(&customer.name, &needle)
        || contains(&customer.email, &needle)
        || contains(&customer.phone, &needle)
}
