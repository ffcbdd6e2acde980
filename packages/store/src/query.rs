//! Collection queries: which documents a subscription sees and in what order.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::document::{Document, DocumentId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// A collection query with optional ordering and an optional single-document filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    pub collection: String,
    pub order_by: Option<OrderBy>,
    pub document: Option<DocumentId>,
}

impl Query {
    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            collection: name.into(),
            order_by: None,
            document: None,
        }
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    /// Restrict the query to one document id.
    pub fn document(mut self, id: DocumentId) -> Self {
        self.document = Some(id);
        self
    }

    /// Filter and order `documents` according to this query.
    pub fn apply<'a>(&self, documents: impl IntoIterator<Item = &'a Document>) -> Vec<Document> {
        let mut matched: Vec<Document> = documents
            .into_iter()
            .filter(|doc| self.document.as_ref().map_or(true, |id| &doc.id == id))
            .cloned()
            .collect();

        if let Some(order) = &self.order_by {
            matched.sort_by(|a, b| {
                let ordering = match (a.get(&order.field), b.get(&order.field)) {
                    (Some(x), Some(y)) => {
                        let ord = compare_values(x, y);
                        match order.direction {
                            Direction::Ascending => ord,
                            Direction::Descending => ord.reverse(),
                        }
                    }
                    // Missing field sorts last in either direction.
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                };
                ordering.then_with(|| a.id.cmp(&b.id))
            });
        }
        matched
    }
}

/// Compare two field values: timestamps chronologically, numbers numerically,
/// other strings lexically. Values of unrelated kinds compare equal.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => {
            match (x.parse::<DateTime<Utc>>(), y.parse::<DateTime<Utc>>()) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => x.cmp(y),
            }
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, fields: Value) -> Document {
        let Value::Object(fields) = fields else {
            panic!("fields must be an object");
        };
        Document::new(DocumentId::from(id), fields)
    }

    #[test]
    fn test_orders_timestamps_chronologically() {
        // Lexical order would put the fractional one first.
        let docs = vec![
            doc("a", json!({ "createdAt": "2024-05-01T10:00:00Z" })),
            doc("b", json!({ "createdAt": "2024-05-01T10:00:00.5Z" })),
            doc("c", json!({ "createdAt": "2024-04-30T23:59:59Z" })),
        ];
        let query = Query::collection("services").order_by("createdAt", Direction::Descending);
        let ids: Vec<_> = query.apply(&docs).into_iter().map(|d| d.id.to_string()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn test_missing_order_field_sorts_last() {
        let docs = vec![
            doc("a", json!({})),
            doc("b", json!({ "price": 10 })),
            doc("c", json!({ "price": 2 })),
        ];
        let query = Query::collection("services").order_by("price", Direction::Ascending);
        let ids: Vec<_> = query.apply(&docs).into_iter().map(|d| d.id.to_string()).collect();
        assert_eq!(ids, ["c", "b", "a"]);
    }

    #[test]
    fn test_document_filter() {
        let docs = vec![doc("a", json!({})), doc("b", json!({}))];
        let query = Query::collection("users").document(DocumentId::from("b"));
        let matched = query.apply(&docs);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id.as_str(), "b");
    }
}
