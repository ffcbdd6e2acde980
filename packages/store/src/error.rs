//! Error types for the document store boundary.

use crate::document::DocumentId;

/// A document could not be turned into its typed record.
#[derive(Debug, thiserror::Error)]
#[error("document {collection}/{id} does not match its schema: {source}")]
pub struct DecodeError {
    pub collection: String,
    pub id: DocumentId,
    #[source]
    pub source: serde_json::Error,
}

/// Failure of a store operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document {collection}/{id} not found")]
    NotFound { collection: String, id: DocumentId },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("record for {collection} did not encode to an object")]
    Encode { collection: String },

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage format error: {0}")]
    Serde(#[from] serde_json::Error),
}
