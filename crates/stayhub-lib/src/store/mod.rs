//! Key-value store abstraction.
//!
//! Repositories only need four primitives from the backing store: a point
//! lookup, an upsert, a delete and a full scan. [`Store`] captures exactly
//! that, so repository logic runs unchanged against DynamoDB in Lambda and
//! against [`MemoryStore`] in tests and local runs.
//!
//! Items cross the trait boundary as JSON objects. Backends are responsible
//! for converting them into their native representation.

mod dynamodb;
mod memory;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

pub use dynamodb::DynamoStore;
pub use memory::MemoryStore;

/// A stored item as a JSON object keyed by attribute name.
pub type Item = Map<String, Value>;

/// Partition key of an item: attribute name and string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub attribute: String,
    pub value: String,
}

impl Key {
    pub fn new(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}

/// Errors raised by store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The named table does not exist.
    #[error("table {table} not found")]
    TableNotFound { table: String },

    /// The key (or the key attribute of an item) is missing, empty or not a string.
    #[error("invalid key for table {table}: {message}")]
    InvalidKey { table: String, message: String },

    /// A stored attribute has a type that cannot be represented as JSON.
    #[error("unsupported attribute {attribute}: {message}")]
    UnsupportedAttribute { attribute: String, message: String },

    /// The backend call itself failed.
    #[error("{operation} on table {table} failed: {message}")]
    Backend {
        operation: &'static str,
        table: String,
        message: String,
    },
}

/// The capability set repositories depend on.
///
/// `put` is an unconditional upsert and `delete` of an absent key succeeds.
/// No operation is conditional or transactional.
#[async_trait]
pub trait Store: Send + Sync {
    /// Look up one item by key. Absent items are `Ok(None)`.
    async fn get(&self, table: &str, key: &Key) -> Result<Option<Item>, StoreError>;

    /// Insert or fully replace an item.
    async fn put(&self, table: &str, item: Item) -> Result<(), StoreError>;

    /// Remove an item by key.
    async fn delete(&self, table: &str, key: &Key) -> Result<(), StoreError>;

    /// Read every item in a table.
    async fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError>;
}
