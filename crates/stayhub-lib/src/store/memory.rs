//! In-process [`Store`] used by tests and local runs.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use serde_json::Value;

use super::{Item, Key, Store, StoreError};

/// A set of in-memory tables, each keyed by one string attribute.
///
/// Mirrors the DynamoDB behaviour callers can observe: unknown tables and
/// empty key values are errors, deleting an absent key is not, and `put`
/// replaces the whole item. Scans return items in ascending key order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, MemoryTable>>,
}

#[derive(Debug)]
struct MemoryTable {
    key_attribute: String,
    items: BTreeMap<String, Item>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty table keyed by `key_attribute`.
    pub fn with_table(self, table: impl Into<String>, key_attribute: impl Into<String>) -> Self {
        self.create_table(table, key_attribute);
        self
    }

    /// Register an empty table, replacing any existing table of the same name.
    pub fn create_table(&self, table: impl Into<String>, key_attribute: impl Into<String>) {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        tables.insert(
            table.into(),
            MemoryTable {
                key_attribute: key_attribute.into(),
                items: BTreeMap::new(),
            },
        );
    }

    /// Number of items currently held in `table`, or `None` for unknown tables.
    pub fn len(&self, table: &str) -> Option<usize> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables.get(table).map(|t| t.items.len())
    }

    /// Copy of every item in `table`, in key order.
    pub fn snapshot(&self, table: &str) -> Option<Vec<Item>> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables
            .get(table)
            .map(|t| t.items.values().cloned().collect())
    }
}

fn table_not_found(table: &str) -> StoreError {
    StoreError::TableNotFound {
        table: table.to_string(),
    }
}

fn invalid_key(table: &str, message: impl Into<String>) -> StoreError {
    StoreError::InvalidKey {
        table: table.to_string(),
        message: message.into(),
    }
}

impl MemoryTable {
    fn check_key<'k>(&self, table: &str, key: &'k Key) -> Result<&'k str, StoreError> {
        if key.attribute != self.key_attribute {
            return Err(invalid_key(
                table,
                format!(
                    "expected key attribute {}, got {}",
                    self.key_attribute, key.attribute
                ),
            ));
        }
        if key.value.is_empty() {
            return Err(invalid_key(table, "key value cannot be empty"));
        }
        Ok(&key.value)
    }

    fn item_key(&self, table: &str, item: &Item) -> Result<String, StoreError> {
        match item.get(&self.key_attribute) {
            Some(Value::String(value)) if !value.is_empty() => Ok(value.clone()),
            Some(Value::String(_)) => Err(invalid_key(table, "key value cannot be empty")),
            Some(_) => Err(invalid_key(
                table,
                format!("key attribute {} must be a string", self.key_attribute),
            )),
            None => Err(invalid_key(
                table,
                format!("item is missing key attribute {}", self.key_attribute),
            )),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, table: &str, key: &Key) -> Result<Option<Item>, StoreError> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        let memory = tables.get(table).ok_or_else(|| table_not_found(table))?;
        let value = memory.check_key(table, key)?;
        Ok(memory.items.get(value).cloned())
    }

    async fn put(&self, table: &str, item: Item) -> Result<(), StoreError> {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let memory = tables.get_mut(table).ok_or_else(|| table_not_found(table))?;
        let value = memory.item_key(table, &item)?;
        memory.items.insert(value, item);
        Ok(())
    }

    async fn delete(&self, table: &str, key: &Key) -> Result<(), StoreError> {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let memory = tables.get_mut(table).ok_or_else(|| table_not_found(table))?;
        let value = memory.check_key(table, key)?;
        memory.items.remove(value);
        Ok(())
    }

    async fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        let memory = tables.get(table).ok_or_else(|| table_not_found(table))?;
        Ok(memory.items.values().cloned().collect())
    }
}
