//! Per-entity data access over a [`Store`].
//!
//! A [`Repository`] is bound to one table and one record type. It translates
//! between request bodies, records and store items, and enforces the
//! existence rules:
//!
//! - `create` rejects a key that is already stored,
//! - `update` rejects a key that is not stored,
//! - `delete` never checks.
//!
//! The existence check is a plain read followed by an unconditional upsert.
//! Two concurrent creates (or an update racing a delete) for the same key can
//! both pass the check; the last write wins.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{Booking, Hotel, Record, User};
use crate::store::{Item, Key, Store};

pub type UserRepository = Repository<User>;
pub type HotelRepository = Repository<Hotel>;
pub type BookingRepository = Repository<Booking>;

/// Data access for one record type stored in one table.
pub struct Repository<R> {
    store: Arc<dyn Store>,
    table: String,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for Repository<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            table: self.table.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> fmt::Debug for Repository<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("entity", &R::KIND)
            .field("table", &self.table)
            .finish()
    }
}

impl<R: Record> Repository<R> {
    pub fn new(store: Arc<dyn Store>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
            _record: PhantomData,
        }
    }

    /// Repository over the entity's default table name.
    pub fn with_default_table(store: Arc<dyn Store>) -> Self {
        Self::new(store, R::KIND.default_table())
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn key(&self, value: &str) -> Key {
        Key::new(R::KIND.key_attribute(), value)
    }

    /// Every record in the table, in store scan order.
    pub async fn fetch_all(&self) -> Result<Vec<R>> {
        let items = self
            .store
            .scan(&self.table)
            .await
            .map_err(Error::FetchFailed)?;

        debug!(table = %self.table, count = items.len(), "scanned records");

        items.into_iter().map(decode::<R>).collect()
    }

    /// The record stored under `key`.
    ///
    /// A lookup that finds nothing returns the zero value, whose key is
    /// empty; use [`Record::exists`] to tell the two apart.
    pub async fn fetch_one(&self, key: &str) -> Result<R> {
        let item = self
            .store
            .get(&self.table, &self.key(key))
            .await
            .map_err(Error::FetchFailed)?;

        match item {
            Some(item) => decode(item),
            None => Ok(R::default()),
        }
    }

    /// Parse `body` and store it as a new record.
    pub async fn create(&self, body: &str) -> Result<R> {
        let record = parse::<R>(body)?;

        if self.is_stored(record.key()).await {
            return Err(Error::AlreadyExists { entity: R::KIND });
        }

        self.write(&record).await?;
        debug!(table = %self.table, key = record.key(), "record created");
        Ok(record)
    }

    /// Parse `body` and store it over an existing record.
    ///
    /// The stored record is replaced by the parsed body as a whole; fields
    /// missing from the body are stored as zero values.
    pub async fn update(&self, body: &str) -> Result<R> {
        let record = parse::<R>(body)?;

        if !self.is_stored(record.key()).await {
            return Err(Error::NotExists { entity: R::KIND });
        }

        self.write(&record).await?;
        debug!(table = %self.table, key = record.key(), "record updated");
        Ok(record)
    }

    /// Remove the record stored under `key`. Absent keys are not an error.
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.store
            .delete(&self.table, &self.key(key))
            .await
            .map_err(Error::DeleteFailed)?;
        debug!(table = %self.table, key, "record deleted");
        Ok(())
    }

    /// Existence check ahead of a write. A failed lookup counts as absent.
    async fn is_stored(&self, key: &str) -> bool {
        match self.fetch_one(key).await {
            Ok(current) => current.exists(),
            Err(err) => {
                warn!(table = %self.table, key, error = %err, "existence check failed");
                false
            }
        }
    }

    async fn write(&self, record: &R) -> Result<()> {
        let item = encode(record)?;
        self.store
            .put(&self.table, item)
            .await
            .map_err(Error::WriteFailed)
    }
}

fn parse<R: Record>(body: &str) -> Result<R> {
    serde_json::from_str(body).map_err(|source| Error::InvalidData {
        entity: R::KIND,
        source,
    })
}

fn decode<R: Record>(item: Item) -> Result<R> {
    serde_json::from_value(Value::Object(item)).map_err(Error::DecodeFailed)
}

fn encode<R: Record>(record: &R) -> Result<Item> {
    match serde_json::to_value(record).map_err(Error::MarshalFailed)? {
        Value::Object(item) => Ok(item),
        other => Err(Error::MarshalFailed(serde::ser::Error::custom(format!(
            "record encoded as {other} instead of an object"
        )))),
    }
}
