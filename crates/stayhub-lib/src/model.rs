//! Record types stored by the API.
//!
//! Wire JSON and stored items share the same camelCase field names. Missing
//! fields decode to their zero value, so an update body that omits a field
//! clears it.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The three entity types served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Hotel,
    Booking,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::User, EntityKind::Hotel, EntityKind::Booking];

    /// Lowercase entity name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Hotel => "hotel",
            EntityKind::Booking => "booking",
        }
    }

    /// Name of the partition key attribute, also used as the query parameter.
    pub fn key_attribute(self) -> &'static str {
        match self {
            EntityKind::User => "userId",
            EntityKind::Hotel => "hotelId",
            EntityKind::Booking => "bookingId",
        }
    }

    /// Table name used when none is configured.
    pub fn default_table(self) -> &'static str {
        self.name()
    }

    /// Gateway resource path that serves this entity.
    pub fn resource_path(self) -> &'static str {
        match self {
            EntityKind::User => "/user",
            EntityKind::Hotel => "/hotel",
            EntityKind::Booking => "/booking",
        }
    }

    /// Resolve a gateway resource path to an entity.
    pub fn from_resource(resource: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.resource_path() == resource)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value stored in one table and keyed by a single string attribute.
///
/// `Default` is the zero value returned by lookups that find nothing; its
/// key is empty.
pub trait Record: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    /// The unique key of this record.
    fn key(&self) -> &str;

    /// Whether this record represents a stored value rather than the zero value.
    fn exists(&self) -> bool {
        !self.key().is_empty()
    }
}

/// A user account. Profile fields are carried through as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub user_id: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl Record for User {
    const KIND: EntityKind = EntityKind::User;

    fn key(&self) -> &str {
        &self.user_id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hotel {
    pub hotel_id: String,
    pub name: String,
    pub city: String,
    pub total_rooms: i64,
    /// Not checked against `total_rooms`.
    pub available_rooms: i64,
}

impl Record for Hotel {
    const KIND: EntityKind = EntityKind::Hotel;

    fn key(&self) -> &str {
        &self.hotel_id
    }
}

/// A booking of a hotel by a user. Referenced ids are not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Booking {
    pub booking_id: String,
    pub user_id: String,
    pub hotel_id: String,
    pub check_in: String,
    pub check_out: String,
}

impl Record for Booking {
    const KIND: EntityKind = EntityKind::Booking;

    fn key(&self) -> &str {
        &self.booking_id
    }
}
