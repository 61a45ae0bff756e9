//! StayHub library entry points.
//!
//! This crate holds the record types for users, hotels and bookings, the
//! key-value [`Store`] abstraction with its DynamoDB and in-memory backends,
//! and the per-entity [`Repository`] that enforces the existence rules for
//! create, update and delete. Higher-level consumers (Lambdas) should only
//! depend on the items exported here instead of talking to the store directly.
//!

#![deny(warnings)]

pub mod availability;
pub mod error;
pub mod model;
pub mod repository;
pub mod store;

pub use availability::{filter_available, find_available_hotels, parse_search_date};
pub use error::{Error, Result};
pub use model::{Booking, EntityKind, Hotel, Record, User};
pub use repository::{BookingRepository, HotelRepository, Repository, UserRepository};
pub use store::{DynamoStore, Item, Key, MemoryStore, Store, StoreError};
