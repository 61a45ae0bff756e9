//! Configuration read once at cold start.
//!
//! # Environment Variables
//!
//! - `AWS_REGION`: region for the DynamoDB client (SDK default chain if unset)
//! - `USER_TABLE`, `HOTEL_TABLE`, `BOOKING_TABLE`: table names
//!   (default `user`, `hotel`, `booking`)
//! - `DYNAMODB_ENDPOINT`: endpoint override, e.g. DynamoDB Local

use stayhub_lib::EntityKind;

/// Table name per entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub user: String,
    pub hotel: String,
    pub booking: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            user: EntityKind::User.default_table().to_string(),
            hotel: EntityKind::Hotel.default_table().to_string(),
            booking: EntityKind::Booking.default_table().to_string(),
        }
    }
}

impl TableNames {
    pub fn get(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::User => &self.user,
            EntityKind::Hotel => &self.hotel,
            EntityKind::Booking => &self.booking,
        }
    }
}

/// Process configuration for the Lambda.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// Region for the store client. `None` defers to the SDK provider chain.
    pub region: Option<String>,
    pub tables: TableNames,
    /// Endpoint override for the store client.
    pub endpoint_url: Option<String>,
}

impl ApiConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = TableNames::default();

        Self {
            region: var("AWS_REGION"),
            tables: TableNames {
                user: var("USER_TABLE").unwrap_or(defaults.user),
                hotel: var("HOTEL_TABLE").unwrap_or(defaults.hotel),
                booking: var("BOOKING_TABLE").unwrap_or(defaults.booking),
            },
            endpoint_url: var("DYNAMODB_ENDPOINT"),
        }
    }
}
