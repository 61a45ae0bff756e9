//! Lambda context initialization.
//!
//! The store client is created once per process at cold start and shared by
//! every invocation through [`ApiContext`]. The context is immutable after
//! construction and cheap to clone.
//!
//! # Cold-Start Performance
//!
//! `init_context` logs `init_ms`, the time spent loading the SDK
//! configuration and building the client.

use std::sync::Arc;
use std::time::Instant;

use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::Region;
use tracing::{error, info};

use stayhub_lib::{BookingRepository, DynamoStore, HotelRepository, Store, UserRepository};

use crate::config::{ApiConfig, TableNames};

/// Error during context initialization.
#[derive(Debug, Clone)]
pub struct InitError {
    pub message: String,
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lambda initialization failed: {}", self.message)
    }
}

impl std::error::Error for InitError {}

/// Shared state for all invocations: one repository per entity over a
/// single store handle.
#[derive(Clone)]
pub struct ApiContext {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    users: UserRepository,
    hotels: HotelRepository,
    bookings: BookingRepository,
    tables: TableNames,
}

impl ApiContext {
    /// Build a context over any store.
    pub fn with_store(store: Arc<dyn Store>, tables: &TableNames) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                users: UserRepository::new(Arc::clone(&store), tables.user.clone()),
                hotels: HotelRepository::new(Arc::clone(&store), tables.hotel.clone()),
                bookings: BookingRepository::new(store, tables.booking.clone()),
                tables: tables.clone(),
            }),
        }
    }

    pub fn users(&self) -> &UserRepository {
        &self.inner.users
    }

    pub fn hotels(&self) -> &HotelRepository {
        &self.inner.hotels
    }

    pub fn bookings(&self) -> &BookingRepository {
        &self.inner.bookings
    }

    pub fn tables(&self) -> &TableNames {
        &self.inner.tables
    }
}

impl std::fmt::Debug for ApiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiContext")
            .field("tables", &self.inner.tables)
            .finish()
    }
}

/// Build the DynamoDB-backed context from configuration.
///
/// Fails when no region can be resolved, since every store call would fail
/// later anyway.
pub async fn init_context(config: &ApiConfig) -> Result<ApiContext, InitError> {
    let start = Instant::now();

    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint.clone());
    }
    let sdk_config = loader.load().await;

    let Some(region) = sdk_config.region() else {
        let err = InitError {
            message: "no AWS region configured; set AWS_REGION".to_string(),
        };
        error!(error = %err, "Lambda context initialization failed");
        return Err(err);
    };

    info!(
        region = %region,
        endpoint = config.endpoint_url.as_deref().unwrap_or("default"),
        "DynamoDB client configured"
    );

    let store = DynamoStore::new(aws_sdk_dynamodb::Client::new(&sdk_config));
    let context = ApiContext::with_store(Arc::new(store), &config.tables);

    info!(
        init_ms = start.elapsed().as_millis() as u64,
        user_table = %config.tables.user,
        hotel_table = %config.tables.hotel,
        booking_table = %config.tables.booking,
        "Lambda context initialization complete"
    );

    Ok(context)
}
