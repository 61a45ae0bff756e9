//! Test utilities for Lambda handler testing.
//!
//! Provides an in-memory [`ApiContext`], fixture records and request
//! builders so handlers can be exercised without AWS.
//!
//! # Usage
//!
//! ```ignore
//! use stayhub_lambda_shared::test_utils::{memory_context, hotel_json, mock_request_id};
//!
//! #[tokio::test]
//! async fn test_handler() {
//!     let (context, store) = memory_context();
//!     let request_id = mock_request_id("create-hotel");
//!     // ... invoke handler logic
//! }
//! ```

use std::sync::Arc;

use http::Method;
use serde_json::{json, Value};

use stayhub_lib::{EntityKind, MemoryStore};

use crate::config::TableNames;
use crate::requests::GatewayRequest;
use crate::runtime::ApiContext;

/// A context over a fresh [`MemoryStore`] with all three default tables.
///
/// The store is returned as well so tests can inspect it directly.
pub fn memory_context() -> (ApiContext, Arc<MemoryStore>) {
    let store = MemoryStore::new();
    for kind in EntityKind::ALL {
        store.create_table(kind.default_table(), kind.key_attribute());
    }
    let store = Arc::new(store);
    let context = ApiContext::with_store(store.clone(), &TableNames::default());
    (context, store)
}

/// Hotel wire JSON.
pub fn hotel_json(id: &str, city: &str, available_rooms: i64) -> Value {
    json!({
        "hotelId": id,
        "name": format!("Hotel {id}"),
        "city": city,
        "totalRooms": 10,
        "availableRooms": available_rooms
    })
}

/// Booking wire JSON.
pub fn booking_json(id: &str, user_id: &str, hotel_id: &str) -> Value {
    json!({
        "bookingId": id,
        "userId": user_id,
        "hotelId": hotel_id,
        "checkIn": "2024-01-01",
        "checkOut": "2024-01-04"
    })
}

/// User wire JSON.
pub fn user_json(id: &str, email: &str) -> Value {
    json!({
        "userId": id,
        "email": email,
        "firstName": "Test",
        "lastName": "User"
    })
}

/// A request carrying `body` as its JSON body.
pub fn json_request(method: Method, resource: &str, body: &Value) -> GatewayRequest {
    GatewayRequest::new(method, resource).with_body(body.to_string())
}

/// Create a mock request ID for testing.
///
/// Since `lambda_runtime::Context` is non-exhaustive, tests pass the request
/// ID directly where the router needs one.
pub fn mock_request_id(suffix: &str) -> String {
    format!("test-request-{}", suffix)
}
