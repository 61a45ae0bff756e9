use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use stayhub_lib::{
    find_available_hotels, Error, HotelRepository, Item, Key, MemoryStore, Store, StoreError,
};

async fn seeded_hotels() -> HotelRepository {
    let repo = HotelRepository::with_default_table(Arc::new(
        MemoryStore::new().with_table("hotel", "hotelId"),
    ));

    for (id, city, available) in [("1", "NYC", 0), ("2", "NYC", 3), ("3", "LA", 5)] {
        let body = json!({
            "hotelId": id,
            "name": format!("Hotel {id}"),
            "city": city,
            "totalRooms": 10,
            "availableRooms": available
        });
        repo.create(&body.to_string()).await.expect("seed hotel");
    }

    repo
}

/// Store whose every call fails, to exercise error paths.
struct UnreachableStore;

fn unreachable(operation: &'static str, table: &str) -> StoreError {
    StoreError::Backend {
        operation,
        table: table.to_string(),
        message: "connection refused".to_string(),
    }
}

#[async_trait]
impl Store for UnreachableStore {
    async fn get(&self, table: &str, _key: &Key) -> Result<Option<Item>, StoreError> {
        Err(unreachable("GetItem", table))
    }

    async fn put(&self, table: &str, _item: Item) -> Result<(), StoreError> {
        Err(unreachable("PutItem", table))
    }

    async fn delete(&self, table: &str, _key: &Key) -> Result<(), StoreError> {
        Err(unreachable("DeleteItem", table))
    }

    async fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError> {
        Err(unreachable("Scan", table))
    }
}

#[tokio::test]
async fn returns_only_city_matches_with_free_rooms() {
    let repo = seeded_hotels().await;

    let hotels = find_available_hotels(&repo, "2024-01-01", "NYC")
        .await
        .unwrap();

    assert_eq!(hotels.len(), 1);
    assert_eq!(hotels[0].hotel_id, "2");
    assert_eq!(hotels[0].available_rooms, 3);
}

#[tokio::test]
async fn empty_city_yields_empty_result() {
    let repo = seeded_hotels().await;
    let hotels = find_available_hotels(&repo, "2024-01-01", "").await.unwrap();
    assert!(hotels.is_empty());
}

#[tokio::test]
async fn date_does_not_narrow_the_result() {
    let repo = seeded_hotels().await;

    let january = find_available_hotels(&repo, "2024-01-01", "LA").await.unwrap();
    let december = find_available_hotels(&repo, "2030-12-31", "LA").await.unwrap();

    assert_eq!(january, december);
}

#[tokio::test]
async fn invalid_date_fails_regardless_of_data() {
    let repo = seeded_hotels().await;
    let err = find_available_hotels(&repo, "not-a-date", "NYC")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidDateFormat { .. }));

    // Validation happens before the store is consulted.
    let broken = HotelRepository::with_default_table(Arc::new(UnreachableStore));
    let err = find_available_hotels(&broken, "not-a-date", "NYC")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid date format");
}

#[tokio::test]
async fn store_failure_surfaces_as_fetch_error() {
    let broken = HotelRepository::with_default_table(Arc::new(UnreachableStore));
    let err = find_available_hotels(&broken, "2024-01-01", "NYC")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::FetchFailed(_)));
    assert!(err.is_internal());
}

#[tokio::test]
async fn create_proceeds_when_existence_check_fails_but_write_errors() {
    let broken = HotelRepository::with_default_table(Arc::new(UnreachableStore));
    let err = broken
        .create(r#"{"hotelId":"h1","city":"NYC"}"#)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::WriteFailed(_)));

    let err = broken
        .update(r#"{"hotelId":"h1","city":"NYC"}"#)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotExists { .. }));
}
