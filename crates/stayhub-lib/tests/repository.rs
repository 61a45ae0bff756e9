use std::sync::Arc;

use serde_json::json;

use stayhub_lib::{
    BookingRepository, EntityKind, Error, Hotel, HotelRepository, MemoryStore, Record,
    UserRepository,
};

fn memory_store() -> Arc<MemoryStore> {
    let store = MemoryStore::new();
    for kind in EntityKind::ALL {
        store.create_table(kind.default_table(), kind.key_attribute());
    }
    Arc::new(store)
}

fn hotel_body(id: &str, city: &str, available: i64) -> String {
    json!({
        "hotelId": id,
        "name": format!("Hotel {id}"),
        "city": city,
        "totalRooms": 20,
        "availableRooms": available
    })
    .to_string()
}

#[tokio::test]
async fn created_hotel_is_returned_by_fetch_one() {
    let repo = HotelRepository::with_default_table(memory_store());

    let created = repo.create(&hotel_body("h1", "NYC", 4)).await.unwrap();
    let fetched = repo.fetch_one("h1").await.unwrap();

    assert_eq!(created, fetched);
    assert_eq!(fetched.available_rooms, 4);
}

#[tokio::test]
async fn created_user_and_booking_round_trip() {
    let store = memory_store();
    let users = UserRepository::with_default_table(store.clone());
    let bookings = BookingRepository::with_default_table(store);

    let user = users
        .create(r#"{"userId":"u1","email":"ada@example.com","firstName":"Ada"}"#)
        .await
        .unwrap();
    assert_eq!(users.fetch_one("u1").await.unwrap(), user);

    let booking = bookings
        .create(
            r#"{"bookingId":"b1","userId":"u1","hotelId":"h1","checkIn":"2024-01-01","checkOut":"2024-01-03"}"#,
        )
        .await
        .unwrap();
    assert_eq!(bookings.fetch_one("b1").await.unwrap(), booking);
}

#[tokio::test]
async fn duplicate_create_fails_and_leaves_store_unchanged() {
    let store = memory_store();
    let repo = HotelRepository::with_default_table(store.clone());

    repo.create(&hotel_body("h1", "NYC", 4)).await.unwrap();
    let before = store.snapshot("hotel").unwrap();

    let err = repo.create(&hotel_body("h1", "LA", 9)).await.unwrap_err();
    assert!(matches!(
        err,
        Error::AlreadyExists {
            entity: EntityKind::Hotel
        }
    ));
    assert_eq!(err.to_string(), "hotel already exists");
    assert_eq!(store.snapshot("hotel").unwrap(), before);
}

#[tokio::test]
async fn update_of_unknown_booking_fails() {
    let repo = BookingRepository::with_default_table(memory_store());

    let err = repo
        .update(r#"{"bookingId":"b404","userId":"u1","hotelId":"h1"}"#)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::NotExists {
            entity: EntityKind::Booking
        }
    ));
    assert_eq!(err.to_string(), "booking does not exist");
    assert!(!repo.fetch_one("b404").await.unwrap().exists());
}

#[tokio::test]
async fn update_replaces_the_whole_record() {
    let repo = HotelRepository::with_default_table(memory_store());
    repo.create(&hotel_body("h1", "NYC", 4)).await.unwrap();

    let updated = repo
        .update(r#"{"hotelId":"h1","city":"Boston"}"#)
        .await
        .unwrap();
    let stored = repo.fetch_one("h1").await.unwrap();

    assert_eq!(updated, stored);
    assert_eq!(
        stored,
        Hotel {
            hotel_id: "h1".to_string(),
            city: "Boston".to_string(),
            ..Hotel::default()
        }
    );
}

#[tokio::test]
async fn update_replaces_user_profile_fields() {
    let repo = UserRepository::with_default_table(memory_store());
    repo.create(r#"{"userId":"u1","email":"old@example.com","phone":"555"}"#)
        .await
        .unwrap();

    repo.update(r#"{"userId":"u1","email":"new@example.com"}"#)
        .await
        .unwrap();

    let user = repo.fetch_one("u1").await.unwrap();
    assert_eq!(user.profile.get("email"), Some(&json!("new@example.com")));
    assert!(user.profile.get("phone").is_none());
}

#[tokio::test]
async fn update_rejects_malformed_body() {
    let repo = UserRepository::with_default_table(memory_store());
    let err = repo.update("").await.unwrap_err();
    assert_eq!(err.to_string(), "invalid user data");
}

#[tokio::test]
async fn delete_of_unknown_key_is_a_noop() {
    let store = memory_store();
    let repo = HotelRepository::with_default_table(store.clone());
    repo.create(&hotel_body("h1", "NYC", 4)).await.unwrap();

    repo.delete("h404").await.unwrap();

    assert_eq!(store.len("hotel"), Some(1));
}

#[tokio::test]
async fn delete_removes_the_record() {
    let repo = HotelRepository::with_default_table(memory_store());
    repo.create(&hotel_body("h1", "NYC", 4)).await.unwrap();

    repo.delete("h1").await.unwrap();

    assert!(!repo.fetch_one("h1").await.unwrap().exists());
    assert!(repo.fetch_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_with_empty_key_fails() {
    let repo = HotelRepository::with_default_table(memory_store());
    let err = repo.delete("").await.unwrap_err();
    assert!(matches!(err, Error::DeleteFailed(_)));
    assert_eq!(err.to_string(), "could not delete item");
}

#[tokio::test]
async fn fetch_all_returns_every_record() {
    let repo = HotelRepository::with_default_table(memory_store());
    for id in ["h3", "h1", "h2"] {
        repo.create(&hotel_body(id, "NYC", 1)).await.unwrap();
    }

    let mut ids: Vec<_> = repo
        .fetch_all()
        .await
        .unwrap()
        .into_iter()
        .map(|h| h.hotel_id)
        .collect();
    ids.sort();
    assert_eq!(ids, ["h1", "h2", "h3"]);
}

#[tokio::test]
async fn repositories_honour_configured_table_names() {
    let store = Arc::new(MemoryStore::new().with_table("prod-hotels", "hotelId"));
    let repo = HotelRepository::new(store.clone(), "prod-hotels");

    repo.create(&hotel_body("h1", "NYC", 1)).await.unwrap();

    assert_eq!(repo.table(), "prod-hotels");
    assert_eq!(store.len("prod-hotels"), Some(1));
}
