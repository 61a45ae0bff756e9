//! Hotel availability search.
//!
//! A search names a city and a date. The date must be a `YYYY-MM-DD`
//! calendar date, but it does not narrow the result: availability is the
//! hotel's current `availableRooms` count, with no per-date inventory behind
//! it.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::Hotel;
use crate::repository::HotelRepository;

/// Format accepted for the search date.
pub const SEARCH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a search date, rejecting anything that is not `YYYY-MM-DD`.
///
/// The year must have four digits and month and day two, with no sign or
/// surrounding whitespace. `%Y-%m-%d` alone also accepts `2024-1-1` and
/// `+2024-01-01`, so the parsed date must format back to the input.
pub fn parse_search_date(value: &str) -> Result<NaiveDate> {
    let invalid = || Error::InvalidDateFormat {
        value: value.to_string(),
    };

    let date = NaiveDate::parse_from_str(value, SEARCH_DATE_FORMAT).map_err(|_| invalid())?;
    if date.format(SEARCH_DATE_FORMAT).to_string() != value {
        return Err(invalid());
    }

    Ok(date)
}

/// Keep the hotels in `city` that have at least one available room.
///
/// The city must match exactly, so an empty city matches nothing. Input
/// order is preserved.
pub fn filter_available(hotels: impl IntoIterator<Item = Hotel>, city: &str) -> Vec<Hotel> {
    hotels
        .into_iter()
        .filter(|hotel| hotel.city == city && hotel.available_rooms > 0)
        .collect()
}

/// Validate `date`, then return the available hotels in `city`.
///
/// The date is checked before the store is touched, so an invalid date fails
/// with [`Error::InvalidDateFormat`] whatever the stored data.
pub async fn find_available_hotels(
    hotels: &HotelRepository,
    date: &str,
    city: &str,
) -> Result<Vec<Hotel>> {
    let date = parse_search_date(date)?;
    let all = hotels.fetch_all().await?;
    let total = all.len();
    let available = filter_available(all, city);

    debug!(
        %date,
        city,
        scanned = total,
        matched = available.len(),
        "availability search complete"
    );

    Ok(available)
}
