use thiserror::Error;

use crate::model::EntityKind;
use crate::store::StoreError;

/// Convenient result alias for the StayHub library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// The display strings are returned verbatim to API clients, so they stay
/// short and free of internal detail. The underlying cause is kept as the
/// error source for logging.
#[derive(Debug, Error)]
pub enum Error {
    /// The request body could not be parsed as the record shape.
    #[error("invalid {entity} data")]
    InvalidData {
        entity: EntityKind,
        #[source]
        source: serde_json::Error,
    },

    /// Raised by create when a record with the same key is already stored.
    #[error("{entity} already exists")]
    AlreadyExists { entity: EntityKind },

    /// Raised by update when no record with the given key is stored.
    #[error("{entity} does not exist")]
    NotExists { entity: EntityKind },

    /// A get or scan against the store failed.
    #[error("failed to fetch record")]
    FetchFailed(#[source] StoreError),

    /// Stored items could not be converted into the record shape.
    #[error("failed to unmarshal record")]
    DecodeFailed(#[source] serde_json::Error),

    /// A record could not be converted into a store item.
    #[error("could not marshal item")]
    MarshalFailed(#[source] serde_json::Error),

    /// The upsert of a record failed.
    #[error("could not put item")]
    WriteFailed(#[source] StoreError),

    /// The delete of a record failed.
    #[error("could not delete item")]
    DeleteFailed(#[source] StoreError),

    /// The availability search date is not a `YYYY-MM-DD` calendar date.
    #[error("invalid date format")]
    InvalidDateFormat { value: String },
}

impl Error {
    /// True for failures caused by the store or by stored data rather than
    /// by the caller's input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Error::FetchFailed(_)
                | Error::DecodeFailed(_)
                | Error::MarshalFailed(_)
                | Error::WriteFailed(_)
                | Error::DeleteFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_entity() {
        let err = Error::AlreadyExists {
            entity: EntityKind::Hotel,
        };
        assert_eq!(err.to_string(), "hotel already exists");

        let err = Error::NotExists {
            entity: EntityKind::Booking,
        };
        assert_eq!(err.to_string(), "booking does not exist");
    }

    #[test]
    fn invalid_data_keeps_parse_error_as_source() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::InvalidData {
            entity: EntityKind::User,
            source: parse_err,
        };
        assert_eq!(err.to_string(), "invalid user data");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn store_failures_are_internal() {
        let err = Error::FetchFailed(StoreError::TableNotFound {
            table: "hotel".to_string(),
        });
        assert!(err.is_internal());
        assert!(!Error::NotExists {
            entity: EntityKind::Hotel
        }
        .is_internal());
    }
}
