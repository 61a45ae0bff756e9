//! Per-verb handlers, shared by all three entities.
//!
//! Each handler pulls the key from the query string or the record from the
//! body, calls the repository and maps the outcome to a response. Every
//! repository failure is a 400 with the error message as the body; only the
//! availability search reports store failures as 500.

use http::StatusCode;
use serde::Serialize;
use tracing::{error, warn};

use stayhub_lambda_shared::{ApiResponse, GatewayRequest};
use stayhub_lib::{find_available_hotels, Error, HotelRepository, Record, Repository};

// Query parameters of the availability search.
const DATE_PARAM: &str = "date";
const CITY_PARAM: &str = "city";

/// `GET`: one record when the key parameter is present, else the whole table.
pub(crate) async fn get<R: Record>(repo: &Repository<R>, request: &GatewayRequest) -> ApiResponse {
    let key = request.query_or_empty(R::KIND.key_attribute());
    if !key.is_empty() {
        return respond(repo.fetch_one(key).await, StatusCode::OK);
    }

    respond(repo.fetch_all().await, StatusCode::OK)
}

/// `POST`: create the record in the body.
pub(crate) async fn create<R: Record>(
    repo: &Repository<R>,
    request: &GatewayRequest,
) -> ApiResponse {
    let body = match request.body_text() {
        Ok(body) => body,
        Err(e) => return ApiResponse::error(StatusCode::BAD_REQUEST, e.to_string()),
    };
    respond(repo.create(&body).await, StatusCode::CREATED)
}

/// `PUT`: replace the stored record with the one in the body.
pub(crate) async fn update<R: Record>(
    repo: &Repository<R>,
    request: &GatewayRequest,
) -> ApiResponse {
    let body = match request.body_text() {
        Ok(body) => body,
        Err(e) => return ApiResponse::error(StatusCode::BAD_REQUEST, e.to_string()),
    };
    respond(repo.update(&body).await, StatusCode::OK)
}

/// `DELETE`: remove the record named by the key parameter.
pub(crate) async fn delete<R: Record>(
    repo: &Repository<R>,
    request: &GatewayRequest,
) -> ApiResponse {
    let key = request.query_or_empty(R::KIND.key_attribute());
    match repo.delete(key).await {
        Ok(()) => ApiResponse::empty(StatusCode::OK),
        Err(err) => failure(&err, StatusCode::BAD_REQUEST),
    }
}

/// `GET /hotel/available?date=YYYY-MM-DD&city=`.
pub(crate) async fn available_hotels(
    hotels: &HotelRepository,
    request: &GatewayRequest,
) -> ApiResponse {
    let date = request.query_or_empty(DATE_PARAM);
    let city = request.query_or_empty(CITY_PARAM);

    match find_available_hotels(hotels, date, city).await {
        Ok(available) => ApiResponse::json(StatusCode::OK, &available),
        Err(err) => match &err {
            Error::InvalidDateFormat { value } => {
                warn!(date = %value, "availability search date rejected");
                ApiResponse::error(StatusCode::BAD_REQUEST, err.to_string())
            }
            _ => failure(&err, StatusCode::INTERNAL_SERVER_ERROR),
        },
    }
}

fn respond<T: Serialize>(result: stayhub_lib::Result<T>, status: StatusCode) -> ApiResponse {
    match result {
        Ok(value) => ApiResponse::json(status, &value),
        Err(err) => failure(&err, StatusCode::BAD_REQUEST),
    }
}

fn failure(err: &Error, status: StatusCode) -> ApiResponse {
    let cause = std::error::Error::source(err).map(|source| source.to_string());
    if err.is_internal() {
        error!(error = %err, cause = cause.as_deref(), "store operation failed");
    } else {
        warn!(error = %err, cause = cause.as_deref(), "request rejected");
    }
    ApiResponse::error(status, err.to_string())
}
