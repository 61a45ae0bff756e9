//! Request dispatch by resource, then by method.

use http::Method;
use tracing::{info, info_span, Instrument};

use stayhub_lambda_shared::{ApiContext, ApiResponse, GatewayRequest};
use stayhub_lib::{EntityKind, Record, Repository};

use crate::handlers;

/// Literal path of the availability search under the `/hotel` resource.
pub const AVAILABLE_HOTELS_PATH: &str = "/hotel/available";

/// Dispatch one gateway request and return its response.
///
/// The entity is chosen by `resource`, the operation by method. A `GET` on
/// `/hotel` whose literal path is [`AVAILABLE_HOTELS_PATH`] goes to the
/// availability search instead of the plain fetch. Anything unmatched gets
/// the fixed "method not allowed" response.
pub async fn route(context: &ApiContext, request: &GatewayRequest, request_id: &str) -> ApiResponse {
    let span = info_span!(
        "request",
        request_id,
        method = %request.http_method,
        resource = request.resource(),
        path = request.path(),
    );

    async {
        info!("handling request");
        let response = dispatch(context, request).await;
        info!(status = response.status_code, "request complete");
        response
    }
    .instrument(span)
    .await
}

async fn dispatch(context: &ApiContext, request: &GatewayRequest) -> ApiResponse {
    let (Some(kind), Some(method)) = (EntityKind::from_resource(request.resource()), request.method())
    else {
        return ApiResponse::method_not_allowed();
    };

    match kind {
        EntityKind::User => dispatch_entity(context.users(), &method, request).await,
        EntityKind::Hotel => {
            if method == Method::GET && request.path() == AVAILABLE_HOTELS_PATH {
                return handlers::available_hotels(context.hotels(), request).await;
            }
            dispatch_entity(context.hotels(), &method, request).await
        }
        EntityKind::Booking => dispatch_entity(context.bookings(), &method, request).await,
    }
}

async fn dispatch_entity<R: Record>(
    repo: &Repository<R>,
    method: &Method,
    request: &GatewayRequest,
) -> ApiResponse {
    match *method {
        Method::GET => handlers::get(repo, request).await,
        Method::POST => handlers::create(repo, request).await,
        Method::PUT => handlers::update(repo, request).await,
        Method::DELETE => handlers::delete(repo, request).await,
        _ => ApiResponse::method_not_allowed(),
    }
}
