mod handlers;
mod router;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::error;

use stayhub_lambda_shared::{
    init_context, init_tracing, ApiConfig, ApiContext, ApiResponse, GatewayRequest,
};

pub use router::{route, AVAILABLE_HOTELS_PATH};

/// Entry point used by the Lambda runtime.
pub async fn run() -> Result<(), Error> {
    init_tracing();

    // Build the store client once; every invocation shares it.
    let config = ApiConfig::from_env();
    let context = init_context(&config).await?;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let context = context.clone();
        async move { handler(&context, event).await }
    }))
    .await
}

/// Lambda handler invoked per request.
pub async fn handler(context: &ApiContext, event: LambdaEvent<Value>) -> Result<ApiResponse, Error> {
    let request_id = event.context.request_id.clone();

    let request: GatewayRequest = match serde_json::from_value(event.payload) {
        Ok(req) => req,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "failed to parse gateway event");
            return Ok(ApiResponse::error(
                http::StatusCode::BAD_REQUEST,
                format!("invalid request: {}", e),
            ));
        }
    };

    Ok(route(context, &request, &request_id).await)
}
