//! AWS Lambda function for the StayHub API.
//!
//! Serves `/user`, `/hotel` (including `/hotel/available`) and `/booking`
//! behind an API Gateway REST proxy integration.

use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    stayhub_lambda_api::run().await
}
