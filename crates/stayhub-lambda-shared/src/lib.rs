//! Shared infrastructure for the StayHub AWS Lambda function.
//!
//! This crate provides the pieces every handler needs around the core
//! library:
//!
//! - [`ApiConfig`]: region, table names and endpoint override read from the environment
//! - [`ApiContext`]: the process-wide store handle and repositories, built once at cold start
//! - [`init_tracing`]: JSON-formatted tracing for CloudWatch Logs
//! - [`GatewayRequest`] / [`ApiResponse`]: the API Gateway proxy envelope
//! - [`ErrorBody`]: the `{"error": "..."}` body returned for every failure
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides an in-memory context and request
//! builders for handler testing. Enable the `test-utils` feature to access it
//! from dependent crates.

#![deny(warnings)]

mod config;
mod requests;
mod response;
mod runtime;
mod tracing_init;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ApiConfig, TableNames};
pub use requests::{GatewayRequest, RequestError};
pub use response::{ApiResponse, ErrorBody, MESSAGE_METHOD_NOT_ALLOWED};
pub use runtime::{init_context, ApiContext, InitError};
pub use tracing_init::{init_tracing, LogFormat};
