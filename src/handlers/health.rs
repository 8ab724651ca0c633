//! Health check endpoint handler.

use crate::models::HealthResponse;
use actix_web::{Error, Result, web};
use paperclip::actix::api_v2_operation;

/// Health check endpoint
///
/// Used by load balancers and probes; never touches an upstream.
#[api_v2_operation(
    summary = "Health Check Endpoint",
    description = "Returns the current health status of the API in JSON format.",
    tags("Health")
)]
pub async fn health() -> Result<web::Json<HealthResponse>, Error> {
    Ok(web::Json(HealthResponse {
        status: "OK".to_string(),
        message: "Star gazing API is running".to_string(),
    }))
}
