//! API error type rendered as a fixed-shape JSON body.

use crate::models::ErrorResponse;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};

/// Errors surfaced to API clients
///
/// Every variant renders as `{"error": "<message>"}` with the matching
/// status code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Latitude and longitude are required")]
    MissingCoordinates,

    #[error("{0}")]
    InvalidCoordinates(String),

    #[error("OpenWeatherMap API key not found")]
    MissingApiKey,

    #[error("Failed to fetch ISS data")]
    IssUnavailable,

    #[error("Failed to fetch weather data")]
    WeatherUnavailable,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingCoordinates | ApiError::InvalidCoordinates(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::MissingApiKey | ApiError::IssUnavailable | ApiError::WeatherUnavailable => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingCoordinates.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidCoordinates("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::MissingApiKey.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::IssUnavailable.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_error_body_shape() {
        let response = ApiError::WeatherUnavailable.error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Failed to fetch weather data"}));
    }
}
