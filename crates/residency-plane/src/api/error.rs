//! API error types and responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use residency_core::ResidencyError;

/// API error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Residency(#[from] ResidencyError),
}

/// API error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
            }
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
                None,
            ),
            ApiError::Residency(err) => match err {
                ResidencyError::UnsupportedJurisdiction(_) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "UNSUPPORTED_JURISDICTION",
                    err.to_string(),
                    None,
                ),
                ResidencyError::MissingAttribute(_) => (
                    StatusCode::BAD_REQUEST,
                    "MISSING_ATTRIBUTE",
                    err.to_string(),
                    None,
                ),
                // Authentication rejections, not server faults: the client
                // can act on them (redirect to the correct regional endpoint)
                ResidencyError::NoResidencyRecord => (
                    StatusCode::FORBIDDEN,
                    "NO_RESIDENCY_RECORD",
                    err.to_string(),
                    None,
                ),
                ResidencyError::WrongRegion { assigned, current } => (
                    StatusCode::FORBIDDEN,
                    "WRONG_REGION",
                    "Your account is not associated with this region. \
                     Please sign in through your home region's endpoint."
                        .to_string(),
                    Some(serde_json::json!({
                        "assigned_region": assigned.as_str(),
                        "current_region": current.as_str(),
                    })),
                ),
                ResidencyError::StoreUnavailable(_) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_UNAVAILABLE",
                    "The residency registry is temporarily unavailable".to_string(),
                    None,
                ),
                ResidencyError::UnknownRegion(_) | ResidencyError::InvalidRegionMap(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    err.to_string(),
                    None,
                ),
            },
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use residency_core::RegionCode;

    #[test]
    fn test_wrong_region_is_a_rejection_not_a_fault() {
        let err = ApiError::from(ResidencyError::WrongRegion {
            assigned: RegionCode::from("ap-southeast-2"),
            current: RegionCode::from("us-east-2"),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_store_unavailable_is_503() {
        let err = ApiError::from(ResidencyError::StoreUnavailable("down".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
