pub mod api;
pub mod covering;

pub use api::ApiError;
pub use covering::CoveringError;

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde_json::json;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::CoveringError(e) => {
                if matches!(e, CoveringError::TransmitFailure(_)) {
                    tracing::error!("Hardware error: {}", e);
                }
                (e.status_code(), e.to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": status.as_u16(),
                "message": error_message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CoveringError::InvalidPosition(105).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CoveringError::UnknownCovering("missing".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CoveringError::from(rfblinds_embedded::Error::PinUnavailable).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_error_response_status() {
        let response = ApiError::from(CoveringError::InvalidPosition(-5)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
