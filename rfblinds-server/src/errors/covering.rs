use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum CoveringError {
    #[error("Invalid position {0}, expected a value between 0 and 100")]
    InvalidPosition(i32),

    #[error("Unknown covering {0}")]
    UnknownCovering(String),

    #[error("Duplicate covering {0}")]
    DuplicateCovering(String),

    #[error("Transmit failure: {0}")]
    TransmitFailure(#[from] rfblinds_embedded::Error),
}

impl CoveringError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CoveringError::InvalidPosition(_) => StatusCode::BAD_REQUEST,
            CoveringError::UnknownCovering(_) => StatusCode::NOT_FOUND,
            CoveringError::DuplicateCovering(_) => StatusCode::CONFLICT,
            CoveringError::TransmitFailure(_) => StatusCode::BAD_GATEWAY,
        }
    }
}
