use super::CoveringError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Covering error: {0}")]
    CoveringError(#[from] CoveringError),
}
