// Error types shared by the store and the API layer

use hyper::StatusCode;
use thiserror::Error;

/// Failures reported by a [`crate::store::RecipeStore`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("recipe not found: {0}")]
    NotFound(String),

    #[error("recipe already exists: {0}")]
    AlreadyExists(String),

    #[error("internal store error: {0}")]
    Internal(String),
}

/// Failures surfaced to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("recipe name '{0}' does not produce a valid identifier")]
    InvalidName(String),

    #[error("failed to read request body: {0}")]
    BodyRead(String),

    #[error("request body exceeds {0} bytes")]
    PayloadTooLarge(u64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Decode(_) | Self::NotAnObject | Self::InvalidName(_) | Self::BodyRead(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::AlreadyExists(_)) => StatusCode::CONFLICT,
            Self::Store(StoreError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
