// errors.rs
use astra::Response;
use thiserror::Error;

use crate::api::ApiError;
use crate::domain::DateError;
use crate::exports::ExportError;
use crate::store::StoreError;

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (remote API, exports).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("{0}")]
    InvalidDate(#[from] DateError),
    /// The remote service no longer accepts the session. Handled by tearing
    /// the local session down rather than rendering a page.
    #[error("Session expired")]
    Unauthenticated,
    #[error("Record service unavailable: {0}")]
    RemoteUnavailable(String),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) | ServerError::InvalidDate(_) => 400,
            ServerError::Unauthenticated => 401,
            ServerError::RemoteUnavailable(_) => 502,
            ServerError::Export(_) | ServerError::InternalError => 500,
        }
    }
}

impl From<ApiError> for ServerError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthenticated => ServerError::Unauthenticated,
            other => ServerError::RemoteUnavailable(other.to_string()),
        }
    }
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ServerError::NotFound,
            StoreError::Api(api) => api.into(),
        }
    }
}
