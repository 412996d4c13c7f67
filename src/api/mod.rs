pub mod client;
pub mod models;

use thiserror::Error;

use crate::domain::record::{Record, RecordFields};

pub use client::HttpRecordApi;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("remote session is no longer valid")]
    Unauthenticated,
    #[error("record service unavailable: {0}")]
    Unavailable(String),
    #[error("record service rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}

/// Credentials replayed on every call: the cookies the service set at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAuth {
    pub cookie: String,
}

#[derive(Debug, Clone)]
pub struct RemoteLogin {
    pub auth: RemoteAuth,
    pub full_name: String,
}

/// The remote foreclosure record service.
pub trait RecordApi: Send + Sync {
    fn login(&self, username: &str, password: &str) -> Result<RemoteLogin, ApiError>;

    fn list_records(&self, auth: &RemoteAuth) -> Result<Vec<Record>, ApiError>;

    fn create_record(&self, auth: &RemoteAuth, fields: &RecordFields) -> Result<Record, ApiError>;

    fn update_record(
        &self,
        auth: &RemoteAuth,
        id: &str,
        fields: &RecordFields,
    ) -> Result<Record, ApiError>;

    fn delete_record(&self, auth: &RemoteAuth, id: &str) -> Result<(), ApiError>;
}
