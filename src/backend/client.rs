use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

// Error type for backend operations
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Unexpected response payload: {0}")]
    InvalidResponse(String),
}

/// Descriptor of an uploaded object, as reported by the storage service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Object path within its bucket
    pub path: String,
}

/// Handle to the hosted data store the registration forms write to.
///
/// Constructed once at startup and injected into the registration services
/// as `Arc<dyn BackendClient>`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Insert a batch of records into `table`.
    ///
    /// Every caller here submits a one-element batch; no partial-success
    /// semantics are defined.
    async fn insert(&self, table: &str, records: Vec<Value>) -> Result<Vec<Value>, BackendError>;

    /// Upload a binary object into `bucket` under `key`.
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, BackendError>;

    /// Public URL for an uploaded object, derived from the bucket name and
    /// the path reported by the upload. No lookup call is made.
    fn public_object_url(&self, bucket: &str, path: &str) -> String;
}
