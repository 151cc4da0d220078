use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::client::{BackendClient, BackendError, StoredObject};

/// Response body of a storage upload, e.g. `{"Key": "bucket/object-path"}`
#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "Key")]
    key: String,
}

/// Client for the hosted Supabase project: PostgREST for row insertion,
/// the Storage API for binary objects
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn storage_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, key)
    }

    async fn reject(response: reqwest::Response) -> BackendError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        BackendError::Rejected { status, body }
    }
}

#[async_trait]
impl BackendClient for SupabaseClient {
    async fn insert(&self, table: &str, records: Vec<Value>) -> Result<Vec<Value>, BackendError> {
        let response = self
            .http
            .post(self.rest_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(&records)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        let rows: Vec<Value> = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        info!("Inserted {} row(s) into table {}", rows.len(), table);
        Ok(rows)
    }

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, BackendError> {
        let response = self
            .http
            .post(self.storage_url(bucket, key))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Content-Type", content_type)
            .body(content)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        // The storage API reports the object as "{bucket}/{path}"
        let prefix = format!("{}/", bucket);
        let path = uploaded
            .key
            .strip_prefix(prefix.as_str())
            .unwrap_or(uploaded.key.as_str())
            .to_string();

        info!("Uploaded object {} to bucket {}", path, bucket);
        Ok(StoredObject { path })
    }

    fn public_object_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, path
        )
    }
}
