//! Pre-signed object uploads
//!
//! The backend hands out a short-lived upload URL; the file bytes are then
//! PUT straight to object storage. The bearer token never leaves for the
//! storage host.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::crypto::sha256_base64;
use crate::error::{ApiError, ApiResult};
use crate::http::ApiClient;
use crate::storage::KeyValueStore;

/// Integrity header understood by S3-compatible storage
pub const CHECKSUM_HEADER: &str = "x-amz-checksum-sha256";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TicketRequest<'a> {
    file_name: &'a str,
    content_type: &'a str,
}

/// Upload grant returned by the presign endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTicket {
    pub upload_url: String,
    pub object_key: String,
    pub expires_at: DateTime<Utc>,
    /// Extra headers the storage host expects verbatim
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl UploadTicket {
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    fn header_map(&self, content_type: &str, checksum: &str) -> ApiResult<HeaderMap> {
        let mut map = HeaderMap::new();
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::Setup(format!("invalid upload header name: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::Setup(format!("invalid upload header value: {e}")))?;
            map.insert(name, value);
        }
        map.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(content_type)
                .map_err(|e| ApiError::Setup(format!("invalid content type: {e}")))?,
        );
        map.insert(
            HeaderName::from_static(CHECKSUM_HEADER),
            HeaderValue::from_str(checksum).map_err(|e| ApiError::Setup(e.to_string()))?,
        );
        Ok(map)
    }
}

impl<S> ApiClient<S>
where
    S: KeyValueStore + Sync,
{
    /// Ask the backend for an upload grant
    pub async fn request_upload_ticket(
        &self,
        file_name: &str,
        content_type: &str,
        cancel: &CancellationToken,
    ) -> ApiResult<UploadTicket> {
        let path = self.config().presign_path.clone();
        self.post_json(
            &path,
            &TicketRequest {
                file_name,
                content_type,
            },
            cancel,
        )
        .await
    }

    /// Upload bytes under a ticket, returning the stored object key
    pub async fn upload(
        &self,
        ticket: &UploadTicket,
        content_type: &str,
        bytes: Vec<u8>,
        cancel: &CancellationToken,
    ) -> ApiResult<String> {
        if ticket.is_expired() {
            tracing::info!(
                object_key = %ticket.object_key,
                expires_at = %ticket.expires_at,
                "Refusing upload with expired ticket"
            );
            return Err(ApiError::UploadExpired);
        }

        let checksum = sha256_base64(&bytes);
        let headers = ticket.header_map(content_type, &checksum)?;
        let size = bytes.len();

        self.put_bytes(&ticket.upload_url, headers, bytes, cancel)
            .await?;

        tracing::info!(object_key = %ticket.object_key, size = size, "Object uploaded");
        Ok(ticket.object_key.clone())
    }

    /// Request a ticket and upload in one step
    pub async fn upload_file(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
        cancel: &CancellationToken,
    ) -> ApiResult<String> {
        let ticket = self
            .request_upload_ticket(file_name, content_type, cancel)
            .await?;
        self.upload(&ticket, content_type, bytes, cancel).await
    }
}
