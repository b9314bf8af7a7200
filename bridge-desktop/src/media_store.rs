//! Remote media store over HTTP.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    LocalMediaRef, RemoteMediaStore,
};
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::http::{build_client, ensure_success, transport_error, with_bearer, DEFAULT_REQUEST_TIMEOUT};

/// Header carrying the original file name of an upload.
pub const FILE_NAME_HEADER: &str = "X-File-Name";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// Uploads staged files with a single `POST` of the raw bytes.
///
/// The endpoint answers with `{"url": "<public url>"}`.
pub struct HttpMediaStore {
    client: Client,
    upload_url: Url,
    auth_token: Option<String>,
}

impl HttpMediaStore {
    pub fn new(upload_url: &str) -> Result<Self> {
        Self::with_timeout(upload_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(upload_url: &str, timeout: Duration) -> Result<Self> {
        let upload_url = Url::parse(upload_url)
            .map_err(|e| BridgeError::NotAvailable(format!("invalid upload URL: {e}")))?;
        Ok(Self::with_client(build_client(timeout)?, upload_url))
    }

    pub fn with_client(client: Client, upload_url: Url) -> Self {
        Self {
            client,
            upload_url,
            auth_token: None,
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}

#[async_trait]
impl RemoteMediaStore for HttpMediaStore {
    async fn upload(&self, media: &LocalMediaRef) -> Result<String> {
        let bytes = tokio::fs::read(&media.location).await?;
        let mime_type = media
            .mime_type
            .clone()
            .unwrap_or_else(|| guess_mime_type(media.file_name()).to_string());

        debug!(media = %media, size = bytes.len(), mime_type = %mime_type, "Uploading media");

        let request = self
            .client
            .post(self.upload_url.clone())
            .header(CONTENT_TYPE, mime_type)
            .header(FILE_NAME_HEADER, media.file_name())
            .body(Bytes::from(bytes));

        let response = with_bearer(request, self.auth_token.as_deref())
            .send()
            .await
            .map_err(transport_error)?;
        let response = ensure_success(response).await?;

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| BridgeError::OperationFailed(format!("invalid upload response: {e}")))?;

        if body.url.trim().is_empty() {
            return Err(BridgeError::OperationFailed(
                "upload response contained an empty URL".to_string(),
            ));
        }
        Ok(body.url)
    }
}

/// MIME type from a file extension, for refs staged without one.
pub fn guess_mime_type(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn staged_file(contents: &[u8]) -> (tempfile::TempDir, LocalMediaRef) {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("pose.JPG");
        std::fs::File::create(&file_path)
            .unwrap()
            .write_all(contents)
            .unwrap();
        let media = LocalMediaRef::new(file_path.to_string_lossy().to_string());
        (dir, media)
    }

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type("pose.JPG"), "image/jpeg");
        assert_eq!(guess_mime_type("clip.mp4"), "video/mp4");
        assert_eq!(guess_mime_type("README"), "application/octet-stream");
    }

    #[test]
    fn test_invalid_upload_url() {
        assert!(matches!(
            HttpMediaStore::new("not a url"),
            Err(BridgeError::NotAvailable(_))
        ));
    }

    #[tokio::test]
    async fn test_upload_posts_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/media"))
            .and(header("content-type", "image/jpeg"))
            .and(header("x-file-name", "pose.JPG"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({ "url": "https://cdn.test/pose.jpg" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (_dir, media) = staged_file(b"jpeg bytes");
        let store = HttpMediaStore::new(&format!("{}/media", server.uri()))
            .unwrap()
            .with_auth_token("secret");

        let url = store.upload(&media).await.unwrap();
        assert_eq!(url, "https://cdn.test/pose.jpg");
    }

    #[tokio::test]
    async fn test_rejection_keeps_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(413).set_body_string("file too large"))
            .mount(&server)
            .await;

        let (_dir, media) = staged_file(b"big");
        let store = HttpMediaStore::new(&server.uri()).unwrap();

        match store.upload(&media).await {
            Err(err @ BridgeError::Rejected { status: 413, .. }) => {
                assert!(!err.is_transient());
                assert!(err.to_string().contains("file too large"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let store = HttpMediaStore::new("http://127.0.0.1:9/media").unwrap();
        let media = LocalMediaRef::new("/definitely/not/here.jpg");

        assert!(matches!(store.upload(&media).await, Err(BridgeError::Io(_))));
    }
}
