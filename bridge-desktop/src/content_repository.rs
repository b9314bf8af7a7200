//! Content repository over a JSON HTTP API.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    ContentFields, ContentId, ContentRepository,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::http::{build_client, ensure_success, transport_error, with_bearer, DEFAULT_REQUEST_TIMEOUT};

/// Body of `PUT <base>/content/<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPayload {
    pub name: String,
    pub description: String,
    pub style: String,
    pub media_urls: Vec<String>,
    pub video_urls: Vec<String>,
}

impl ContentPayload {
    pub fn new(fields: &ContentFields, media_urls: &[String], video_urls: &[String]) -> Self {
        Self {
            name: fields.name.clone(),
            description: fields.description.clone(),
            style: fields.style.clone(),
            media_urls: media_urls.to_vec(),
            video_urls: video_urls.to_vec(),
        }
    }
}

pub struct HttpContentRepository {
    client: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl HttpContentRepository {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| BridgeError::NotAvailable(format!("invalid content API URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(BridgeError::NotAvailable(format!(
                "content API URL cannot be a base: {base_url}"
            )));
        }
        Ok(Self::with_client(build_client(timeout)?, base_url))
    }

    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self {
            client,
            base_url,
            auth_token: None,
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// `<base>/content/<id>`, with the id percent-encoded as one segment.
    pub fn record_url(&self, content_id: &ContentId) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BridgeError::NotAvailable("content API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push("content")
            .push(content_id.as_str());
        Ok(url)
    }
}

#[async_trait]
impl ContentRepository for HttpContentRepository {
    async fn save(
        &self,
        content_id: &ContentId,
        media_urls: &[String],
        video_urls: &[String],
        fields: &ContentFields,
    ) -> Result<()> {
        let url = self.record_url(content_id)?;
        let payload = ContentPayload::new(fields, media_urls, video_urls);

        debug!(
            content_id = %content_id,
            media = media_urls.len(),
            videos = video_urls.len(),
            "Persisting content record"
        );

        let request = self.client.put(url).json(&payload);
        let response = with_bearer(request, self.auth_token.as_deref())
            .send()
            .await
            .map_err(transport_error)?;
        ensure_success(response).await?;
        Ok(())
    }
}
