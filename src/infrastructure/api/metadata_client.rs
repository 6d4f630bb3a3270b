//! Gallery API client for the image list.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::entities::ImageRecord;
use crate::domain::errors::MetadataError;
use crate::domain::ports::MetadataPort;

use super::alt_text::AltTextCatalog;

const USER_AGENT: &str = concat!("galeria/", env!("CARGO_PKG_VERSION"));

/// Fetches the image list as a JSON array of records.
pub struct HttpMetadataClient {
    client: Client,
    url: String,
    alt_texts: Arc<AltTextCatalog>,
}

impl HttpMetadataClient {
    /// Creates a client for the list endpoint at `url`.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, MetadataError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| MetadataError::network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
            alt_texts: Arc::new(AltTextCatalog::default()),
        })
    }

    /// Overlays captions from `catalog` onto every fetched list.
    #[must_use]
    pub fn with_alt_texts(mut self, catalog: Arc<AltTextCatalog>) -> Self {
        self.alt_texts = catalog;
        self
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Parses a list body. Anything but a JSON array is malformed.
///
/// Elements are normalized one by one, so an odd element only costs its own slot.
///
/// # Errors
/// Returns [`MetadataError::Malformed`] with the parser's message.
pub fn parse_records(body: &str) -> Result<Vec<ImageRecord>, MetadataError> {
    let elements: Vec<Value> =
        serde_json::from_str(body).map_err(|e| MetadataError::malformed(e.to_string()))?;
    Ok(elements.iter().map(ImageRecord::from_json).collect())
}

#[async_trait]
impl MetadataPort for HttpMetadataClient {
    async fn fetch_images(&self) -> Result<Vec<ImageRecord>, MetadataError> {
        debug!(url = %self.url, "Requesting image list");

        let response = self
            .client
            .get(&self.url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| MetadataError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Image list request failed");
            return Err(MetadataError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| MetadataError::network(format!("failed to read body: {e}")))?;

        let mut records = parse_records(&body)?;
        self.alt_texts.enrich(&mut records);

        debug!(count = records.len(), "Received image list");
        Ok(records)
    }
}

impl std::fmt::Debug for HttpMetadataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMetadataClient")
            .field("url", &self.url)
            .field("alt_texts", &self.alt_texts.len())
            .finish_non_exhaustive()
    }
}
