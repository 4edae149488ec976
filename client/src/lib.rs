//! Client for the HTML-to-PDF conversion endpoint.

use common::{dtos::ConversionRequest, util::routes::convert_url};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("could not reach conversion endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("conversion endpoint answered {0}")]
    Status(StatusCode),
}

#[derive(Debug, Clone)]
pub struct ConversionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ConversionClient {
    /// `endpoint` is the full URL of the convert route.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Targets the convert route of a service running at `base`.
    pub fn from_base(base: &str) -> Self {
        Self::new(convert_url(base))
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        ConversionClient {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Posts the request once and returns the PDF bytes.
    ///
    /// A non-success status is returned as [`ClientError::Status`]; the body of
    /// such a response is discarded unread.
    pub async fn convert(&self, request: &ConversionRequest) -> Result<Vec<u8>, ClientError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("conversion failed with {}", status);
            return Err(ClientError::Status(status));
        }
        let pdf = response.bytes().await?;
        debug!("received {} bytes", pdf.len());
        Ok(pdf.to_vec())
    }
}
