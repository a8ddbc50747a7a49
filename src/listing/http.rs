use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::listing::errors::SubmissionError;
use crate::listing::traits::ListingService;
use crate::listing::types::CreateListingRequest;
use crate::models::ListingId;

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    #[serde(alias = "_id", alias = "listingId")]
    id: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(alias = "error")]
    message: String,
}

/// Listing service client for the REST backend
pub struct HttpListingService {
    client: Client,
    api_url: String,
    timeout: Duration,
}

impl HttpListingService {
    /// Create a client for `api_url` (e.g. `http://localhost:5000/api`)
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("property-centre/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn listings_url(&self) -> String {
        format!("{}/listings", self.api_url)
    }

    fn listing_url(&self, id: &ListingId) -> String {
        format!("{}/listings/{}", self.api_url, id)
    }

    fn transport_error(&self, e: reqwest::Error) -> SubmissionError {
        if e.is_timeout() {
            SubmissionError::Timeout(self.timeout)
        } else {
            SubmissionError::Network(e.to_string())
        }
    }

    /// Send a prepared request and return the status-checked body
    async fn send(&self, builder: RequestBuilder, token: &str) -> Result<String, SubmissionError> {
        let response = builder
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            warn!("Listing service returned status: {}", status);
            return Err(classify_failure(status, &body));
        }
        Ok(body)
    }
}

/// Map a non-success status and its body onto a submission error.
/// 4xx is the server refusing the listing, anything else is treated as transport trouble.
pub(crate) fn classify_failure(status: StatusCode, body: &str) -> SubmissionError {
    let reason = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SubmissionError::Unauthenticated,
        StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS => {
            SubmissionError::Network(format!("{}: {}", status, reason))
        }
        s if s.is_client_error() => SubmissionError::Rejected(reason),
        s => SubmissionError::Network(format!("{}: {}", s, reason)),
    }
}

fn parse_created(body: &str) -> Result<ListingId, SubmissionError> {
    let created: CreatedResponse = serde_json::from_str(body)
        .map_err(|e| SubmissionError::Unexpected(format!("Malformed response: {}", e)))?;

    match created.id {
        serde_json::Value::String(id) if !id.is_empty() => Ok(ListingId(id)),
        serde_json::Value::Number(n) => Ok(ListingId(n.to_string())),
        other => Err(SubmissionError::Unexpected(format!(
            "Response carried no usable id: {}",
            other
        ))),
    }
}

#[async_trait]
impl ListingService for HttpListingService {
    async fn create_listing(
        &self,
        request: &CreateListingRequest,
        token: &str,
    ) -> Result<ListingId, SubmissionError> {
        let url = self.listings_url();
        debug!("POST {}", url);

        let body = self.send(self.client.post(&url).json(request), token).await?;
        let id = parse_created(&body)?;
        info!("✅ Listing {} created via {}", id, self.service_name());
        Ok(id)
    }

    async fn update_listing(
        &self,
        id: &ListingId,
        request: &CreateListingRequest,
        token: &str,
    ) -> Result<ListingId, SubmissionError> {
        let url = self.listing_url(id);
        debug!("PUT {}", url);

        self.send(self.client.put(&url).json(request), token).await?;
        info!("✅ Listing {} updated via {}", id, self.service_name());
        Ok(id.clone())
    }

    fn service_name(&self) -> &'static str {
        "REST API"
    }
}
