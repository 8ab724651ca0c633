//! Open Notify client for the current ISS position.

use crate::{
    config::StargazerConfig,
    models::IssPosition,
    services::resilient_client::{ResilientClient, ResilientClientError, ResilientClientMetrics},
};

/// Errors raised while fetching the ISS position
#[derive(Debug, thiserror::Error)]
pub enum IssError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("ISS request failed: {0}")]
    Upstream(#[from] ResilientClientError),
}

pub struct IssService {
    client: ResilientClient,
    url: String,
}

impl IssService {
    pub fn new(
        config: &StargazerConfig,
        metrics: Option<ResilientClientMetrics>,
    ) -> Result<Self, IssError> {
        Ok(Self {
            client: ResilientClient::new(config.http_client.clone(), metrics)?,
            url: config.iss_api_url.clone(),
        })
    }

    /// Fetch the position, passing the payload through unchanged
    pub async fn current_position(&mut self) -> Result<IssPosition, IssError> {
        Ok(self.client.get_json(&self.url).await?)
    }
}
