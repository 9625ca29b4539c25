//! Payment gateway HTTP client.
//!
//! A thin reqwest-based client for the external card processor. The base URL
//! is configurable so tests can point the client at a mock server. Responses
//! with non-success HTTP statuses become [`GatewayError::Http`]; transport
//! failures become [`GatewayError::Request`]. A processed-but-declined charge
//! is reported in-band via [`model::ChargeOutcome::approved`].

pub mod model;

use serde::de::DeserializeOwned;

use crate::error::gateway::GatewayError;
use crate::gateway::model::{ChargeOutcome, ChargeRequest, RefundOutcome, RefundRequest};

/// Client for the payment gateway API.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl Client {
    /// Starts building a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder {
            base_url: None,
            api_key: None,
        }
    }

    /// Authorizes and captures a charge in one step.
    pub async fn charge(&self, request: &ChargeRequest) -> Result<ChargeOutcome, GatewayError> {
        let response = self
            .http
            .post(format!("{}/v1/charges", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        Self::read_json(response).await
    }

    /// Refunds a previously captured charge.
    pub async fn refund(&self, request: &RefundRequest) -> Result<RefundOutcome, GatewayError> {
        let response = self
            .http
            .post(format!("{}/v1/refunds", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();

            return Err(GatewayError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

/// Builder for [`Client`].
pub struct ClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
}

impl ClientBuilder {
    /// Base URL of the gateway API, without a trailing slash.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.trim_end_matches('/').to_string());
        self
    }

    /// API key sent as a bearer token on every request.
    pub fn api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// Builds the client, failing if required configuration is missing.
    pub fn build(self) -> Result<Client, GatewayError> {
        let base_url = self
            .base_url
            .ok_or(GatewayError::MissingConfig("base_url"))?;
        let api_key = self.api_key.ok_or(GatewayError::MissingConfig("api_key"))?;

        Ok(Client {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        })
    }
}
