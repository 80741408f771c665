//! HTTP client for the dashboard API.
//!
//! Thin typed wrapper over `reqwest`: one method per endpoint, errors
//! normalized into [`FetchError`] so the resilience layer can treat
//! timeouts, transport failures, and HTTP errors uniformly.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use verdant_core::{
    CarbonPrediction, ChartPoint, ChatResponse, FetchError, InsightsPayload, NewTransaction,
    Transaction, TransactionsPayload,
};

use crate::config::{ClientConfig, ConfigError};
use crate::source::RemoteSource;

/// Typed client for the five dashboard endpoints.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| ConfigError::Client(err.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
        })
    }

    /// `GET /transactions`: the transaction list plus the trend chart.
    pub async fn transactions(&self) -> Result<TransactionsPayload, FetchError> {
        self.get_json("/transactions").await
    }

    /// `POST /transactions`: record a transaction; the server computes
    /// carbon and impact and assigns the id.
    pub async fn add_transaction(&self, tx: &NewTransaction) -> Result<Transaction, FetchError> {
        self.post_json("/transactions", tx).await
    }

    /// `POST /predict`: carbon estimate for a prospective transaction.
    ///
    /// The model behind this endpoint was trained on industrial
    /// production rows, so the transaction is reshaped into that row
    /// format: amount converted to tons, the remaining features zeroed
    /// for the server to fill.
    pub async fn predict(&self, tx: &NewTransaction) -> Result<CarbonPrediction, FetchError> {
        let body = serde_json::json!({
            "good_used": tx.category,
            "quantity_used (tons)": tx.amount * 0.001,
            "carbon_emission (tons CO2)": 0,
            "water_usage (liters)": 0,
            "waste_generated (tons)": 0,
        });
        self.post_json("/predict", &body).await
    }

    /// `POST /conversation`: send one user message, get the updated
    /// conversation history back.
    pub async fn conversation(&self, message: &str) -> Result<ChatResponse, FetchError> {
        let body = serde_json::json!({ "message": message });
        self.post_json("/conversation", &body).await
    }

    /// `GET /insights`: insight cards and assistant starter messages.
    pub async fn insights(&self) -> Result<InsightsPayload, FetchError> {
        self.get_json("/insights").await
    }

    /// Adapter for the resilient fetch of the transactions dataset.
    pub fn transactions_source(&self) -> TransactionsEndpoint<'_> {
        TransactionsEndpoint { client: self }
    }

    /// Adapter for the resilient fetch of the chart dataset. The chart
    /// rides on the `/transactions` payload; there is no separate route.
    pub fn chart_data_source(&self) -> ChartDataEndpoint<'_> {
        ChartDataEndpoint { client: self }
    }

    /// Adapter for the resilient fetch of the insights dataset.
    pub fn insights_source(&self) -> InsightsEndpoint<'_> {
        InsightsEndpoint { client: self }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.map_transport(err))?;
        Self::parse_response(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| self.map_transport(err))?;
        Self::parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, FetchError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(FetchError::Server {
                status: status.as_u16(),
                body,
            });
        }
        response.json().await.map_err(|err| FetchError::InvalidPayload {
            reason: err.to_string(),
        })
    }

    fn map_transport(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                after: self.timeout,
            }
        } else if err.is_decode() {
            FetchError::InvalidPayload {
                reason: err.to_string(),
            }
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

// ============================================================================
// REMOTE SOURCE ADAPTERS
// ============================================================================

pub struct TransactionsEndpoint<'a> {
    client: &'a ApiClient,
}

#[async_trait::async_trait]
impl RemoteSource<TransactionsPayload> for TransactionsEndpoint<'_> {
    async fn fetch(&self) -> Result<TransactionsPayload, FetchError> {
        self.client.transactions().await
    }
}

pub struct ChartDataEndpoint<'a> {
    client: &'a ApiClient,
}

#[async_trait::async_trait]
impl RemoteSource<Vec<ChartPoint>> for ChartDataEndpoint<'_> {
    async fn fetch(&self) -> Result<Vec<ChartPoint>, FetchError> {
        let payload = self.client.transactions().await?;
        Ok(payload.chart_data)
    }
}

pub struct InsightsEndpoint<'a> {
    client: &'a ApiClient,
}

#[async_trait::async_trait]
impl RemoteSource<InsightsPayload> for InsightsEndpoint<'_> {
    async fn fetch(&self) -> Result<InsightsPayload, FetchError> {
        self.client.insights().await
    }
}
