//! Calculation API Client
//!
//! HTTP client for the ContaSmart calculation server.

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::dto::{
    CalculationRequest, CalculationResult, ExampleResponse, FormatCurrencyRequest,
    FormatCurrencyResponse, HealthResponse, ServerHistoryRecord, ServerHistoryResponse,
};
use super::error::{RequestError, RequestResult};
use super::{accept_result, CalculationApi};
use crate::statement::StatementKind;

/// Calculation API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server origin, e.g. "http://localhost:5000". Empty means same origin.
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.request_timeout_ms = ms;
        self
    }
}

impl ApiClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> RequestResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .default_headers(headers)
            .build()
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Compute a statement
    pub async fn calculate(
        &self,
        kind: StatementKind,
        request: &CalculationRequest,
    ) -> RequestResult<CalculationResult> {
        tracing::debug!(statement = kind.slug(), payload = ?request, "Sending calculation request");

        let outcome: RequestResult<CalculationResult> = async {
            let response = self
                .client
                .post(self.url(&kind.calculate_path()))
                .json(request)
                .send()
                .await?;

            let result: CalculationResult = read_json(response).await?;
            accept_result(kind, result)
        }
        .await;

        match &outcome {
            Ok(result) => tracing::info!(
                statement = kind.slug(),
                rows = result.tabela_detalhada.len(),
                "Calculation succeeded"
            ),
            Err(e) => tracing::error!(statement = kind.slug(), error = %e, "Calculation failed"),
        }

        outcome
    }

    /// `POST /api/calcular/dre`
    pub async fn calculate_dre(
        &self,
        request: &CalculationRequest,
    ) -> RequestResult<CalculationResult> {
        self.calculate(StatementKind::Dre, request).await
    }

    /// `POST /api/calcular/balanco`
    pub async fn calculate_balanco(
        &self,
        request: &CalculationRequest,
    ) -> RequestResult<CalculationResult> {
        self.calculate(StatementKind::Balanco, request).await
    }

    /// Fetch the sample payload for a statement
    pub async fn example(&self, kind: StatementKind) -> RequestResult<CalculationRequest> {
        let response = self
            .client
            .get(self.url(&kind.example_path()))
            .send()
            .await?;

        let example: ExampleResponse = read_json(response).await?;
        if !example.sucesso {
            return Err(RequestError::Api(format!(
                "Erro ao obter exemplo {}",
                kind.title()
            )));
        }

        Ok(example.into_request())
    }

    /// Fetch the server-side DRE history
    pub async fn server_history(&self) -> RequestResult<Vec<ServerHistoryRecord>> {
        let response = self.client.get(self.url("/api/historico/dre")).send().await?;

        let history: ServerHistoryResponse = read_json(response).await?;
        if !history.sucesso {
            return Err(RequestError::Api("Erro ao obter histórico".to_string()));
        }

        Ok(history.historico)
    }

    /// Ask the server to format a currency value
    pub async fn format_currency(&self, valor: f64) -> RequestResult<String> {
        let response = self
            .client
            .post(self.url("/api/formatar/moeda"))
            .json(&FormatCurrencyRequest { valor })
            .send()
            .await?;

        let formatted: FormatCurrencyResponse = read_json(response).await?;
        match formatted.formatado {
            Some(text) if formatted.sucesso => Ok(text),
            _ => Err(RequestError::Api("Erro ao formatar moeda".to_string())),
        }
    }

    /// Check whether the server is online. Any failure reads as offline.
    pub async fn check_status(&self) -> bool {
        let response = match self.client.get(self.url("/api/health")).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "API offline");
                return false;
            }
        };

        match read_json::<HealthResponse>(response).await {
            Ok(health) => health.is_online(),
            Err(e) => {
                tracing::warn!(error = %e, "API health check failed");
                false
            }
        }
    }
}

#[async_trait]
impl CalculationApi for ApiClient {
    async fn calculate(
        &self,
        kind: StatementKind,
        request: &CalculationRequest,
    ) -> RequestResult<CalculationResult> {
        ApiClient::calculate(self, kind, request).await
    }

    async fn example(&self, kind: StatementKind) -> RequestResult<CalculationRequest> {
        ApiClient::example(self, kind).await
    }

    async fn check_status(&self) -> bool {
        ApiClient::check_status(self).await
    }
}

/// Reject non-2xx statuses, then decode the JSON body
async fn read_json<T: DeserializeOwned>(response: Response) -> RequestResult<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(RequestError::Http(status.as_u16()));
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
