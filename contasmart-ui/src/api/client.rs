//! HTTP API Client
//!
//! Functions for communicating with the ContaSmart calculation server.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use contasmart::api::dto::{ExampleResponse, HealthResponse, ServerHistoryResponse};
use contasmart::api::{
    accept_result, CalculationApi, CalculationRequest, CalculationResult, RequestError,
    RequestResult, ServerHistoryRecord,
};
use contasmart::StatementKind;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

const API_URL_KEY: &str = "contasmart_api_url";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = local_storage()
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    normalize_base(&url)
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(API_URL_KEY, &normalize_base(url));
    }
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn transport(err: gloo_net::Error) -> RequestError {
    RequestError::Transport(err.to_string())
}

async fn read_json<T: DeserializeOwned>(response: Response) -> RequestResult<T> {
    if !response.ok() {
        return Err(RequestError::Http(response.status()));
    }

    let text = response.text().await.map_err(transport)?;
    Ok(serde_json::from_str(&text)?)
}

/// Compute a statement
pub async fn calculate(
    kind: StatementKind,
    request: &CalculationRequest,
) -> RequestResult<CalculationResult> {
    let url = format!("{}{}", get_api_base(), kind.calculate_path());

    let response = Request::post(&url)
        .json(request)
        .map_err(|e| RequestError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(transport)?;

    let result: CalculationResult = read_json(response).await?;
    accept_result(kind, result)
}

/// Sample payload for populating a form
pub async fn fetch_example(kind: StatementKind) -> RequestResult<CalculationRequest> {
    let url = format!("{}{}", get_api_base(), kind.example_path());

    let response = Request::get(&url).send().await.map_err(transport)?;
    let example: ExampleResponse = read_json(response).await?;

    if !example.sucesso {
        return Err(RequestError::Api(
            "Não foi possível carregar os dados de exemplo".to_string(),
        ));
    }
    Ok(example.into_request())
}

/// Calculation history kept by the server
pub async fn fetch_server_history() -> RequestResult<Vec<ServerHistoryRecord>> {
    let url = format!("{}/api/historico/dre", get_api_base());

    let response = Request::get(&url).send().await.map_err(transport)?;
    let history: ServerHistoryResponse = read_json(response).await?;

    if !history.sucesso {
        return Err(RequestError::Api("Erro ao carregar histórico".to_string()));
    }
    Ok(history.historico)
}

/// `true` when the server reports itself online
pub async fn check_status() -> bool {
    check_status_at(&get_api_base()).await
}

/// Health check against an explicit base URL, used before saving a new one
pub async fn check_status_at(base: &str) -> bool {
    let url = format!("{}/api/health", normalize_base(base));

    let response = match Request::get(&url).send().await {
        Ok(response) => response,
        Err(_) => return false,
    };

    match read_json::<HealthResponse>(response).await {
        Ok(health) => health.is_online(),
        Err(_) => false,
    }
}

/// [`CalculationApi`] over `fetch`, against the configured base URL
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserApi;

#[async_trait(?Send)]
impl CalculationApi for BrowserApi {
    async fn calculate(
        &self,
        kind: StatementKind,
        request: &CalculationRequest,
    ) -> RequestResult<CalculationResult> {
        calculate(kind, request).await
    }

    async fn example(&self, kind: StatementKind) -> RequestResult<CalculationRequest> {
        fetch_example(kind).await
    }

    async fn check_status(&self) -> bool {
        check_status().await
    }
}
