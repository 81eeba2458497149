//! Calculation API Access
//!
//! Client side of the ContaSmart calculation server. The server computes
//! the statements; this module only sends payloads and normalizes the
//! success/error shape of the answers.
//!
//! # Endpoints
//!
//! - `POST /api/calcular/dre` - Income statement
//! - `POST /api/calcular/balanco` - Balance sheet
//! - `GET /api/exemplo/dre`, `GET /api/exemplo/balanco` - Sample payloads
//! - `GET /api/historico/dre` - Server-side calculation history
//! - `POST /api/formatar/moeda` - Server-side currency formatting
//! - `GET /api/health` - Online status

pub mod dto;
pub mod error;

#[cfg(feature = "native")]
mod client;

use async_trait::async_trait;

use crate::statement::StatementKind;

pub use dto::{
    Analysis, CalculationRequest, CalculationResult, DetailRow, Profitability, RowKind,
    ServerHistoryRecord,
};
pub use error::{RequestError, RequestResult};

#[cfg(feature = "native")]
pub use client::{ApiClient, ClientConfig};

/// Operations the calculation controller needs from the server.
///
/// Browser transports produce `!Send` futures, so the trait drops the
/// `Send` bound on `wasm32`.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CalculationApi {
    /// Compute a statement. Fails on transport errors, non-2xx statuses and
    /// `sucesso: false` answers.
    async fn calculate(
        &self,
        kind: StatementKind,
        request: &CalculationRequest,
    ) -> RequestResult<CalculationResult>;

    /// Sample payload for populating the form
    async fn example(&self, kind: StatementKind) -> RequestResult<CalculationRequest>;

    /// `true` when the server reports itself online. Never fails.
    async fn check_status(&self) -> bool;
}

/// Turn a decoded calculation answer into a result or an API error
pub fn accept_result(
    kind: StatementKind,
    result: CalculationResult,
) -> RequestResult<CalculationResult> {
    if result.sucesso {
        Ok(result)
    } else {
        Err(rejection(kind, &result))
    }
}

/// API error for an unsuccessful answer: the server message when present,
/// else the generic message of the statement
pub fn rejection(kind: StatementKind, result: &CalculationResult) -> RequestError {
    let message = result
        .erro
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .unwrap_or(kind.failure_message());
    RequestError::Api(message.to_string())
}
