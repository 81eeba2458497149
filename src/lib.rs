//! # ContaSmart
//!
//! Client layer of the ContaSmart Pro accounting application: collects
//! income statement (DRE) and balance sheet (Balanço) figures, validates
//! them, sends them to the calculation server and renders the answer.
//!
//! ## Modules
//!
//! - [`format`]: pt-BR currency, percent, number and date formatting
//! - [`statement`]: fields and metrics of each statement kind
//! - [`api`]: calculation server client and wire types
//! - [`form`]: form collection and pre-flight validation
//! - [`render`]: result view model, panel and text/HTML output
//! - [`history`]: capped local history of DRE results
//! - [`notify`]: user notifications
//! - [`controller`]: the submit/example/clear workflow of one form
//! - [`config`]: TOML + environment configuration (native only)
//!
//! The `native` feature (on by default) adds the `reqwest` client, the
//! file-backed store and configuration loading. Browser builds depend on the
//! crate with `default-features = false`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use contasmart::api::{ApiClient, ClientConfig};
//! use contasmart::history::{FileStore, HistoryCache};
//! use contasmart::{CalculationController, StatementKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::new("http://localhost:5000"))?;
//!     let history = HistoryCache::new(FileStore::new("contasmart_data"));
//!     let mut controller = CalculationController::new(StatementKind::Dre, client, history);
//!
//!     let form = [("receita_bruta", "10000"), ("custo_vendas", "4000")];
//!     match controller.submit(&form).await {
//!         Ok(outcome) => print!("{}", contasmart::render::text::render(&outcome.view)),
//!         Err(e) => eprintln!("{}", e.user_message()),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod controller;
pub mod form;
pub mod format;
pub mod history;
pub mod notify;
pub mod render;
pub mod statement;

#[cfg(feature = "native")]
pub mod config;

#[cfg(test)]
mod test_utils;

// Re-export top-level types for convenience
pub use api::{
    CalculationApi, CalculationRequest, CalculationResult, RequestError, RequestResult,
};

#[cfg(feature = "native")]
pub use api::{ApiClient, ClientConfig};

pub use controller::{CalculationController, Phase, SubmitError, SubmitOutcome};
pub use form::{FormSource, ValidationError};
pub use history::{HistoryCache, HistoryEntry, KeyValueStore, MemoryStore};
pub use notify::{Level, Notification, NotificationCenter};
pub use render::{ResultPanel, ResultView};
pub use statement::StatementKind;

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};
