//! Result Renderer
//!
//! Turns a successful [`CalculationResult`](crate::api::CalculationResult)
//! into display state:
//!
//! - [`view`] - typed view model with every display decision taken
//! - [`panel`] - named targets painted from a view, with HTML snapshots
//! - [`html`] - escaped markup fragments
//! - [`text`] - terminal report

pub mod html;
pub mod panel;
pub mod text;
pub mod view;

pub use panel::{ResultPanel, EMPTY_METRIC};
pub use view::{AnalysisView, Emphasis, MetricView, ResultView, RowView, MISSING_VALUE};
