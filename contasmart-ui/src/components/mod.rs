//! UI Components
//!
//! Reusable Leptos components for the statement pages.

pub mod chart;
pub mod loading;
pub mod nav;
pub mod result_panel;
pub mod statement_form;
pub mod toast;

pub use chart::ProfitChart;
pub use loading::LoadingOverlay;
pub use nav::Nav;
pub use result_panel::ResultPanelView;
pub use statement_form::StatementForm;
pub use toast::Toast;
