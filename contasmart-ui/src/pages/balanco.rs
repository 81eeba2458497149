//! Balanço Page
//!
//! Balance sheet form and result. Balance sheets are not kept in history.

use leptos::*;

use contasmart::StatementKind;

use crate::components::StatementForm;

#[component]
pub fn BalancoPage() -> impl IntoView {
    view! { <StatementForm kind=StatementKind::Balanco /> }
}
