//! DRE Page
//!
//! Income statement form and result.

use leptos::*;

use contasmart::StatementKind;

use crate::components::StatementForm;

#[component]
pub fn DrePage() -> impl IntoView {
    view! { <StatementForm kind=StatementKind::Dre /> }
}
