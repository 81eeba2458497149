//! Navigation Component
//!
//! Header navigation bar with brand, links and server status.

use leptos::*;
use leptos_router::*;

use crate::state::global::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="navbar navbar-expand navbar-dark bg-primary">
            <div class="container">
                <A href="/" class="navbar-brand fw-bold">
                    "📊 ContaSmart Pro"
                </A>

                <div class="navbar-nav me-auto">
                    <NavLink href="/" label="DRE" />
                    <NavLink href="/balanco" label="Balanço" />
                    <NavLink href="/historico" label="Histórico" />
                    <NavLink href="/configuracoes" label="Configurações" />
                </div>

                <StatusBadge />
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A href=href class="nav-link" active_class="active">
            {label}
        </A>
    }
}

/// Online/offline indicator of the calculation server
#[component]
fn StatusBadge() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <span id="api-status" class=move || match state.api_online.get() {
            Some(true) => "badge bg-success",
            Some(false) => "badge bg-danger",
            None => "badge bg-secondary",
        }>
            {move || status_label(state.api_online.get())}
        </span>
    }
}

fn status_label(online: Option<bool>) -> &'static str {
    match online {
        Some(true) => "✅ Online",
        Some(false) => "❌ Offline",
        None => "Verificando...",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_label() {
        assert_eq!(status_label(Some(true)), "✅ Online");
        assert_eq!(status_label(Some(false)), "❌ Offline");
    }
}
