//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{Nav, Toast};
use crate::pages::{BalancoPage, ConfiguracoesPage, DrePage, HistoricoPage};
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    let state = use_context::<GlobalState>().expect("GlobalState not found");
    spawn_local(async move {
        state.api_online.set(Some(api::check_status().await));
    });

    view! {
        <Router>
            <div class="min-vh-100 d-flex flex-column bg-light">
                <Nav />

                <main class="container flex-grow-1 py-4">
                    <Routes>
                        <Route path="/" view=DrePage />
                        <Route path="/balanco" view=BalancoPage />
                        <Route path="/historico" view=HistoricoPage />
                        <Route path="/configuracoes" view=ConfiguracoesPage />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Footer />

                <Toast />
            </div>
        </Router>
    }
}

/// Footer with the server address
#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="border-top bg-white py-3">
            <div class="container d-flex justify-content-between small text-muted">
                <span>{format!("ContaSmart Pro v{}", env!("CARGO_PKG_VERSION"))}</span>
                <span>{move || format!("API: {}", api::get_api_base())}</span>
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="text-center py-5">
            <div class="display-4 mb-3">"🔍"</div>
            <h1 class="h3 mb-2">"Página não encontrada"</h1>
            <p class="text-muted mb-4">"O endereço acessado não existe."</p>
            <A href="/" class="btn btn-primary">"Ir para a DRE"</A>
        </div>
    }
}
