//! Settings Page
//!
//! Calculation server address.

use leptos::*;

use crate::api;
use crate::state::global::GlobalState;

/// Settings page component
#[component]
pub fn ConfiguracoesPage() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (testing, set_testing) = create_signal(false);
    let (test_result, set_test_result) = create_signal(None::<bool>);

    let test_connection = move |_| {
        set_testing.set(true);
        set_test_result.set(None);

        let url = api_url.get_untracked();
        spawn_local(async move {
            let online = api::check_status_at(&url).await;
            set_test_result.set(Some(online));
            if online {
                state.show_success("Conexão com o servidor estabelecida!");
            } else {
                state.show_error("Não foi possível conectar ao servidor de cálculos");
            }
            set_testing.set(false);
        });
    };

    let save_url = move |_| {
        api::set_api_base(&api_url.get_untracked());
        set_api_url.set(api::get_api_base());
        state.show_success("Endereço do servidor salvo");

        spawn_local(async move {
            state.api_online.set(Some(api::check_status().await));
        });
    };

    let reset_url = move |_| set_api_url.set(api::DEFAULT_API_BASE.to_string());

    view! {
        <div class="d-flex flex-column gap-4">
            <div>
                <h1 class="h3 mb-1">"Configurações"</h1>
                <p class="text-muted mb-0">"Servidor de cálculos usado por este navegador"</p>
            </div>

            <section class="card shadow-sm">
                <div class="card-body">
                    <label for="api-url" class="form-label">"URL do servidor"</label>
                    <div class="input-group mb-3">
                        <input
                            id="api-url"
                            type="url"
                            class="form-control"
                            prop:value=move || api_url.get()
                            on:input=move |ev| set_api_url.set(event_target_value(&ev))
                        />
                        <button
                            class="btn btn-outline-secondary"
                            disabled=move || testing.get()
                            on:click=test_connection
                        >
                            {move || if testing.get() { "Testando..." } else { "Testar" }}
                        </button>
                        <button class="btn btn-primary" on:click=save_url>"Salvar"</button>
                    </div>

                    <div class="d-flex justify-content-between align-items-center small">
                        <span>
                            "Status: "
                            {move || match test_result.get() {
                                Some(true) => view! { <span class="text-success">"✅ Online"</span> }.into_view(),
                                Some(false) => view! { <span class="text-danger">"❌ Offline"</span> }.into_view(),
                                None => view! { <span class="text-muted">"Não testado"</span> }.into_view(),
                            }}
                        </span>
                        <button class="btn btn-link btn-sm p-0" on:click=reset_url>
                            {format!("Restaurar padrão ({})", api::DEFAULT_API_BASE)}
                        </button>
                    </div>
                </div>
            </section>
        </div>
    }
}
