//! History Page
//!
//! Local DRE history with its net-profit trend, plus the history kept by
//! the server.

use leptos::*;

use contasmart::api::ServerHistoryRecord;
use contasmart::format;
use contasmart::history::HistoryEntry;

use crate::api;
use crate::components::ProfitChart;
use crate::state::global::GlobalState;
use crate::state::local_history;

/// History page component
#[component]
pub fn HistoricoPage() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Re-read localStorage whenever a calculation or clear bumps the version
    let entries = create_memo(move |_| {
        state.history_version.get();
        local_history().entries()
    });
    let series = Signal::derive(move || {
        entries.with(|e| e.iter().rev().map(|e| (e.data, e.lucro_liquido)).collect::<Vec<_>>())
    });

    let clear_history = move |_| match local_history().clear() {
        Ok(()) => {
            state.history_changed();
            state.show_info("Histórico local removido.");
        }
        Err(e) => state.show_error(&format!("Não foi possível limpar o histórico: {}", e)),
    };

    view! {
        <div class="d-flex flex-column gap-4">
            <div class="d-flex justify-content-between align-items-center">
                <div>
                    <h1 class="h3 mb-1">"Histórico"</h1>
                    <p class="text-muted mb-0">"Últimos cálculos de DRE salvos neste navegador"</p>
                </div>
                <button
                    class="btn btn-outline-danger"
                    disabled=move || entries.with(Vec::is_empty)
                    on:click=clear_history
                >
                    "Limpar histórico"
                </button>
            </div>

            <section class="card shadow-sm">
                <div class="card-header bg-white">"Evolução do Lucro Líquido"</div>
                <div class="card-body">
                    <ProfitChart series=series />
                </div>
            </section>

            <section class="card shadow-sm">
                <div class="card-body">
                    <Show
                        when=move || entries.with(|e| !e.is_empty())
                        fallback=|| view! {
                            <p class="text-muted text-center mb-0">"Nenhum cálculo salvo ainda."</p>
                        }
                    >
                        <LocalHistoryTable entries=entries />
                    </Show>
                </div>
            </section>

            <ServerHistory />
        </div>
    }
}

#[component]
fn LocalHistoryTable(entries: Memo<Vec<HistoryEntry>>) -> impl IntoView {
    view! {
        <table class="table table-sm mb-0">
            <thead>
                <tr>
                    <th>"Data"</th>
                    <th class="text-end">"Lucro Líquido"</th>
                    <th class="text-end">"Margem Líquida"</th>
                </tr>
            </thead>
            <tbody>
                {move || entries.get().into_iter().map(|entry| {
                    let value_class = if entry.lucro_liquido < 0.0 { "text-end text-danger" } else { "text-end" };
                    view! {
                        <tr>
                            <td>{format::date_time(entry.data)}</td>
                            <td class=value_class>{format::currency(entry.lucro_liquido)}</td>
                            <td class="text-end">{format::percent(entry.margem_liquida)}</td>
                        </tr>
                    }
                }).collect_view()}
            </tbody>
        </table>
    }
}

/// History kept by the calculation server, loaded on demand
#[component]
fn ServerHistory() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let records = create_rw_signal(None::<Vec<ServerHistoryRecord>>);
    let (fetching, set_fetching) = create_signal(false);

    let load = move |_| {
        set_fetching.set(true);
        spawn_local(async move {
            match api::fetch_server_history().await {
                Ok(list) => records.set(Some(list)),
                Err(e) => state.show_error(&e.user_message()),
            }
            set_fetching.set(false);
        });
    };

    view! {
        <section class="card shadow-sm">
            <div class="card-header bg-white d-flex justify-content-between align-items-center">
                <span>"Histórico no servidor"</span>
                <button
                    class="btn btn-sm btn-outline-primary"
                    disabled=move || fetching.get()
                    on:click=load
                >
                    {move || if fetching.get() { "Carregando..." } else { "Carregar" }}
                </button>
            </div>
            <div class="card-body">
                {move || match records.get() {
                    None => view! { <p class="text-muted mb-0">"Clique em \"Carregar\" para consultar o servidor."</p> }.into_view(),
                    Some(list) if list.is_empty() => view! { <p class="text-muted mb-0">"Nenhum cálculo no servidor."</p> }.into_view(),
                    Some(list) => view! {
                        <ul class="list-group list-group-flush">
                            {list.into_iter().map(|record| view! {
                                <li class="list-group-item small font-monospace">{describe_record(&record)}</li>
                            }).collect_view()}
                        </ul>
                    }.into_view(),
                }}
            </div>
        </section>
    }
}

/// One line per server record: `key: value` pairs, numbers as currency
fn describe_record(record: &ServerHistoryRecord) -> String {
    record
        .iter()
        .map(|(key, value)| match value {
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(v) if key != "id" => format!("{}: {}", key, format::currency(v)),
                _ => format!("{}: {}", key, n),
            },
            serde_json::Value::String(s) => format!("{}: {}", key, s),
            other => format!("{}: {}", key, other),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_describe_record() {
        let record = json!({"id": 7, "lucro_liquido": 3200.0, "data": "2026-01-01"});
        let record = record.as_object().unwrap();
        assert_eq!(
            describe_record(record),
            "data: 2026-01-01 | id: 7 | lucro_liquido: R$ 3.200,00"
        );
    }
}
