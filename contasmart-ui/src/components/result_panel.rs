//! Result Panel Component
//!
//! Summary metrics, detail table and analysis of the last calculation.

use leptos::*;

use contasmart::render::{AnalysisView, MetricView, ResultPanel, RowView};

/// Renders a [`ResultPanel`]; repaints whenever the panel signal changes
#[component]
pub fn ResultPanelView(#[prop(into)] panel: Signal<ResultPanel>) -> impl IntoView {
    view! {
        <div class="card shadow-sm">
            <div class="card-header bg-white">
                <h2 class="h5 mb-0">{move || format!("Resultado: {}", panel.with(|p| p.kind().title()))}</h2>
            </div>
            <div class="card-body">
                <div class="row g-3 mb-4">
                    {move || {
                        panel.with(|p| {
                            p.metrics()
                                .iter()
                                .map(|metric| {
                                    let emphasis = p.class(&metric.target);
                                    view! { <MetricCard metric=metric.clone() emphasis=emphasis /> }
                                })
                                .collect_view()
                        })
                    }}
                </div>

                <Show
                    when=move || panel.with(|p| p.row_count() > 0)
                    fallback=|| view! {
                        <p class="text-muted text-center mb-0">
                            "Preencha o formulário e clique em \"Calcular\"."
                        </p>
                    }
                >
                    <DetailTable rows=Signal::derive(move || panel.with(|p| p.rows().to_vec())) />
                </Show>

                {move || panel.with(|p| p.analysis().cloned()).map(|analysis| view! {
                    <AnalysisBlock analysis=analysis />
                })}
            </div>
        </div>
    }
}

#[component]
fn MetricCard(metric: MetricView, emphasis: Option<&'static str>) -> impl IntoView {
    let value_class = match emphasis {
        Some(class) => format!("{} mb-0 py-2 fs-5 fw-bold", class),
        None => "fs-5 fw-bold".to_string(),
    };

    view! {
        <div class="col-sm-6 col-lg-4">
            <div class="border rounded p-3 h-100">
                <div class="small text-muted mb-1">{metric.label}</div>
                <div id=metric.target class=value_class>{metric.text}</div>
            </div>
        </div>
    }
}

#[component]
fn DetailTable(#[prop(into)] rows: Signal<Vec<RowView>>) -> impl IntoView {
    view! {
        <div class="table-responsive">
            <table class="table table-sm align-middle">
                <thead>
                    <tr>
                        <th>"Descrição"</th>
                        <th class="text-end">"Valor"</th>
                    </tr>
                </thead>
                <tbody id="tabela-resultados">
                    {move || rows.get().into_iter().map(|row| view! { <DetailRow row=row /> }).collect_view()}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn DetailRow(row: RowView) -> impl IntoView {
    let description = if row.italic {
        view! { <td><em>{row.description}</em></td> }
    } else {
        view! { <td>{row.description}</td> }
    };

    view! {
        <tr class=row.row_class.unwrap_or_default()>
            {description}
            <td class=row.value_class>{row.value}</td>
        </tr>
    }
}

#[component]
fn AnalysisBlock(analysis: AnalysisView) -> impl IntoView {
    let alerts = analysis.alerts;
    let recommendations = analysis.recommendations;

    view! {
        <div id="analise" class="mt-3">
            <h3 class="h6">
                "Rentabilidade: "
                <span class=format!("badge {}", analysis.badge_class)>{analysis.badge_label}</span>
            </h3>

            {(!alerts.is_empty()).then(|| view! {
                <div class="mt-3">
                    <h4 class="h6 text-warning">"Alertas"</h4>
                    <ul class="mb-0">
                        {alerts.into_iter().map(|a| view! { <li>{a}</li> }).collect_view()}
                    </ul>
                </div>
            })}

            {(!recommendations.is_empty()).then(|| view! {
                <div class="mt-3">
                    <h4 class="h6 text-info">"Recomendações"</h4>
                    <ul class="mb-0">
                        {recommendations.into_iter().map(|r| view! { <li>{r}</li> }).collect_view()}
                    </ul>
                </div>
            })}
        </div>
    }
}
