//! Result view model
//!
//! A [`ResultView`] is everything the panel shows for one successful
//! calculation, with all display decisions already taken: texts formatted,
//! CSS classes chosen, empty lists dropped.

use crate::api::{rejection, Analysis, CalculationResult, DetailRow, RequestResult, RowKind};
use crate::format;
use crate::statement::{metric_target_id, MetricFormat, MetricSpec, StatementKind};

/// Shown when a metric is neither formatted by the server nor computed
pub const MISSING_VALUE: &str = "N/A";

/// Emphasis of the highlighted metric box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Success,
    Danger,
}

impl Emphasis {
    /// `>= 0` is success, anything negative is danger
    pub fn for_value(value: f64) -> Self {
        if value < 0.0 {
            Emphasis::Danger
        } else {
            Emphasis::Success
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Emphasis::Success => "alert alert-success",
            Emphasis::Danger => "alert alert-danger",
        }
    }
}

/// One summary metric
#[derive(Debug, Clone, PartialEq)]
pub struct MetricView {
    pub key: &'static str,
    pub label: &'static str,
    /// DOM id of the target element
    pub target: String,
    pub text: String,
}

/// One row of the detail table
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub description: String,
    pub value: String,
    /// Class of the `<tr>`, `None` for plain rows
    pub row_class: Option<&'static str>,
    pub value_class: &'static str,
    /// Computed rows show their description in italics
    pub italic: bool,
}

impl RowView {
    pub fn from_row(row: &DetailRow) -> Self {
        let row_class = match row.tipo {
            RowKind::Normal => None,
            RowKind::Total => Some("table-active fw-bold"),
            RowKind::TotalFinal => Some("table-active fw-bold table-success"),
        };

        let value_class = if row.valor < 0.0 && row.tipo != RowKind::TotalFinal {
            "text-end text-danger"
        } else {
            "text-end"
        };

        let value = row
            .valor_formatado
            .clone()
            .unwrap_or_else(|| format::currency(row.valor));

        Self {
            description: row.descricao.clone(),
            value,
            row_class,
            value_class,
            italic: row.calculado,
        }
    }
}

/// Profitability badge plus alert and recommendation lists
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    pub badge_label: String,
    pub badge_class: &'static str,
    pub alerts: Vec<String>,
    pub recommendations: Vec<String>,
}

impl From<&Analysis> for AnalysisView {
    fn from(analysis: &Analysis) -> Self {
        Self {
            badge_label: analysis.rentabilidade.label().to_string(),
            badge_class: analysis.rentabilidade.badge_class(),
            alerts: analysis.alertas.clone(),
            recommendations: analysis.recomendacoes.clone(),
        }
    }
}

/// Everything painted for one successful calculation
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub kind: StatementKind,
    pub metrics: Vec<MetricView>,
    /// Target id of the emphasized metric and its emphasis
    pub highlight: (String, Emphasis),
    pub rows: Vec<RowView>,
    pub analysis: Option<AnalysisView>,
}

impl ResultView {
    /// Build the view for a calculation answer. A `sucesso: false` answer
    /// yields the same error the client would have returned.
    pub fn build(kind: StatementKind, result: &CalculationResult) -> RequestResult<Self> {
        if !result.sucesso {
            return Err(rejection(kind, result));
        }

        let metrics = kind
            .metrics()
            .iter()
            .map(|spec| MetricView {
                key: spec.key,
                label: spec.label,
                target: metric_target_id(spec.key),
                text: metric_text(spec, result),
            })
            .collect();

        let highlight_value = result.figure(kind.highlight_key()).unwrap_or(0.0);
        let highlight = (
            metric_target_id(kind.highlight_key()),
            Emphasis::for_value(highlight_value),
        );

        Ok(Self {
            kind,
            metrics,
            highlight,
            rows: result.tabela_detalhada.iter().map(RowView::from_row).collect(),
            analysis: result.analise.as_ref().map(AnalysisView::from),
        })
    }

    pub fn metric(&self, key: &str) -> Option<&MetricView> {
        self.metrics.iter().find(|m| m.key == key)
    }

    pub fn emphasis(&self) -> Emphasis {
        self.highlight.1
    }
}

/// Server text, else local formatting of the figure, else [`MISSING_VALUE`]
fn metric_text(spec: &MetricSpec, result: &CalculationResult) -> String {
    if let Some(text) = result.formatted(spec.key) {
        return text.to_string();
    }

    match result.figure(spec.key) {
        Some(value) => match spec.format {
            MetricFormat::Currency => format::currency(value),
            MetricFormat::Percent => format::percent(value),
            MetricFormat::Number => format::number(value),
        },
        None => MISSING_VALUE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Profitability, RequestError};
    use crate::test_utils::balanco_success_body;
    use std::collections::BTreeMap;

    fn result_with_profit(lucro: f64) -> CalculationResult {
        let mut calculos = BTreeMap::new();
        calculos.insert("lucro_liquido".to_string(), lucro);
        calculos.insert("margem_liquida".to_string(), 12.5);
        CalculationResult {
            sucesso: true,
            calculos,
            ..Default::default()
        }
    }

    #[test]
    fn test_emphasis() {
        assert_eq!(Emphasis::for_value(-50.0), Emphasis::Danger);
        assert_eq!(Emphasis::for_value(50.0), Emphasis::Success);
        assert_eq!(Emphasis::for_value(0.0), Emphasis::Success);
        assert_eq!(Emphasis::Danger.class(), "alert alert-danger");
    }

    #[test]
    fn test_metric_text_fallbacks() {
        let mut result = result_with_profit(3200.0);
        result
            .formatado
            .insert("lucro_liquido".to_string(), "R$ 3.200,00 (srv)".to_string());

        let view = ResultView::build(StatementKind::Dre, &result).unwrap();
        assert_eq!(view.metric("lucro_liquido").unwrap().text, "R$ 3.200,00 (srv)");
        assert_eq!(view.metric("margem_liquida").unwrap().text, "12,50%");
        assert_eq!(view.metric("receita_bruta").unwrap().text, MISSING_VALUE);
        assert_eq!(
            view.metric("lucro_liquido").unwrap().target,
            "result-lucro-liquido"
        );
    }

    #[test]
    fn test_highlight_negative_profit() {
        let view = ResultView::build(StatementKind::Dre, &result_with_profit(-50.0)).unwrap();
        assert_eq!(view.highlight.0, "result-lucro-liquido");
        assert_eq!(view.emphasis(), Emphasis::Danger);
    }

    #[test]
    fn test_balanco_metrics_and_negative_equity() {
        let result: CalculationResult =
            serde_json::from_value(balanco_success_body(-50.0)).unwrap();
        let view = ResultView::build(StatementKind::Balanco, &result).unwrap();

        assert_eq!(view.metric("ativo_total").unwrap().text, "R$ 150.000,00");
        assert_eq!(view.metric("passivo_total").unwrap().text, "R$ 70.000,00");
        assert_eq!(view.metric("patrimonio_liquido").unwrap().text, "-R$ 50,00");
        assert_eq!(view.metric("liquidez_corrente").unwrap().text, "1.50");
        assert_eq!(view.metric("endividamento_total").unwrap().text, "46.67%");
        assert!(view.metrics.iter().all(|m| m.text != MISSING_VALUE));

        assert_eq!(view.highlight.0, "result-patrimonio-liquido");
        assert_eq!(view.emphasis(), Emphasis::Danger);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn test_balanco_positive_equity_is_success() {
        let result: CalculationResult =
            serde_json::from_value(balanco_success_body(80000.0)).unwrap();
        let view = ResultView::build(StatementKind::Balanco, &result).unwrap();
        assert_eq!(view.metric("patrimonio_liquido").unwrap().text, "R$ 80.000,00");
        assert_eq!(view.emphasis(), Emphasis::Success);
    }

    #[test]
    fn test_row_classes() {
        let plain = RowView::from_row(&DetailRow::new("(-) Custos", -4000.0));
        assert_eq!(plain.row_class, None);
        assert_eq!(plain.value_class, "text-end text-danger");
        assert_eq!(plain.value, "-R$ 4.000,00");
        assert!(!plain.italic);

        let total = RowView::from_row(&DetailRow::new("Lucro Bruto", 6000.0).kind(RowKind::Total).calculated());
        assert_eq!(total.row_class, Some("table-active fw-bold"));
        assert_eq!(total.value_class, "text-end");
        assert!(total.italic);

        let last = RowView::from_row(&DetailRow::new("Prejuízo", -10.0).kind(RowKind::TotalFinal));
        assert_eq!(last.row_class, Some("table-active fw-bold table-success"));
        assert_eq!(last.value_class, "text-end");
    }

    #[test]
    fn test_row_prefers_server_text() {
        let mut row = DetailRow::new("Receita", 10.0);
        row.valor_formatado = Some("R$ 10,00*".to_string());
        assert_eq!(RowView::from_row(&row).value, "R$ 10,00*");
    }

    #[test]
    fn test_analysis_view() {
        let mut result = result_with_profit(1.0);
        result.analise = Some(Analysis {
            rentabilidade: Profitability::Baixa,
            alertas: vec!["Margem abaixo de 5%".to_string()],
            recomendacoes: vec![],
        });

        let view = ResultView::build(StatementKind::Dre, &result).unwrap();
        let analysis = view.analysis.unwrap();
        assert_eq!(analysis.badge_label, "BAIXA");
        assert_eq!(analysis.badge_class, "bg-warning");
        assert_eq!(analysis.alerts.len(), 1);
        assert!(analysis.recommendations.is_empty());
    }

    #[test]
    fn test_unsuccessful_result_is_error() {
        let result = CalculationResult {
            sucesso: false,
            erro: Some("Dados inválidos".to_string()),
            ..Default::default()
        };
        assert_eq!(
            ResultView::build(StatementKind::Dre, &result),
            Err(RequestError::Api("Dados inválidos".to_string()))
        );
    }
}
