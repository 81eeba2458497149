//! Result panel
//!
//! The named display targets of one statement form: a text slot per summary
//! metric, the emphasis class of the highlighted metric, the detail table
//! body and the analysis block. Painting always starts from a cleared panel,
//! so repainting the same view gives the same snapshot.

use super::html;
use super::view::{AnalysisView, Emphasis, MetricView, ResultView, RowView};
use crate::statement::{metric_target_id, StatementKind};

/// Text a metric slot shows before the first calculation
pub const EMPTY_METRIC: &str = "R$ 0,00";

#[derive(Debug, Clone, PartialEq)]
pub struct ResultPanel {
    kind: StatementKind,
    metrics: Vec<MetricView>,
    highlight: Option<(String, Emphasis)>,
    rows: Vec<RowView>,
    analysis: Option<AnalysisView>,
}

impl ResultPanel {
    pub fn new(kind: StatementKind) -> Self {
        let mut panel = Self {
            kind,
            metrics: Vec::new(),
            highlight: None,
            rows: Vec::new(),
            analysis: None,
        };
        panel.clear();
        panel
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Reset every metric to [`EMPTY_METRIC`], drop the emphasis and empty
    /// the table and analysis
    pub fn clear(&mut self) {
        self.metrics = self
            .kind
            .metrics()
            .iter()
            .map(|spec| MetricView {
                key: spec.key,
                label: spec.label,
                target: metric_target_id(spec.key),
                text: EMPTY_METRIC.to_string(),
            })
            .collect();
        self.highlight = None;
        self.rows.clear();
        self.analysis = None;
    }

    /// Replace the panel content with `view`
    pub fn paint(&mut self, view: &ResultView) {
        self.kind = view.kind;
        self.clear();

        for metric in &view.metrics {
            if let Some(slot) = self.metrics.iter_mut().find(|m| m.target == metric.target) {
                slot.text.clone_from(&metric.text);
            }
        }
        self.highlight = Some(view.highlight.clone());
        self.rows = view.rows.clone();
        self.analysis = view.analysis.clone();
    }

    /// Text currently shown by a target, e.g. `result-lucro-liquido`
    pub fn text(&self, target: &str) -> Option<&str> {
        self.metrics
            .iter()
            .find(|m| m.target == target)
            .map(|m| m.text.as_str())
    }

    /// Emphasis class of a target, if it carries one
    pub fn class(&self, target: &str) -> Option<&'static str> {
        match &self.highlight {
            Some((id, emphasis)) if id == target => Some(emphasis.class()),
            _ => None,
        }
    }

    pub fn metrics(&self) -> &[MetricView] {
        &self.metrics
    }

    pub fn rows(&self) -> &[RowView] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn analysis(&self) -> Option<&AnalysisView> {
        self.analysis.as_ref()
    }

    /// Whether a result is currently shown
    pub fn is_painted(&self) -> bool {
        self.highlight.is_some()
    }

    /// Escaped HTML of every target, in a fixed order
    pub fn snapshot(&self) -> String {
        let mut out = String::from(r#"<div class="metrics">"#);
        for metric in &self.metrics {
            out.push_str(&html::metric(metric, self.class(&metric.target)));
        }
        out.push_str("</div>");

        out.push_str(&html::table_body(&self.rows));

        if let Some(analysis) = &self.analysis {
            out.push_str(&html::analysis(analysis));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CalculationResult;
    use crate::test_utils::dre_success_body;

    fn view_for(lucro: f64) -> ResultView {
        let result: CalculationResult = serde_json::from_value(dre_success_body(lucro)).unwrap();
        ResultView::build(StatementKind::Dre, &result).unwrap()
    }

    #[test]
    fn test_new_panel_is_empty() {
        let panel = ResultPanel::new(StatementKind::Dre);
        assert_eq!(panel.text("result-lucro-liquido"), Some(EMPTY_METRIC));
        assert_eq!(panel.class("result-lucro-liquido"), None);
        assert_eq!(panel.row_count(), 0);
        assert!(!panel.is_painted());
    }

    #[test]
    fn test_paint_is_idempotent() {
        let view = view_for(3200.0);
        let mut panel = ResultPanel::new(StatementKind::Dre);

        panel.paint(&view);
        let first = panel.snapshot();
        panel.paint(&view);
        let second = panel.snapshot();

        assert_eq!(first, second);
        assert_eq!(panel.row_count(), 5);
        assert_eq!(second.matches("<tr").count(), 5);
    }

    #[test]
    fn test_repaint_replaces_previous_result() {
        let mut panel = ResultPanel::new(StatementKind::Dre);
        panel.paint(&view_for(-50.0));
        panel.paint(&view_for(50.0));

        assert_eq!(panel.text("result-lucro-liquido"), Some("R$ 50,00"));
        assert_eq!(panel.class("result-lucro-liquido"), Some("alert alert-success"));
        assert_eq!(panel.row_count(), 5);
    }

    #[test]
    fn test_negative_profit_is_danger() {
        let mut panel = ResultPanel::new(StatementKind::Dre);
        panel.paint(&view_for(-50.0));
        assert_eq!(panel.class("result-lucro-liquido"), Some("alert alert-danger"));
        assert!(panel
            .snapshot()
            .contains(r#"id="result-lucro-liquido" class="alert alert-danger""#));
    }

    #[test]
    fn test_clear() {
        let mut panel = ResultPanel::new(StatementKind::Dre);
        panel.paint(&view_for(3200.0));
        panel.clear();

        assert_eq!(panel, ResultPanel::new(StatementKind::Dre));
        assert!(panel.analysis().is_none());
    }

    #[test]
    fn test_snapshot_escapes_server_text() {
        let mut result: CalculationResult =
            serde_json::from_value(dre_success_body(1.0)).unwrap();
        result.tabela_detalhada[0].descricao = "<img src=x onerror=alert(1)>".to_string();

        let mut panel = ResultPanel::new(StatementKind::Dre);
        panel.paint(&ResultView::build(StatementKind::Dre, &result).unwrap());

        let html = panel.snapshot();
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    }
}
