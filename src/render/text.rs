//! Plain-text rendering for terminals

use std::fmt::Write;

use super::view::{Emphasis, ResultView};

const LABEL_WIDTH: usize = 36;

/// Render a result view as an aligned text report
pub fn render(view: &ResultView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", view.kind.title());
    let _ = writeln!(out, "{}", "=".repeat(LABEL_WIDTH + 20));

    for metric in &view.metrics {
        let marker = if metric.target == view.highlight.0 {
            match view.highlight.1 {
                Emphasis::Success => "  [+]",
                Emphasis::Danger => "  [-]",
            }
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "{:<width$} {:>18}{}",
            metric.label,
            metric.text,
            marker,
            width = LABEL_WIDTH
        );
    }

    if !view.rows.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{:<width$} {:>18}", "Descrição", "Valor", width = LABEL_WIDTH);
        let _ = writeln!(out, "{}", "-".repeat(LABEL_WIDTH + 20));
        for row in &view.rows {
            let description = if row.italic {
                format!("  {}", row.description)
            } else {
                row.description.clone()
            };
            let _ = writeln!(
                out,
                "{:<width$} {:>18}",
                description,
                row.value,
                width = LABEL_WIDTH
            );
            if row.row_class.is_some() {
                let _ = writeln!(out, "{}", "-".repeat(LABEL_WIDTH + 20));
            }
        }
    }

    if let Some(analysis) = &view.analysis {
        let _ = writeln!(out);
        let _ = writeln!(out, "Rentabilidade: {}", analysis.badge_label);
        if !analysis.alerts.is_empty() {
            let _ = writeln!(out, "Alertas:");
            for alert in &analysis.alerts {
                let _ = writeln!(out, "  - {}", alert);
            }
        }
        if !analysis.recommendations.is_empty() {
            let _ = writeln!(out, "Recomendações:");
            for rec in &analysis.recommendations {
                let _ = writeln!(out, "  - {}", rec);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CalculationResult;
    use crate::statement::StatementKind;
    use crate::test_utils::dre_success_body;

    #[test]
    fn test_render_report() {
        let result: CalculationResult =
            serde_json::from_value(dre_success_body(3200.0)).unwrap();
        let view = ResultView::build(StatementKind::Dre, &result).unwrap();

        let text = render(&view);
        assert!(text.starts_with("DRE\n"));
        assert!(text.contains("R$ 3.200,00  [+]"));
        assert!(text.contains("Rentabilidade: ALTA"));
        assert!(text.contains("  - Manter controle de custos"));
        assert!(!text.contains("Alertas:"));
    }

    #[test]
    fn test_render_loss_marker() {
        let result: CalculationResult =
            serde_json::from_value(dre_success_body(-50.0)).unwrap();
        let view = ResultView::build(StatementKind::Dre, &result).unwrap();
        assert!(render(&view).contains("-R$ 50,00  [-]"));
    }
}
