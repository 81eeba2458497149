//! HTML fragments
//!
//! Markup for the result panel targets. Every piece of text passes through
//! [`escape`]; server data never reaches the output unescaped.

use std::fmt::Write;

use super::view::{AnalysisView, MetricView, RowView};

/// Escape text for use in element content and double-quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `<span id="result-…" class="…">text</span>`
pub fn metric(view: &MetricView, class: Option<&str>) -> String {
    match class {
        Some(class) => format!(
            r#"<span id="{}" class="{}">{}</span>"#,
            escape(&view.target),
            escape(class),
            escape(&view.text)
        ),
        None => format!(
            r#"<span id="{}">{}</span>"#,
            escape(&view.target),
            escape(&view.text)
        ),
    }
}

/// One `<tr>` of the detail table
pub fn row(view: &RowView) -> String {
    let mut out = String::new();
    match view.row_class {
        Some(class) => {
            let _ = write!(out, r#"<tr class="{}">"#, class);
        }
        None => out.push_str("<tr>"),
    }

    let description = escape(&view.description);
    if view.italic {
        let _ = write!(out, "<td><em>{}</em></td>", description);
    } else {
        let _ = write!(out, "<td>{}</td>", description);
    }

    let _ = write!(
        out,
        r#"<td class="{}">{}</td></tr>"#,
        view.value_class,
        escape(&view.value)
    );
    out
}

/// `<tbody>` with one row per detail row
pub fn table_body(rows: &[RowView]) -> String {
    let mut out = String::from("<tbody>");
    for r in rows {
        out.push_str(&row(r));
    }
    out.push_str("</tbody>");
    out
}

/// Badge plus the non-empty bullet lists
pub fn analysis(view: &AnalysisView) -> String {
    let mut out = format!(
        r#"<div class="analysis"><span class="badge {}">{}</span>"#,
        view.badge_class,
        escape(&view.badge_label)
    );
    bullet_list(&mut out, "Alertas", &view.alerts);
    bullet_list(&mut out, "Recomendações", &view.recommendations);
    out.push_str("</div>");
    out
}

fn bullet_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = write!(out, "<h6>{}</h6><ul>", title);
    for item in items {
        let _ = write!(out, "<li>{}</li>", escape(item));
    }
    out.push_str("</ul>");
}
