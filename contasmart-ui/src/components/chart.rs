//! Chart Component
//!
//! Net-profit trend of the local DRE history, drawn on an HTML5 Canvas.

use chrono::{DateTime, Utc};
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use contasmart::format;

const LINE_COLOR: &str = "#0d6efd";
const PROFIT_COLOR: &str = "#198754";
const LOSS_COLOR: &str = "#dc3545";
const GRID_COLOR: &str = "#dee2e6";
const LABEL_COLOR: &str = "#6c757d";

/// Line chart of `(date, lucro_liquido)` points, oldest first
#[component]
pub fn ProfitChart(#[prop(into)] series: Signal<Vec<(DateTime<Utc>, f64)>>) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        let points = series.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &points);
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width="800"
            height="300"
            class="w-100 border rounded bg-white"
        />
    }
}

/// Vertical bounds with 10% padding; always contains zero
fn value_bounds(points: &[(DateTime<Utc>, f64)]) -> (f64, f64) {
    let (mut min, mut max) = points
        .iter()
        .fold((0.0_f64, 0.0_f64), |(lo, hi), (_, v)| (lo.min(*v), hi.max(*v)));

    let padding = if max > min { (max - min) * 0.1 } else { 1.0 };
    min -= padding;
    max += padding;
    (min, max)
}

fn draw_chart(canvas: &HtmlCanvasElement, points: &[(DateTime<Utc>, f64)]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    let margin_left = 110.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    ctx.set_fill_style(&"#ffffff".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    if points.is_empty() {
        ctx.set_fill_style(&LABEL_COLOR.into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("Nenhum cálculo salvo ainda", width / 2.0 - 100.0, height / 2.0);
        return;
    }

    let (min, max) = value_bounds(points);
    let scale_y = |value: f64| margin_top + ((max - value) / (max - min)) * chart_height;
    let scale_x = |i: usize| {
        if points.len() == 1 {
            margin_left + chart_width / 2.0
        } else {
            margin_left + (i as f64 / (points.len() - 1) as f64) * chart_width
        }
    };

    // Grid and y-axis labels
    ctx.set_stroke_style(&GRID_COLOR.into());
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=4 {
        let y = margin_top + (i as f64 / 4.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = max - (i as f64 / 4.0) * (max - min);
        ctx.set_fill_style(&LABEL_COLOR.into());
        let _ = ctx.fill_text(&format::currency(value), 5.0, y + 4.0);
    }

    // Zero line
    ctx.set_stroke_style(&LABEL_COLOR.into());
    ctx.begin_path();
    ctx.move_to(margin_left, scale_y(0.0));
    ctx.line_to(width - margin_right, scale_y(0.0));
    ctx.stroke();

    // Series
    ctx.set_stroke_style(&LINE_COLOR.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, (_, value)) in points.iter().enumerate() {
        let (x, y) = (scale_x(i), scale_y(*value));
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.stroke();

    for (i, (_, value)) in points.iter().enumerate() {
        let color = if *value < 0.0 { LOSS_COLOR } else { PROFIT_COLOR };
        ctx.set_fill_style(&color.into());
        ctx.begin_path();
        let _ = ctx.arc(scale_x(i), scale_y(*value), 4.0, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();
    }

    // X-axis labels: first, middle and last calculation
    ctx.set_fill_style(&LABEL_COLOR.into());
    let mut labelled = vec![0, points.len() / 2, points.len() - 1];
    labelled.dedup();
    for i in labelled {
        let label = points[i].0.format("%d/%m %H:%M").to_string();
        let _ = ctx.fill_text(&label, scale_x(i) - 30.0, height - 10.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_include_zero() {
        let now = Utc::now();
        let (min, max) = value_bounds(&[(now, 1000.0), (now, 3000.0)]);
        assert!(min < 0.0);
        assert!(max > 3000.0);
    }

    #[test]
    fn test_bounds_flat_series() {
        let (min, max) = value_bounds(&[]);
        assert_eq!((min, max), (-1.0, 1.0));
    }
}
