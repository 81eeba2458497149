//! pt-BR Formatting
//!
//! Currency, percentage, number and date formatting used by the renderer,
//! the CLI and the browser UI. Every function is pure; non-finite input
//! formats as zero.

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Format a value as Brazilian currency: `R$ 1.234,56`
pub fn currency(value: f64) -> String {
    let value = finite(value);
    let body = number(value.abs());
    if value < 0.0 && has_significant_digit(&body) {
        format!("-R$ {}", body)
    } else {
        format!("R$ {}", body)
    }
}

/// Format a value already expressed in percent: `12.3456` → `12,35%`
pub fn percent(value: f64) -> String {
    format!("{}%", number(value))
}

/// Format a number with two decimal places and `.` thousands grouping
pub fn number(value: f64) -> String {
    number_with_places(value, 2)
}

/// Format a number with `places` decimal places and `.` thousands grouping
pub fn number_with_places(value: f64, places: usize) -> String {
    let value = finite(value);
    let raw = format!("{:.*}", places, value.abs());

    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut out = String::with_capacity(raw.len() + int_part.len() / 3 + 1);
    if value < 0.0 && has_significant_digit(&raw) {
        out.push('-');
    }

    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }

    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }

    out
}

/// Format a calendar date as `DD/MM/YYYY`
pub fn date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format a timestamp as `DD/MM/YYYY HH:MM`
pub fn date_time(instant: DateTime<Utc>) -> String {
    instant.format("%d/%m/%Y %H:%M").to_string()
}

/// Convert an ISO `YYYY-MM-DD` date string to `DD/MM/YYYY`
pub fn iso_date(text: &str) -> Option<String> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .ok()
        .map(date)
}

/// Lenient parse of a user-entered amount.
///
/// Accepts `1234.56`, `1234,56`, `1.234,56`, `1.234.567` and an optional
/// `R$` prefix. A single dot without a comma is a decimal point; two or more
/// dots are thousands separators. Returns `None` for empty or non-numeric
/// input.
pub fn parse_amount(text: &str) -> Option<f64> {
    let text = text.trim().trim_start_matches("R$").trim();
    if !amount_pattern().is_match(text) {
        return None;
    }

    let normalized = if text.contains(',') || text.matches('.').count() > 1 {
        text.replace('.', "").replace(',', ".")
    } else {
        text.to_string()
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^-?(?:\d+(?:\.\d+)?|\d{1,3}(?:\.\d{3})*(?:,\d+)?|\d+,\d+)$")
            .expect("amount pattern is valid")
    })
}

fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn has_significant_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit() && c != '0')
}
