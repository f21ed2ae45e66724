//! Shared presentation: cell formatters reused across entity tables.

use crate::render::colors;
use crate::render::display_value;
use serde_json::Value;

/// Issue priority as a colored label (0 none, 1 urgent ... 4 low).
pub fn priority_label(priority: i64) -> String {
    match priority {
        0 => colors::gray("None"),
        1 => colors::red("Urgent"),
        2 => colors::yellow("High"),
        3 => colors::blue("Medium"),
        4 => colors::dim("Low"),
        other => other.to_string(),
    }
}

pub fn priority_cell(value: &Value, _row: &Value) -> String {
    match value.as_f64() {
        Some(p) => priority_label(p as i64),
        None => display_value(value),
    }
}

/// Completion ratio (0.0 to 1.0) as a rounded, colored percentage.
pub fn progress_label(progress: f64) -> String {
    let percent = (progress * 100.0).round() as i64;
    let text = format!("{}%", percent);
    if percent >= 100 {
        colors::green(&text)
    } else if percent >= 75 {
        colors::cyan(&text)
    } else if percent >= 50 {
        colors::yellow(&text)
    } else {
        colors::dim(&text)
    }
}

pub fn progress_cell(value: &Value, _row: &Value) -> String {
    value.as_f64().map(progress_label).unwrap_or_default()
}

/// Date part of an ISO-8601 timestamp.
pub fn date_part(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

pub fn date_cell(value: &Value, _row: &Value) -> String {
    value.as_str().map(date_part).unwrap_or_default().to_string()
}

pub fn bold_cell(value: &Value, _row: &Value) -> String {
    colors::bold(&display_value(value))
}

pub fn dim_cell(value: &Value, _row: &Value) -> String {
    colors::dim(&display_value(value))
}

pub fn cyan_cell(value: &Value, _row: &Value) -> String {
    colors::cyan(&display_value(value))
}

/// Dimmed value, or a gray placeholder when the value is null or empty.
pub fn dim_or(value: &Value, placeholder: &str) -> String {
    match value {
        Value::Null => colors::gray(placeholder),
        Value::String(s) if s.is_empty() => colors::gray(placeholder),
        other => colors::dim(&display_value(other)),
    }
}

/// Collapse line breaks so multi-line text fits on one table row.
pub fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text value, or `fallback` when the value is null or empty.
pub fn text_or(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Null) | None => fallback.to_string(),
        Some(Value::String(_)) => fallback.to_string(),
        Some(other) => display_value(other),
    }
}
