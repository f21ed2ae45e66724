//! Output rendering for response envelopes.
//!
//! Three encodings:
//!
//! - **structured** (`json`): the full envelope, pretty-printed. Never loses
//!   information.
//! - **tabular** (`table`): aligned columns from a [`ColumnDefinition`] slice,
//!   or a field/value table for single items, plus a next-page hint when the
//!   API reported more results and gave a cursor.
//! - **minimal** (`plain`): one primary field per item, one per line.
//!
//! Tabular and minimal apply to successes only. Errors always render
//! structured.

pub mod colors;
pub mod columns;
pub mod table;

pub use columns::{display_value, truncate, CellFormatter, ColumnDefinition};

use crate::envelope::{PageInfo, ResponseEnvelope};
use clap::ValueEnum;
use serde_json::Value;

/// Primary field used by minimal mode when a command names none.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    #[value(name = "json")]
    Structured,
    #[value(name = "table")]
    Tabular,
    #[value(name = "plain")]
    Minimal,
}

/// Per-command rendering hints.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Column table for lists (and single items without a summary).
    pub columns: Option<&'static [ColumnDefinition]>,
    /// Field printed in minimal mode.
    pub primary_key: Option<&'static str>,
    /// Condensed field/value view of a single item for tabular mode.
    pub summary: Option<Value>,
}

impl RenderOptions {
    pub fn list(columns: &'static [ColumnDefinition], primary_key: &'static str) -> Self {
        Self {
            columns: Some(columns),
            primary_key: Some(primary_key),
            summary: None,
        }
    }

    pub fn item(primary_key: &'static str) -> Self {
        Self {
            columns: None,
            primary_key: Some(primary_key),
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: Value) -> Self {
        self.summary = Some(summary);
        self
    }
}

/// Render `envelope` in `format`. The result carries no trailing newline.
pub fn render(
    envelope: &ResponseEnvelope,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<String, serde_json::Error> {
    if !envelope.is_success() {
        return envelope.to_pretty_json();
    }
    match format {
        OutputFormat::Structured => envelope.to_pretty_json(),
        OutputFormat::Tabular => render_tabular(envelope, options),
        OutputFormat::Minimal => Ok(render_minimal(envelope, options)),
    }
}

fn render_tabular(
    envelope: &ResponseEnvelope,
    options: &RenderOptions,
) -> Result<String, serde_json::Error> {
    match envelope {
        ResponseEnvelope::SuccessList { data, page_info } => match options.columns {
            Some(columns) => {
                let mut out = table::column_table(columns, data);
                if let Some(hint) = page_info.as_ref().and_then(pagination_hint) {
                    out.push_str("\n\n");
                    out.push_str(&colors::dim(&hint));
                }
                Ok(out)
            }
            None => envelope.to_pretty_json(),
        },
        ResponseEnvelope::Success { data } => {
            if let Some(Value::Object(summary)) = &options.summary {
                return Ok(table::key_value_table(summary));
            }
            match (options.columns, data) {
                (Some(columns), Value::Object(_)) => {
                    Ok(table::column_table(columns, std::slice::from_ref(data)))
                }
                (_, Value::Object(fields)) => Ok(table::key_value_table(fields)),
                _ => envelope.to_pretty_json(),
            }
        }
        ResponseEnvelope::Error(_) => envelope.to_pretty_json(),
    }
}

fn render_minimal(envelope: &ResponseEnvelope, options: &RenderOptions) -> String {
    let key = options.primary_key.unwrap_or(DEFAULT_PRIMARY_KEY);
    match envelope {
        ResponseEnvelope::SuccessList { data, .. } => data
            .iter()
            .map(|row| primary_value(row, key))
            .collect::<Vec<_>>()
            .join("\n"),
        ResponseEnvelope::Success { data } => primary_value(data, key),
        ResponseEnvelope::Error(_) => String::new(),
    }
}

fn primary_value(item: &Value, key: &str) -> String {
    match item {
        Value::Object(fields) => fields.get(key).map(display_value).unwrap_or_default(),
        scalar => display_value(scalar),
    }
}

/// The next-page hint, only when another page exists and a cursor is known.
pub fn pagination_hint(page_info: &PageInfo) -> Option<String> {
    page_info
        .next_cursor()
        .map(|cursor| format!("More results available. Use --after {}", cursor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{build_error, build_success, build_success_list};
    use crate::error::ErrorCode;
    use serde_json::json;

    const ID_COLUMNS: &[ColumnDefinition] = &[ColumnDefinition::new("id", "ID")];

    fn page(has_next_page: bool, end_cursor: Option<&str>) -> PageInfo {
        PageInfo {
            has_next_page,
            has_previous_page: false,
            start_cursor: None,
            end_cursor: end_cursor.map(str::to_string),
        }
    }

    #[test]
    fn test_structured_is_pretty_envelope() {
        let envelope = build_success(json!({"id": "x"}));
        let out = render(&envelope, OutputFormat::Structured, &RenderOptions::default()).unwrap();
        assert!(out.contains('\n'));
        let decoded: ResponseEnvelope = serde_json::from_str(&out).unwrap();
        assert_eq!(decoded, envelope);
    }

    #[test]
    fn test_single_item_with_columns_renders_one_row() {
        colors::disable();
        let envelope = build_success(json!({"id": "x"}));
        let options = RenderOptions {
            columns: Some(ID_COLUMNS),
            ..Default::default()
        };
        let out = render(&envelope, OutputFormat::Tabular, &options).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("ID"));
        assert!(lines[1].contains('x'));
    }

    #[test]
    fn test_error_falls_back_to_structured_in_every_format() {
        let envelope = build_error(ErrorCode::NotFound, "Issue ENG-1 not found", None);
        let structured =
            render(&envelope, OutputFormat::Structured, &RenderOptions::default()).unwrap();
        for format in [OutputFormat::Tabular, OutputFormat::Minimal] {
            let options = RenderOptions::list(ID_COLUMNS, "id");
            assert_eq!(render(&envelope, format, &options).unwrap(), structured);
        }
    }

    #[test]
    fn test_list_hint_references_cursor() {
        colors::disable();
        let envelope = build_success_list(vec![json!({"id": "1"})], Some(page(true, Some("c1"))));
        let out = render(
            &envelope,
            OutputFormat::Tabular,
            &RenderOptions::list(ID_COLUMNS, "id"),
        )
        .unwrap();
        assert!(out.ends_with("More results available. Use --after c1"));
    }

    #[test]
    fn test_no_hint_without_next_page_or_cursor() {
        colors::disable();
        for page_info in [page(false, Some("c1")), page(true, None)] {
            let envelope = build_success_list(vec![json!({"id": "1"})], Some(page_info));
            let out = render(
                &envelope,
                OutputFormat::Tabular,
                &RenderOptions::list(ID_COLUMNS, "id"),
            )
            .unwrap();
            assert!(!out.contains("More results"));
        }
    }

    #[test]
    fn test_minimal_prints_primary_field_per_line_without_hint() {
        let envelope = build_success_list(
            vec![json!({"identifier": "ENG-1"}), json!({"identifier": "ENG-2"})],
            Some(page(true, Some("c1"))),
        );
        let out = render(
            &envelope,
            OutputFormat::Minimal,
            &RenderOptions::list(ID_COLUMNS, "identifier"),
        )
        .unwrap();
        assert_eq!(out, "ENG-1\nENG-2");
    }

    #[test]
    fn test_minimal_single_item_defaults_to_id() {
        let envelope = build_success(json!({"id": "abc", "name": "n"}));
        let out = render(&envelope, OutputFormat::Minimal, &RenderOptions::default()).unwrap();
        assert_eq!(out, "abc");
    }

    #[test]
    fn test_summary_overrides_item_fields_in_table_mode() {
        colors::disable();
        let envelope = build_success(json!({"id": "abc", "labels": [{"name": "bug"}]}));
        let options = RenderOptions::item("id").with_summary(json!({"labels": "bug"}));
        let out = render(&envelope, OutputFormat::Tabular, &options).unwrap();
        assert!(out.contains("labels"));
        assert!(out.contains("bug"));
        assert!(!out.contains("abc"));
    }

    #[test]
    fn test_list_without_columns_stays_structured() {
        let envelope = build_success_list(vec![json!({"id": "1"})], None);
        let out = render(&envelope, OutputFormat::Tabular, &RenderOptions::default()).unwrap();
        assert_eq!(out, envelope.to_pretty_json().unwrap());
    }
}
