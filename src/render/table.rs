//! Border-less aligned tables.

use super::colors;
use super::columns::{display_value, ColumnDefinition};
use comfy_table::presets::NOTHING;
use comfy_table::{ContentArrangement, Table};
use serde_json::{Map, Value};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Disabled);
    table
}

fn finish(table: &Table) -> String {
    table
        .to_string()
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

/// One header row, then one row per item. Cells never wrap.
pub fn column_table(columns: &[ColumnDefinition], rows: &[Value]) -> String {
    let mut table = new_table();
    table.set_header(
        columns
            .iter()
            .map(|c| colors::bold(c.header))
            .collect::<Vec<_>>(),
    );
    for row in rows {
        table.add_row(columns.iter().map(|c| c.cell(row)).collect::<Vec<_>>());
    }
    finish(&table)
}

/// Two columns: field name and value, in the object's key order.
pub fn key_value_table(fields: &Map<String, Value>) -> String {
    let mut table = new_table();
    for (key, value) in fields {
        table.add_row(vec![colors::dim(key), display_value(value)]);
    }
    finish(&table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_column_table_has_header_and_rows() {
        colors::disable();
        let columns = [
            ColumnDefinition::new("id", "ID"),
            ColumnDefinition::new("name", "NAME"),
        ];
        let out = column_table(&columns, &[json!({"id": "x", "name": "First"})]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("ID") && lines[0].contains("NAME"));
        assert!(lines[1].contains('x') && lines[1].contains("First"));
    }

    #[test]
    fn test_columns_are_aligned() {
        colors::disable();
        let columns = [
            ColumnDefinition::new("a", "A"),
            ColumnDefinition::new("b", "B"),
        ];
        let rows = [json!({"a": "long value", "b": "1"}), json!({"a": "s", "b": "2"})];
        let out = column_table(&columns, &rows);
        let lines: Vec<&str> = out.lines().collect();
        let b_col = lines[0].find('B').unwrap();
        assert_eq!(lines[1].find('1'), Some(b_col));
        assert_eq!(lines[2].find('2'), Some(b_col));
    }

    #[test]
    fn test_key_value_table() {
        colors::disable();
        let fields = json!({"identifier": "ENG-1", "title": "Fix"});
        let out = key_value_table(fields.as_object().unwrap());
        assert!(out.lines().any(|l| l.contains("identifier") && l.contains("ENG-1")));
        assert!(out.lines().any(|l| l.contains("title") && l.contains("Fix")));
    }
}
