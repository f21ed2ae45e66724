//! Column definitions for tabular output.
//!
//! A table is an ordered slice of [`ColumnDefinition`] records, declared as
//! data per entity type. The renderer looks up each column's key in a row and
//! hands the raw value and the whole row to the formatter. String cells are
//! cut to the column width afterwards, counting only visible characters.

use serde_json::Value;

/// Turns a cell value into display text. Receives the full row so a cell can
/// depend on sibling fields.
pub type CellFormatter = fn(&Value, &Value) -> String;

#[derive(Debug, Clone, Copy)]
pub struct ColumnDefinition {
    pub key: &'static str,
    pub header: &'static str,
    /// Maximum visible characters for string values, applied to the
    /// formatted text so formatters always see the full value.
    pub width: Option<usize>,
    pub formatter: Option<CellFormatter>,
}

impl ColumnDefinition {
    pub const fn new(key: &'static str, header: &'static str) -> Self {
        Self {
            key,
            header,
            width: None,
            formatter: None,
        }
    }

    pub const fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub const fn format(mut self, formatter: CellFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Display text for this column in `row`.
    pub fn cell(&self, row: &Value) -> String {
        let raw = row.get(self.key).unwrap_or(&Value::Null);
        let text = match self.formatter {
            Some(formatter) => formatter(raw, row),
            None => display_value(raw),
        };
        match (raw, self.width) {
            (Value::String(_), Some(width)) => truncate_styled(&text, width),
            _ => text,
        }
    }
}

/// Plain text for a JSON value: strings unquoted, null empty, compound
/// values as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Cut `text` to at most `width` characters, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// [`truncate`] for text that may carry ANSI escape sequences. Escapes do
/// not count towards the width and are all kept, so styling is still reset
/// after a cut.
pub fn truncate_styled(text: &str, width: usize) -> String {
    if visible_len(text) <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(1);
    let mut out = String::with_capacity(text.len());
    let mut shown = 0;
    let mut cut = false;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            out.push(c);
            copy_escape(&mut chars, &mut out);
            continue;
        }
        if shown < keep {
            out.push(c);
            shown += 1;
        } else if !cut {
            if width > 0 {
                out.push('…');
            }
            cut = true;
        }
    }
    out
}

/// Characters outside ANSI escape sequences.
fn visible_len(text: &str) -> usize {
    let mut count = 0;
    let mut sink = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            copy_escape(&mut chars, &mut sink);
        } else {
            count += 1;
        }
    }
    count
}

/// Copy the rest of a CSI sequence (`ESC [ ... final`) that follows an ESC.
fn copy_escape(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, out: &mut String) {
    if chars.peek() != Some(&'[') {
        return;
    }
    for c in chars.by_ref() {
        out.push(c);
        if c != '[' && ('\x40'..='\x7e').contains(&c) {
            break;
        }
    }
}
