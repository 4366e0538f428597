// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Delimited-text reading and writing.
//!
//! Schedules travel as comma-separated text with a header row. Fields may
//! be quoted; a doubled quote inside a quoted field decodes to one literal
//! quote. The writer applies the inverse escaping. Column lookups are
//! case-insensitive so "Start Date", "START DATE" and "start date" resolve
//! to the same column.

use crate::error::{Error, Result};

/// A parsed delimited-text file: one header row plus data rows.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Index of a header, matched case-insensitively.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    }

    /// First matching column among several candidate names.
    pub fn column_any(&self, names: &[&str]) -> Option<usize> {
        names.iter().find_map(|n| self.column(n))
    }

    /// Value of `row` in the named column, trimmed. Empty cells read as
    /// `None`.
    pub fn value<'a>(&self, row: &'a [String], name: &str) -> Option<&'a str> {
        let idx = self.column(name)?;
        let value = row.get(idx)?.trim();
        (!value.is_empty()).then_some(value)
    }

    /// Value of `row` in the first present column among `names`.
    pub fn value_any<'a>(&self, row: &'a [String], names: &[&str]) -> Option<&'a str> {
        names.iter().find_map(|n| self.value(row, n))
    }
}

/// Parse delimited text into a table.
///
/// Blank lines are skipped. Rows whose field count differs from the header
/// are dropped rather than failing the whole file.
pub fn parse_table(text: &str) -> Result<CsvTable> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let header_line = lines.next().ok_or(Error::EmptyFile)?;
    let headers: Vec<String> = parse_line(header_line)
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();

    let rows = lines
        .map(parse_line)
        .filter(|row| row.len() == headers.len())
        .collect();

    Ok(CsvTable { headers, rows })
}

/// Split one line into fields, honoring quotes.
fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                // Doubled quote inside a quoted field is a literal quote.
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields.into_iter().map(|f| f.trim().to_string()).collect()
}

/// Serialize a header row plus data rows back to delimited text.
pub fn write_table<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    write_row(&mut out, headers.iter().map(|h| h.as_ref()));
    for row in rows {
        write_row(&mut out, row.iter().map(|f| f.as_str()));
    }
    out
}

fn write_row<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        first = false;
        out.push_str(&escape_field(field));
    }
    out.push('\n');
}

/// Quote a field when needed, doubling internal quotes.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
