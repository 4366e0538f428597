// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spreadsheet import: bind schedule rows to model elements.
//!
//! A mapping pairs one element attribute with one spreadsheet column. Each
//! row's value in that column is compared against every element's attribute
//! in traversal order; the first exact match wins and receives a
//! [`ScheduleRecord`] built from the row. Rows that match nothing are
//! counted and skipped; the import never aborts early.

use crate::csv::CsvTable;
use crate::element::{DbId, Element, ElementTable};
use crate::error::{Error, Result};
use crate::schedule::{status_color, Rgba, ScheduleRecord, ScheduleSet, Status};
use chrono::NaiveDate;

/// Column synonyms, matched case-insensitively against the header row.
pub(crate) const NAME_COLUMNS: &[&str] = &["Element Name", "Name", "ElementName"];
pub(crate) const START_COLUMNS: &[&str] =
    &["Start Date", "Scheduled Start", "Scheduled Start Date", "StartDate"];
pub(crate) const END_COLUMNS: &[&str] =
    &["End Date", "Scheduled End", "Scheduled End Date", "EndDate"];
pub(crate) const ACTUAL_START_COLUMNS: &[&str] =
    &["Actual Start", "Actual Start Date", "ActualStart"];
pub(crate) const ACTUAL_END_COLUMNS: &[&str] = &["Actual End", "Actual End Date", "ActualEnd"];
pub(crate) const STATUS_COLUMNS: &[&str] = &["Status"];
pub(crate) const PROGRESS_COLUMNS: &[&str] = &["Progress", "% Complete", "Percent Complete"];
pub(crate) const PHASE_COLUMNS: &[&str] = &["Phase", "Construction Phase"];
pub(crate) const DISCIPLINE_COLUMNS: &[&str] = &["Discipline", "Trade"];
pub(crate) const CONTRACTOR_COLUMNS: &[&str] = &["Contractor", "Responsible", "Company"];
pub(crate) const NOTES_COLUMNS: &[&str] = &["Notes", "Description", "Comments"];

/// Element attribute a spreadsheet column is matched against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingField {
    /// The source-authoring GUID the viewer exposes per element.
    ExternalId,
    /// Element display name.
    Name,
    /// The viewer's numeric element id.
    DbId,
    /// Any other property, by name.
    Property(String),
}

impl MappingField {
    /// Exact, case-sensitive comparison of one element's attribute against
    /// a spreadsheet value.
    fn matches(&self, element: &Element, value: &str) -> bool {
        match self {
            MappingField::ExternalId => element.external_id.as_deref() == Some(value),
            MappingField::Name => element.name == value,
            MappingField::DbId => value
                .parse::<DbId>()
                .map(|id| id == element.db_id)
                .unwrap_or(false),
            MappingField::Property(name) => element.property(name) == Some(value),
        }
    }
}

/// One import configuration: which element attribute is compared against
/// which spreadsheet column. Consumed by [`import_schedule`], not retained.
#[derive(Debug, Clone)]
pub struct ImportMapping {
    pub field: MappingField,
    pub column: String,
}

/// Aggregate outcome of a bulk import.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct ImportSummary {
    pub total: usize,
    pub matched: usize,
    pub failed: usize,
    /// Element ids that received a record, in row order.
    pub matched_ids: Vec<DbId>,
    /// Status highlight colors for the matched elements, ready for the
    /// viewer's theming call.
    pub colors: Vec<(DbId, Rgba)>,
}

/// Suggest a mapping column: the first header containing "id", "wbs" or
/// "guid".
pub fn detect_key_column(headers: &[String]) -> Option<&str> {
    headers
        .iter()
        .find(|h| {
            let h = h.to_lowercase();
            h.contains("id") || h.contains("wbs") || h.contains("guid")
        })
        .map(|h| h.as_str())
}

/// Run a bulk import: for every row, find the first element (in traversal
/// order) whose mapped attribute equals the row's key value, and write a
/// schedule record for it. Later rows overwrite earlier records for the
/// same element.
///
/// Fails up front when the mapping column is absent from the header;
/// everything after that is per-row and non-fatal.
pub fn import_schedule(
    table: &CsvTable,
    mapping: &ImportMapping,
    elements: &ElementTable,
    schedule: &mut ScheduleSet,
) -> Result<ImportSummary> {
    let key_column = table
        .column(&mapping.column)
        .ok_or_else(|| Error::MissingColumn(mapping.column.clone()))?;

    let mut summary = ImportSummary {
        total: table.rows.len(),
        ..Default::default()
    };

    for row in &table.rows {
        let key = row[key_column].trim();
        if key.is_empty() {
            summary.failed += 1;
            continue;
        }

        let matched = elements.iter().find(|e| mapping.field.matches(e, key));
        match matched {
            Some(element) => {
                let mut record = record_from_row(table, row, element);
                record.external_id = record
                    .external_id
                    .take()
                    .or_else(|| Some(key.to_string()));
                summary
                    .colors
                    .push((element.db_id, status_color(record.status)));
                schedule.insert(record);
                summary.matched_ids.push(element.db_id);
                summary.matched += 1;
            }
            None => summary.failed += 1,
        }
    }

    Ok(summary)
}

/// Build a schedule record from one row via the synonym table. Invalid
/// dates become absent bounds; progress clamps to 0–100.
fn record_from_row(table: &CsvTable, row: &[String], element: &Element) -> ScheduleRecord {
    // Row-supplied name wins; the element's own name is the fallback.
    let name = table
        .value_any(row, NAME_COLUMNS)
        .unwrap_or(&element.name)
        .to_string();
    let mut record = ScheduleRecord::new(element.db_id, name);
    record.external_id = element.external_id.clone();
    record.scheduled_start = parse_date(table.value_any(row, START_COLUMNS));
    record.scheduled_end = parse_date(table.value_any(row, END_COLUMNS));
    record.actual_start = parse_date(table.value_any(row, ACTUAL_START_COLUMNS));
    record.actual_end = parse_date(table.value_any(row, ACTUAL_END_COLUMNS));
    record.status = table
        .value_any(row, STATUS_COLUMNS)
        .map(Status::from_keywords)
        .unwrap_or_default();
    record.progress = parse_progress(table.value_any(row, PROGRESS_COLUMNS));
    record.phase = table.value_any(row, PHASE_COLUMNS).map(str::to_string);
    record.discipline = table.value_any(row, DISCIPLINE_COLUMNS).map(str::to_string);
    record.contractor = table.value_any(row, CONTRACTOR_COLUMNS).map(str::to_string);
    record.notes = table.value_any(row, NOTES_COLUMNS).map(str::to_string);
    record
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok())
}

/// Lenient percent parse: leading integer digits, clamped to 100.
fn parse_progress(value: Option<&str>) -> u8 {
    let Some(value) = value else { return 0 };
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<u32>().map(|p| p.min(100) as u8).unwrap_or(0)
}
