// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Schedule records and the per-element schedule map.

use crate::element::DbId;
use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Construction status of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Delayed,
}

impl Status {
    /// Classify a free-text spreadsheet value. Keyword-based so that
    /// "Done", "Finished 2024", "80% complete" all land on a bucket.
    pub fn from_keywords(text: &str) -> Self {
        let s = text.to_lowercase();
        if s.contains("complete") || s.contains("done") || s.contains("finish") {
            Status::Completed
        } else if s.contains("progress") || s.contains("active") || s.contains("ongoing") {
            Status::InProgress
        } else if s.contains("delay") || s.contains("late") || s.contains("behind") {
            Status::Delayed
        } else {
            Status::NotStarted
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotStarted => "not-started",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
            Status::Delayed => "delayed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "not-started" => Ok(Status::NotStarted),
            "in-progress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            "delayed" => Ok(Status::Delayed),
            _ => Err(()),
        }
    }
}

/// RGBA color with components in 0–1, the form the viewer's theming API
/// takes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Fixed status-to-color table used for element theming.
pub fn status_color(status: Status) -> Rgba {
    match status {
        Status::Completed => Rgba { r: 0.13, g: 0.80, b: 0.33, a: 1.0 },
        Status::InProgress => Rgba { r: 0.00, g: 0.69, b: 0.94, a: 1.0 },
        Status::Delayed => Rgba { r: 1.00, g: 0.27, b: 0.23, a: 1.0 },
        Status::NotStarted => Rgba { r: 0.60, g: 0.60, b: 0.60, a: 1.0 },
    }
}

/// Construction schedule data for one model element.
///
/// Dates are calendar days; `actual_*` bounds take precedence over the
/// `scheduled_*` bounds when the timeline evaluates the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    /// Defaults to zero on deserialize; callers that receive the id out of
    /// band (e.g. from a URL path) overwrite it.
    #[serde(default)]
    pub element_id: DbId,
    #[serde(default)]
    pub element_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, rename = "scheduledStartDate")]
    pub scheduled_start: Option<NaiveDate>,
    #[serde(default, rename = "scheduledEndDate")]
    pub scheduled_end: Option<NaiveDate>,
    #[serde(default, rename = "actualStartDate")]
    pub actual_start: Option<NaiveDate>,
    #[serde(default, rename = "actualEndDate")]
    pub actual_end: Option<NaiveDate>,
    #[serde(default)]
    pub status: Status,
    /// Percent complete, 0–100.
    #[serde(default)]
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discipline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Record id assigned by the external store, when synced.
    #[serde(default, rename = "databaseRecordId", skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

impl ScheduleRecord {
    pub fn new(element_id: DbId, element_name: impl Into<String>) -> Self {
        Self {
            element_id,
            element_name: element_name.into(),
            external_id: None,
            scheduled_start: None,
            scheduled_end: None,
            actual_start: None,
            actual_end: None,
            status: Status::NotStarted,
            progress: 0,
            phase: None,
            discipline: None,
            contractor: None,
            notes: None,
            record_id: None,
        }
    }

    /// Actual start when recorded, scheduled start otherwise.
    pub fn effective_start(&self) -> Option<NaiveDate> {
        self.actual_start.or(self.scheduled_start)
    }

    /// Actual end when recorded, scheduled end otherwise.
    pub fn effective_end(&self) -> Option<NaiveDate> {
        self.actual_end.or(self.scheduled_end)
    }
}

/// Per-element schedule map. At most one record per element id; inserting
/// again overwrites the earlier record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleSet {
    records: FxHashMap<DbId, ScheduleRecord>,
}

impl ScheduleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any prior record for the element.
    /// Returns the replaced record when one existed.
    pub fn insert(&mut self, record: ScheduleRecord) -> Option<ScheduleRecord> {
        self.records.insert(record.element_id, record)
    }

    pub fn get(&self, element_id: DbId) -> Option<&ScheduleRecord> {
        self.records.get(&element_id)
    }

    pub fn remove(&mut self, element_id: DbId) -> Option<ScheduleRecord> {
        self.records.remove(&element_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduleRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_keywords() {
        assert_eq!(Status::from_keywords("Completed"), Status::Completed);
        assert_eq!(Status::from_keywords("Work Done"), Status::Completed);
        assert_eq!(Status::from_keywords("IN PROGRESS"), Status::InProgress);
        assert_eq!(Status::from_keywords("running late"), Status::Delayed);
        assert_eq!(Status::from_keywords("queued"), Status::NotStarted);
        assert_eq!(Status::from_keywords(""), Status::NotStarted);
    }

    #[test]
    fn status_wire_form_round_trips() {
        for status in [
            Status::NotStarted,
            Status::InProgress,
            Status::Completed,
            Status::Delayed,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
            let back: Status = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn effective_bounds_prefer_actuals() {
        let mut record = ScheduleRecord::new(1, "wall");
        record.scheduled_start = NaiveDate::from_ymd_opt(2024, 1, 1);
        record.scheduled_end = NaiveDate::from_ymd_opt(2024, 1, 31);
        assert_eq!(record.effective_start(), record.scheduled_start);

        record.actual_start = NaiveDate::from_ymd_opt(2024, 1, 5);
        assert_eq!(record.effective_start(), record.actual_start);
        assert_eq!(record.effective_end(), record.scheduled_end);
    }

    #[test]
    fn insert_overwrites_per_element() {
        let mut set = ScheduleSet::new();
        let mut first = ScheduleRecord::new(7, "beam");
        first.progress = 10;
        assert!(set.insert(first).is_none());

        let mut second = ScheduleRecord::new(7, "beam");
        second.progress = 90;
        let replaced = set.insert(second).unwrap();
        assert_eq!(replaced.progress, 10);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(7).unwrap().progress, 90);
    }

    #[test]
    fn record_serializes_camel_case() {
        let mut record = ScheduleRecord::new(42, "slab");
        record.scheduled_start = NaiveDate::from_ymd_opt(2024, 3, 1);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["elementId"], 42);
        assert_eq!(json["scheduledStartDate"], "2024-03-01");
        assert_eq!(json["status"], "not-started");
        assert!(json.get("phase").is_none());
    }
}
