// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # ACC-4D Core
//!
//! Schedule-over-time ("4D") engine for BIM model elements. The crate
//! operates on an in-memory snapshot of a model's element tree and decides,
//! for a reference date, which elements are visible and what color they
//! carry; the consumer (a viewer host) applies the result to the actual
//! scene graph.
//!
//! ## Overview
//!
//! - **Element snapshot**: flat table of elements with their property sets,
//!   preserving scene-graph traversal order ([`ElementTable`])
//! - **Schedule records**: per-element construction schedule data keyed by
//!   element id, at most one record per element ([`ScheduleSet`])
//! - **Spreadsheet import**: delimited-text parsing plus attribute matching
//!   to bind rows to elements ([`import`])
//! - **Timeline pass**: date-driven show/hide/recolor decisions
//!   ([`visibility`])
//! - **Criteria search**: linear-scan filtering over element properties
//!   ([`search`])
//! - **Exports**: schedule CSV and Bill-of-Quantities CSV ([`export`],
//!   [`boq`])
//!
//! ## Quick Start
//!
//! ```rust
//! use acc_4d_core::{
//!     timeline_pass, Element, ElementTable, ScheduleRecord, ScheduleSet,
//!     StatusFilter,
//! };
//! use chrono::NaiveDate;
//!
//! let mut elements = ElementTable::new();
//! elements.push(Element::new(101, "Wall-01"));
//!
//! let mut schedule = ScheduleSet::new();
//! let mut record = ScheduleRecord::new(101, "Wall-01");
//! record.scheduled_start = NaiveDate::from_ymd_opt(2024, 1, 1);
//! record.scheduled_end = NaiveDate::from_ymd_opt(2024, 1, 31);
//! schedule.insert(record);
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! let pass = timeline_pass(&elements, &schedule, date, StatusFilter::All);
//! assert_eq!(pass.show, vec![101]);
//! ```

pub mod boq;
pub mod csv;
pub mod element;
pub mod error;
pub mod export;
pub mod import;
pub mod schedule;
pub mod search;
pub mod visibility;

pub use boq::{boq_to_csv, summarize_quantities, CategoryTotals};
pub use csv::{parse_table, write_table, CsvTable};
pub use element::{DbId, Element, ElementTable, Property};
pub use error::{Error, Result};
pub use export::schedule_to_csv;
pub use import::{
    detect_key_column, import_schedule, ImportMapping, ImportSummary, MappingField,
};
pub use schedule::{status_color, Rgba, ScheduleRecord, ScheduleSet, Status};
pub use search::{search_elements, Combine, Criterion, Operator, Query, Target};
pub use visibility::{evaluate, timeline_pass, Disposition, StatusFilter, TimelinePass};
