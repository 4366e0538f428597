// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end schedule flow: CSV import, timeline evaluation, export and
//! re-import.

use acc_4d_core::{
    export::schedule_to_csv, import_schedule, parse_table, timeline_pass, Element, ElementTable,
    ImportMapping, MappingField, Property, ScheduleSet, Status, StatusFilter,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn building() -> ElementTable {
    let mut elements = ElementTable::new();
    for (id, name, wbs) in [
        (101, "Footing-01", "F-1"),
        (102, "Column-01", "C-1"),
        (103, "Column-02", "C-2"),
        (104, "Beam-01", "B-1"),
    ] {
        let mut e = Element::new(id, name);
        e.external_id = Some(format!("guid-{id}"));
        e.properties.push(Property::new("WBS", wbs));
        e.properties.push(Property::new("Category", "Structure"));
        elements.push(e);
    }
    elements
}

const SCHEDULE_CSV: &str = "\
WBS,Element Name,Start Date,End Date,Actual Start,Status,Progress,Contractor
F-1,Footing-01,2024-01-01,2024-01-10,2024-01-02,Completed,100,GroundCo
C-1,Column-01,2024-01-11,2024-01-25,,In Progress,60,FrameCo
C-2,Column-02,2024-01-11,2024-01-25,,Behind schedule,20,FrameCo
B-1,Beam-01,2024-02-01,2024-02-20,,,0,FrameCo
";

fn imported() -> (ElementTable, ScheduleSet) {
    let elements = building();
    let table = parse_table(SCHEDULE_CSV).unwrap();
    let mapping = ImportMapping {
        field: MappingField::Property("WBS".to_string()),
        column: "WBS".to_string(),
    };
    let mut schedule = ScheduleSet::new();
    let summary = import_schedule(&table, &mapping, &elements, &mut schedule).unwrap();
    assert_eq!(summary.matched, 4);
    assert_eq!(summary.failed, 0);
    (elements, schedule)
}

#[test]
fn import_reads_dates_statuses_and_actuals() {
    let (_, schedule) = imported();

    let footing = schedule.get(101).unwrap();
    assert_eq!(footing.status, Status::Completed);
    assert_eq!(footing.actual_start, Some(date(2024, 1, 2)));
    assert_eq!(footing.progress, 100);

    let late = schedule.get(103).unwrap();
    assert_eq!(late.status, Status::Delayed);
    assert_eq!(late.contractor.as_deref(), Some("FrameCo"));
}

#[test]
fn timeline_walks_the_construction_sequence() {
    let (elements, schedule) = imported();

    // Before anything starts: everything hidden.
    let pass = timeline_pass(&elements, &schedule, date(2023, 12, 1), StatusFilter::All);
    assert!(pass.show.is_empty());
    assert!(!pass.isolate);

    // Mid-January: footing done, columns underway.
    let pass = timeline_pass(&elements, &schedule, date(2024, 1, 15), StatusFilter::All);
    assert_eq!(pass.show, vec![101, 102, 103]);
    assert_eq!(pass.hide, vec![104]);

    // March: whole structure visible, delayed column still flagged.
    let pass = timeline_pass(&elements, &schedule, date(2024, 3, 1), StatusFilter::All);
    assert_eq!(pass.show, vec![101, 102, 103, 104]);
    let delayed = pass.colors.iter().find(|(id, _)| *id == 103).unwrap();
    assert_eq!(delayed.1, acc_4d_core::status_color(Status::Delayed));
}

#[test]
fn delayed_filter_isolates_the_problem_column() {
    let (elements, schedule) = imported();
    let pass = timeline_pass(
        &elements,
        &schedule,
        date(2024, 3, 1),
        StatusFilter::Only(Status::Delayed),
    );
    assert_eq!(pass.show, vec![103]);
    assert_eq!(pass.hide, vec![101, 102, 104]);
    assert!(pass.isolate);
}

#[test]
fn export_then_reimport_reproduces_associations() {
    let (elements, schedule) = imported();
    let csv = schedule_to_csv(&schedule);

    // Re-import over the exported "Element ID" key column.
    let table = parse_table(&csv).unwrap();
    let mapping = ImportMapping {
        field: MappingField::DbId,
        column: "Element ID".to_string(),
    };
    let mut reimported = ScheduleSet::new();
    let summary = import_schedule(&table, &mapping, &elements, &mut reimported).unwrap();
    assert_eq!(summary.matched, 4);
    assert_eq!(summary.failed, 0);

    for id in [101u32, 102, 103, 104] {
        let before = schedule.get(id).unwrap();
        let after = reimported.get(id).unwrap();
        assert_eq!(after.element_name, before.element_name);
        assert_eq!(after.scheduled_start, before.scheduled_start);
        assert_eq!(after.scheduled_end, before.scheduled_end);
        assert_eq!(after.actual_start, before.actual_start);
        assert_eq!(after.status, before.status);
        assert_eq!(after.progress, before.progress);
        assert_eq!(after.contractor, before.contractor);
    }
}

#[test]
fn reimport_over_name_key_also_round_trips() {
    let (elements, schedule) = imported();
    let csv = schedule_to_csv(&schedule);

    let table = parse_table(&csv).unwrap();
    let mapping = ImportMapping {
        field: MappingField::Name,
        column: "Element Name".to_string(),
    };
    let mut reimported = ScheduleSet::new();
    let summary = import_schedule(&table, &mapping, &elements, &mut reimported).unwrap();
    assert_eq!(summary.matched, 4);
    assert_eq!(
        summary.matched_ids,
        vec![101, 102, 103, 104]
    );
}
