// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Benchmarks for the timeline visibility pass and criteria search over a
//! large element table.

use acc_4d_core::{
    search_elements, timeline_pass, Combine, Criterion, Element, ElementTable, Operator, Property,
    Query, ScheduleRecord, ScheduleSet, StatusFilter, Target,
};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion as Bench};

const ELEMENT_COUNT: u32 = 50_000;

fn build_model() -> (ElementTable, ScheduleSet) {
    let mut elements = ElementTable::new();
    let mut schedule = ScheduleSet::new();
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    for id in 0..ELEMENT_COUNT {
        let mut element = Element::new(id, format!("Element-{id}"));
        element
            .properties
            .push(Property::new("Category", if id % 3 == 0 { "Walls" } else { "Floors" }));
        element
            .properties
            .push(Property::new("Volume", format!("{}.5", id % 40)));
        elements.push(element);

        // Every other element carries schedule data, staggered by a day.
        if id % 2 == 0 {
            let mut record = ScheduleRecord::new(id, format!("Element-{id}"));
            let offset = (id % 365) as u64;
            record.scheduled_start = base.checked_add_days(chrono::Days::new(offset));
            record.scheduled_end = base.checked_add_days(chrono::Days::new(offset + 14));
            schedule.insert(record);
        }
    }

    (elements, schedule)
}

fn bench_timeline_pass(c: &mut Bench) {
    let (elements, schedule) = build_model();
    let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    c.bench_function("timeline_pass_50k", |b| {
        b.iter(|| {
            let pass = timeline_pass(
                black_box(&elements),
                black_box(&schedule),
                date,
                StatusFilter::All,
            );
            black_box(pass.show.len())
        })
    });
}

fn bench_search(c: &mut Bench) {
    let (elements, _) = build_model();
    let query = Query {
        criteria: vec![
            Criterion {
                target: Target::Category,
                operator: Operator::Equals,
                value: "Walls".to_string(),
                value2: None,
                case_sensitive: false,
            },
            Criterion {
                target: Target::Property("Volume".to_string()),
                operator: Operator::GreaterThan,
                value: "20".to_string(),
                value2: None,
                case_sensitive: false,
            },
        ],
        combine: Combine::And,
    };

    c.bench_function("search_50k_two_criteria", |b| {
        b.iter(|| {
            let matches = search_elements(black_box(&elements), black_box(&query)).unwrap();
            black_box(matches.len())
        })
    });
}

criterion_group!(benches, bench_timeline_pass, bench_search);
criterion_main!(benches);
