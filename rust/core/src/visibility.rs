// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Date-driven visibility engine.
//!
//! For a reference date, every element is either shown (with a status
//! color) or hidden. Elements without schedule data are hidden while a
//! timeline is active; scheduled elements compare the date against their
//! effective bounds, with the status promoted as construction progresses.

use crate::element::{DbId, ElementTable};
use crate::schedule::{status_color, Rgba, ScheduleRecord, ScheduleSet, Status};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Status filter applied on top of the date rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl FromStr for StatusFilter {
    type Err = ();

    /// Wire form: `all` or a status name.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == "all" {
            Ok(StatusFilter::All)
        } else {
            Status::from_str(s).map(StatusFilter::Only)
        }
    }
}

/// Outcome for a single scheduled element at a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disposition {
    pub visible: bool,
    /// Status after date-based promotion.
    pub status: Status,
}

/// Evaluate the date rule for one record.
///
/// Effective bounds prefer actual dates over scheduled ones. With both
/// bounds, the element is visible inside `[start, end]` (promoted to
/// in-progress), visible after `end` (promoted to completed unless
/// delayed), hidden before `start`. With only a start bound it appears
/// once the date reaches it. With no start bound it is always visible.
pub fn evaluate(record: &ScheduleRecord, date: NaiveDate) -> Disposition {
    let mut status = record.status;
    let visible = match (record.effective_start(), record.effective_end()) {
        (Some(start), Some(end)) => {
            if date >= start && date <= end {
                if status == Status::NotStarted {
                    status = Status::InProgress;
                }
                true
            } else if date > end {
                if status != Status::Delayed {
                    status = Status::Completed;
                }
                true
            } else {
                false
            }
        }
        (Some(start), None) => {
            if date >= start {
                if status == Status::NotStarted {
                    status = Status::InProgress;
                }
                true
            } else {
                false
            }
        }
        // No start bound (end-only records included): always visible.
        _ => true,
    };

    Disposition { visible, status }
}

/// One full show/hide/recolor decision over the element table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TimelinePass {
    /// Elements to show, in traversal order.
    pub show: Vec<DbId>,
    /// Elements to hide, in traversal order.
    pub hide: Vec<DbId>,
    /// Theming colors for the visible set.
    pub colors: Vec<(DbId, Rgba)>,
    /// Whether the consumer should isolate to the visible set afterwards.
    pub isolate: bool,
}

/// Run the visibility engine over every element in one pass.
///
/// Elements without a schedule record are hidden. The status filter is
/// applied after promotion and overrides the date rule. The consumer
/// applies `hide`, `show`, `colors`, then isolates when `isolate` is set,
/// and forces a redraw.
pub fn timeline_pass(
    elements: &ElementTable,
    schedule: &ScheduleSet,
    date: NaiveDate,
    filter: StatusFilter,
) -> TimelinePass {
    let mut pass = TimelinePass::default();

    for element in elements.iter() {
        let Some(record) = schedule.get(element.db_id) else {
            pass.hide.push(element.db_id);
            continue;
        };

        let mut disposition = evaluate(record, date);
        if let StatusFilter::Only(wanted) = filter {
            if disposition.status != wanted {
                disposition.visible = false;
            }
        }

        if disposition.visible {
            pass.show.push(element.db_id);
            pass.colors
                .push((element.db_id, status_color(disposition.status)));
        } else {
            pass.hide.push(element.db_id);
        }
    }

    pass.isolate = !pass.show.is_empty();
    pass
}
