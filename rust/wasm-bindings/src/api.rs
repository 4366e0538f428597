// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JavaScript API for the schedule engine.

use acc_4d_core::{
    boq_to_csv, import_schedule, parse_table, schedule_to_csv, search_elements,
    summarize_quantities, timeline_pass, DbId, Element, ElementTable, ImportMapping, MappingField,
    Query, ScheduleRecord, ScheduleSet, StatusFilter,
};
use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

/// The engine instance held by the viewer page: one element snapshot plus
/// the active schedule.
#[wasm_bindgen]
#[derive(Default)]
pub struct Schedule4D {
    elements: ElementTable,
    schedule: ScheduleSet,
}

#[wasm_bindgen]
impl Schedule4D {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the element snapshot. `elements` is an array of
    /// `{dbId, name, externalId?, properties?: [{category?, name, value}]}`.
    #[wasm_bindgen(js_name = loadElements)]
    pub fn load_elements(&mut self, elements: JsValue) -> Result<(), JsError> {
        let elements: Vec<Element> = serde_wasm_bindgen::from_value(elements)?;
        self.elements = elements.into_iter().collect();
        Ok(())
    }

    /// Number of elements in the snapshot.
    #[wasm_bindgen(js_name = elementCount)]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Number of elements carrying schedule data.
    #[wasm_bindgen(js_name = recordCount)]
    pub fn record_count(&self) -> usize {
        self.schedule.len()
    }

    /// Assign (or overwrite) the schedule record for one element.
    pub fn assign(&mut self, record: JsValue) -> Result<(), JsError> {
        let record: ScheduleRecord = serde_wasm_bindgen::from_value(record)?;
        self.schedule.insert(record);
        Ok(())
    }

    /// Schedule record for one element, or `undefined`.
    pub fn record(&self, db_id: DbId) -> Result<JsValue, JsError> {
        match self.schedule.get(db_id) {
            Some(record) => Ok(serde_wasm_bindgen::to_value(record)?),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Remove the schedule record for one element.
    pub fn remove(&mut self, db_id: DbId) -> bool {
        self.schedule.remove(db_id).is_some()
    }

    /// Bulk-import a spreadsheet. `field` is `externalId`, `name`, `dbId`
    /// or any property name; `column` names the spreadsheet key column.
    /// Returns `{total, matched, failed, matched_ids}`.
    #[wasm_bindgen(js_name = importCsv)]
    pub fn import_csv(
        &mut self,
        text: &str,
        field: &str,
        column: &str,
    ) -> Result<JsValue, JsError> {
        let table = parse_table(text).map_err(|e| JsError::new(&e.to_string()))?;
        let mapping = ImportMapping {
            field: mapping_field(field),
            column: column.to_string(),
        };
        let summary = import_schedule(&table, &mapping, &self.elements, &mut self.schedule)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(serde_wasm_bindgen::to_value(&summary)?)
    }

    /// Run the visibility engine for a reference date (`YYYY-MM-DD`) and a
    /// status filter (`all` or a status name). Returns
    /// `{show, hide, colors, isolate}` for the viewer to apply.
    pub fn timeline(&self, date: &str, filter: &str) -> Result<JsValue, JsError> {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| JsError::new("date must be YYYY-MM-DD"))?;
        let filter: StatusFilter = filter
            .parse()
            .map_err(|_| JsError::new("unknown status filter"))?;
        let pass = timeline_pass(&self.elements, &self.schedule, date, filter);
        Ok(serde_wasm_bindgen::to_value(&pass)?)
    }

    /// Evaluate a criteria query (see the core `Query` shape) and return
    /// the matching element ids in traversal order.
    pub fn search(&self, query: JsValue) -> Result<Vec<DbId>, JsError> {
        let query: Query = serde_wasm_bindgen::from_value(query)?;
        let matches =
            search_elements(&self.elements, &query).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(matches.iter().map(|e| e.db_id).collect())
    }

    /// Export the current schedule as CSV.
    #[wasm_bindgen(js_name = exportCsv)]
    pub fn export_csv(&self) -> String {
        schedule_to_csv(&self.schedule)
    }

    /// Export the Bill of Quantities as CSV.
    #[wasm_bindgen(js_name = boqCsv)]
    pub fn boq_csv(&self) -> String {
        boq_to_csv(&summarize_quantities(&self.elements))
    }
}

fn mapping_field(field: &str) -> MappingField {
    match field {
        "externalId" => MappingField::ExternalId,
        "name" => MappingField::Name,
        "dbId" => MappingField::DbId,
        other => MappingField::Property(other.to_string()),
    }
}
