// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bill-of-Quantities aggregation.
//!
//! Groups elements by their "Category" property and sums the numeric
//! quantity properties. Non-numeric quantity values count as zero.

use crate::csv::write_table;
use crate::element::ElementTable;
use serde::Serialize;

const QUANTITY_HEADERS: &[&str] = &["Category", "Element Count", "Volume", "Area", "Length"];

/// Aggregated quantities for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub name: String,
    pub count: usize,
    pub volume: f64,
    pub area: f64,
    pub length: f64,
}

/// Group all elements by category, summing Volume/Area/Length. Categories
/// come back sorted by element count, descending; ties keep first-seen
/// order.
pub fn summarize_quantities(elements: &ElementTable) -> Vec<CategoryTotals> {
    let mut totals: Vec<CategoryTotals> = Vec::new();

    for element in elements.iter() {
        let category = element.property("Category").unwrap_or("Uncategorized");
        let idx = match totals.iter().position(|t| t.name == category) {
            Some(idx) => idx,
            None => {
                totals.push(CategoryTotals {
                    name: category.to_string(),
                    count: 0,
                    volume: 0.0,
                    area: 0.0,
                    length: 0.0,
                });
                totals.len() - 1
            }
        };

        let entry = &mut totals[idx];
        entry.count += 1;
        entry.volume += quantity(element.property("Volume"));
        entry.area += quantity(element.property("Area"));
        entry.length += quantity(element.property("Length"));
    }

    totals.sort_by(|a, b| b.count.cmp(&a.count));
    totals
}

/// Render the BOQ table as CSV with a trailing TOTAL row, quantities to
/// two decimals.
pub fn boq_to_csv(totals: &[CategoryTotals]) -> String {
    let mut rows: Vec<Vec<String>> = totals
        .iter()
        .map(|t| {
            vec![
                t.name.clone(),
                t.count.to_string(),
                format!("{:.2}", t.volume),
                format!("{:.2}", t.area),
                format!("{:.2}", t.length),
            ]
        })
        .collect();

    rows.push(vec![
        "TOTAL".to_string(),
        totals.iter().map(|t| t.count).sum::<usize>().to_string(),
        format!("{:.2}", totals.iter().map(|t| t.volume).sum::<f64>()),
        format!("{:.2}", totals.iter().map(|t| t.area).sum::<f64>()),
        format!("{:.2}", totals.iter().map(|t| t.length).sum::<f64>()),
    ]);

    write_table(QUANTITY_HEADERS, &rows)
}

/// Leading-number parse matching the search engine's tolerance for units.
fn quantity(value: Option<&str>) -> f64 {
    value
        .and_then(crate::search::parse_quantity)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, Property};

    fn element(id: u32, category: &str, volume: &str) -> Element {
        let mut e = Element::new(id, format!("e{id}"));
        e.properties.push(Property::new("Category", category));
        e.properties.push(Property::new("Volume", volume));
        e
    }

    #[test]
    fn groups_and_sums_by_category() {
        let mut elements = ElementTable::new();
        elements.push(element(1, "Walls", "10.0"));
        elements.push(element(2, "Walls", "5.5"));
        elements.push(element(3, "Doors", "not numeric"));
        let mut bare = Element::new(4, "no category");
        bare.properties.push(Property::new("Area", "3.25"));
        elements.push(bare);

        let totals = summarize_quantities(&elements);
        assert_eq!(totals[0].name, "Walls");
        assert_eq!(totals[0].count, 2);
        assert!((totals[0].volume - 15.5).abs() < 1e-9);
        assert_eq!(totals[1].count, 1);
        assert_eq!(totals[2].count, 1);

        let uncategorized = totals.iter().find(|t| t.name == "Uncategorized").unwrap();
        assert!((uncategorized.area - 3.25).abs() < 1e-9);
        let doors = totals.iter().find(|t| t.name == "Doors").unwrap();
        assert_eq!(doors.volume, 0.0);
    }

    #[test]
    fn csv_has_total_row_and_two_decimals() {
        let mut elements = ElementTable::new();
        elements.push(element(1, "Walls", "10"));
        elements.push(element(2, "Doors", "2.345"));

        let csv = boq_to_csv(&summarize_quantities(&elements));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Category,Element Count,Volume,Area,Length");
        assert_eq!(lines.last().unwrap(), &"TOTAL,2,12.35,0.00,0.00");
    }

    #[test]
    fn empty_table_still_writes_total() {
        let csv = boq_to_csv(&summarize_quantities(&ElementTable::new()));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "TOTAL,0,0.00,0.00,0.00");
    }
}
