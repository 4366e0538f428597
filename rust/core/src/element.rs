// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory snapshot of the model element tree.
//!
//! The viewer host walks its scene graph once and hands the leaves over as
//! an [`ElementTable`]. Table order is the traversal order of the source
//! graph; the import matcher's first-match policy depends on it, so it is
//! never re-sorted.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Opaque numeric element id assigned by the viewer's property database.
pub type DbId = u32;

/// One named property of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Display category the property belongs to (e.g. "Dimensions").
    #[serde(default)]
    pub category: String,
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category: String::new(),
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A leaf node of the model scene graph with its flattened property set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "dbId")]
    pub db_id: DbId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "externalId", default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl Element {
    pub fn new(db_id: DbId, name: impl Into<String>) -> Self {
        Self {
            db_id,
            name: name.into(),
            external_id: None,
            properties: Vec::new(),
        }
    }

    /// Look up a property value by name. First occurrence wins.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Look up the first present property among several candidate names.
    pub fn property_any(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|n| self.property(n))
    }
}

/// Ordered element collection with id lookup.
#[derive(Debug, Clone, Default)]
pub struct ElementTable {
    elements: Vec<Element>,
    by_id: FxHashMap<DbId, usize>,
}

impl ElementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element, keeping traversal order. Re-pushing an id
    /// replaces the earlier snapshot in place.
    pub fn push(&mut self, element: Element) {
        match self.by_id.get(&element.db_id) {
            Some(&idx) => self.elements[idx] = element,
            None => {
                self.by_id.insert(element.db_id, self.elements.len());
                self.elements.push(element);
            }
        }
    }

    pub fn get(&self, db_id: DbId) -> Option<&Element> {
        self.by_id.get(&db_id).map(|&idx| &self.elements[idx])
    }

    /// Iterate in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl FromIterator<Element> for ElementTable {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        let mut table = Self::new();
        for element in iter {
            table.push(element);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_order_and_lookup() {
        let mut table = ElementTable::new();
        table.push(Element::new(30, "c"));
        table.push(Element::new(10, "a"));
        table.push(Element::new(20, "b"));

        let order: Vec<DbId> = table.iter().map(|e| e.db_id).collect();
        assert_eq!(order, vec![30, 10, 20]);
        assert_eq!(table.get(10).unwrap().name, "a");
        assert!(table.get(99).is_none());
    }

    #[test]
    fn repush_replaces_in_place() {
        let mut table = ElementTable::new();
        table.push(Element::new(1, "old"));
        table.push(Element::new(2, "other"));
        table.push(Element::new(1, "new"));

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1).unwrap().name, "new");
        let order: Vec<DbId> = table.iter().map(|e| e.db_id).collect();
        assert_eq!(order, vec![1, 2]);
    }

    #[test]
    fn property_lookup_falls_back() {
        let mut element = Element::new(1, "wall");
        element.properties.push(Property::new("Type Name", "Basic Wall"));

        assert_eq!(element.property("Type Name"), Some("Basic Wall"));
        assert_eq!(element.property("Family"), None);
        assert_eq!(
            element.property_any(&["Family", "Type Name"]),
            Some("Basic Wall")
        );
    }
}
