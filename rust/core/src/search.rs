// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Criteria-based element search.
//!
//! A query is a conjunction or disjunction of criteria evaluated against
//! every element's property set. No index: each search is one linear scan.

use crate::element::{Element, ElementTable};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Attribute a criterion reads from an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Target {
    /// Element display name.
    Name,
    /// The "Category" property.
    Category,
    /// "Level", falling back to "Reference Level".
    Level,
    /// "Family", falling back to "Type Name".
    Family,
    /// Any property, by name.
    Property(String),
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    Between,
}

/// One comparison: target attribute, operator, and value(s).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Criterion {
    pub target: Target,
    pub operator: Operator,
    pub value: String,
    /// Upper bound for [`Operator::Between`].
    #[serde(default)]
    pub value2: Option<String>,
    #[serde(default)]
    pub case_sensitive: bool,
}

impl Criterion {
    fn target_value<'a>(&self, element: &'a Element) -> &'a str {
        match &self.target {
            Target::Name => &element.name,
            Target::Category => element.property("Category").unwrap_or(""),
            Target::Level => element
                .property_any(&["Level", "Reference Level"])
                .unwrap_or(""),
            Target::Family => element
                .property_any(&["Family", "Type Name"])
                .unwrap_or(""),
            Target::Property(name) => element.property(name).unwrap_or(""),
        }
    }

    /// Evaluate against one element. Numeric operators parse both sides as
    /// floats; a failed parse is a non-match, never an error.
    pub fn matches(&self, element: &Element) -> bool {
        let target = self.target_value(element);

        match self.operator {
            Operator::Equals | Operator::Contains | Operator::StartsWith | Operator::EndsWith => {
                let (target, value) = if self.case_sensitive {
                    (target.to_string(), self.value.clone())
                } else {
                    (target.to_lowercase(), self.value.to_lowercase())
                };
                match self.operator {
                    Operator::Equals => target == value,
                    Operator::Contains => target.contains(&value),
                    Operator::StartsWith => target.starts_with(&value),
                    Operator::EndsWith => target.ends_with(&value),
                    _ => unreachable!(),
                }
            }
            Operator::GreaterThan => match (parse_quantity(target), parse_quantity(&self.value)) {
                (Some(t), Some(v)) => t > v,
                _ => false,
            },
            Operator::LessThan => match (parse_quantity(target), parse_quantity(&self.value)) {
                (Some(t), Some(v)) => t < v,
                _ => false,
            },
            Operator::Between => {
                let Some(value2) = self.value2.as_deref() else {
                    return false;
                };
                match (
                    parse_quantity(target),
                    parse_quantity(&self.value),
                    parse_quantity(value2),
                ) {
                    (Some(t), Some(lo), Some(hi)) => t >= lo && t <= hi,
                    _ => false,
                }
            }
        }
    }
}

/// How criteria combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Combine {
    #[default]
    And,
    Or,
}

/// A full search: criteria plus the combination policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    pub criteria: Vec<Criterion>,
    #[serde(default)]
    pub combine: Combine,
}

impl Query {
    pub fn matches(&self, element: &Element) -> bool {
        match self.combine {
            Combine::And => self.criteria.iter().all(|c| c.matches(element)),
            Combine::Or => self.criteria.iter().any(|c| c.matches(element)),
        }
    }
}

/// Linear scan over the table; returns matches in traversal order.
/// An empty criteria list is rejected rather than matching everything.
pub fn search_elements<'a>(elements: &'a ElementTable, query: &Query) -> Result<Vec<&'a Element>> {
    if query.criteria.is_empty() {
        return Err(Error::EmptyQuery);
    }
    Ok(elements.iter().filter(|e| query.matches(e)).collect())
}

/// Leading-number parse, tolerant of trailing units ("2.40 m").
pub(crate) fn parse_quantity(text: &str) -> Option<f64> {
    let text = text.trim();
    let end = text
        .char_indices()
        .take_while(|(i, c)| {
            c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '-' || *c == '+'))
        })
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    text[..end].parse().ok()
}
