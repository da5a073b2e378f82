use std::collections::BTreeSet;

use crate::element::{ElementCategory, ElementRecord};

/// True when `query` is empty or is a substring of the record's English name,
/// Korean name, symbol or atomic number.
///
/// English name and symbol are compared lower-cased; the Korean name is
/// compared as-is.
pub fn matches(record: &ElementRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let query = query.to_lowercase();

    record.name.to_lowercase().contains(&query)
        || record.name_ko.contains(&query)
        || record.symbol.to_lowercase().contains(&query)
        || record.number.to_string().contains(&query)
}

/// What the grid needs to draw one element tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub number: u32,
    pub symbol: String,
    pub name_ko: String,
    pub category: ElementCategory,
    pub column: u32,
    pub row: u32,
    /// Rendered faded because it does not match the active query.
    pub dimmed: bool,
    /// Shown with an "edited" badge.
    pub edited: bool,
}

/// Detail-view selection and the search query driving tile highlighting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionFilter {
    selected: Option<ElementRecord>,
    query: String,
}

impl SelectionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&ElementRecord> {
        self.selected.as_ref()
    }

    /// Replaces any current selection.
    pub fn select(&mut self, record: ElementRecord) {
        log::debug!("selected element {}", record.number);
        self.selected = Some(record);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn matches(&self, record: &ElementRecord) -> bool {
        matches(record, &self.query)
    }

    /// Points the selection at the current version of the same element after
    /// the effective list changed.
    pub fn refresh(&mut self, effective: &[ElementRecord]) {
        if let Some(current) = &self.selected {
            let number = current.number;
            self.selected = effective
                .iter()
                .find(|record| record.number == number)
                .cloned();
        }
    }

    /// One tile per record, in input order. The query only toggles `dimmed`;
    /// positions come straight from the record.
    pub fn tiles(&self, effective: &[ElementRecord], edited: &BTreeSet<u32>) -> Vec<Tile> {
        let searching = !self.query.is_empty();

        effective
            .iter()
            .map(|record| Tile {
                number: record.number,
                symbol: record.symbol.clone(),
                name_ko: record.name_ko.clone(),
                category: record.category,
                column: record.xpos,
                row: record.ypos,
                dimmed: searching && !self.matches(record),
                edited: edited.contains(&record.number),
            })
            .collect()
    }
}
