// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Free-text search and exact-match facets over in-memory collections.

use std::fmt;
use std::str::FromStr;

use strum::IntoEnumIterator;

/// Sentinel disabling a facet.
pub const ALL: &str = "All";

/// Sentinel disabling a class facet.
pub const ALL_CLASSES: &str = "All Classes";

/// An exact-match filter dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Facet<T> {
    /// The facet is inactive.
    All,

    /// Only records with this value pass.
    Only(T),
}

impl<T: PartialEq> Facet<T> {
    /// Whether the facet is inactive.
    pub const fn is_all(&self) -> bool {
        matches!(self, Facet::All)
    }

    /// Whether a record with `value` passes.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Facet::All => true,
            Facet::Only(v) => v == value,
        }
    }

    /// Whether a record holding `values` passes, i.e. the selected value is
    /// one of them.
    pub fn admits_any(&self, values: &[T]) -> bool {
        match self {
            Facet::All => true,
            Facet::Only(v) => values.contains(v),
        }
    }
}

impl<T> Default for Facet<T> {
    fn default() -> Self {
        Facet::All
    }
}

impl<T> From<Option<T>> for Facet<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Facet::All, Facet::Only)
    }
}

impl<T: FromStr> FromStr for Facet<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | ALL | ALL_CLASSES => Ok(Facet::All),
            value => value.parse().map(Facet::Only),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Facet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facet::All => f.write_str(ALL),
            Facet::Only(v) => v.fmt(f),
        }
    }
}

/// A record with a fixed set of fields covered by free-text search.
pub trait Searchable {
    /// The searchable fields of the record type.
    type SearchField: Copy + IntoEnumIterator;

    /// The text of one field, `None` when the field is unset.
    fn search_text(&self, field: Self::SearchField) -> Option<&str>;

    /// Case-insensitive substring match OR'd across every search field.
    /// An empty query matches everything.
    fn matches_search(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        Self::SearchField::iter()
            .filter_map(|field| self.search_text(field))
            .any(|text| text.to_lowercase().contains(&query))
    }
}

/// A set of predicates over records, all of which must hold.
pub trait Filter<T> {
    /// Whether the record passes every active predicate.
    fn matches(&self, record: &T) -> bool;
}

/// Selects the records passing `filter`, keeping their order. The input is
/// not modified.
pub fn apply_filters<'a, T, F: Filter<T>>(records: &'a [T], filter: &F) -> Vec<&'a T> {
    records.iter().filter(|r| filter.matches(r)).collect()
}
