#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! In-memory district crime tables.
//!
//! Loads the incident and coordinate CSVs once, normalizes region names
//! so the two tables join, and answers the handful of queries the
//! dashboard needs: region listings, equality filters, group-by-year
//! trends, per-category maxima, and coordinate lookups.
//!
//! Both tables are immutable after loading.

pub mod load;
pub mod normalize;
pub mod progress;

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crime_index_crime_models::{CategoryCounts, IncidentRecord, LocationRecord};
use serde::Serialize;

use crate::normalize::title_case;

/// Errors that can occur while loading or querying the datasets.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// A dataset file could not be opened.
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// CSV decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Missing required column '{column}'")]
    MissingColumn {
        /// Expected column name.
        column: String,
    },

    /// A cell could not be parsed.
    #[error("Invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        /// 1-based line in the source file where the row starts.
        row: u64,
        /// Column name.
        column: String,
        /// Raw cell contents.
        value: String,
    },
}

/// Equality filter over the incident table.
///
/// Filter values are normalized the same way the table is, so
/// `"TAMIL NADU"` matches rows stored as `"Tamil Nadu"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionFilter {
    state: Option<String>,
    district: Option<String>,
    year: Option<i32>,
}

impl RegionFilter {
    /// Matches every row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one state.
    #[must_use]
    pub fn state(mut self, state: &str) -> Self {
        self.state = Some(title_case(state));
        self
    }

    /// Restricts to one district.
    #[must_use]
    pub fn district(mut self, district: &str) -> Self {
        self.district = Some(title_case(district));
        self
    }

    /// Restricts to one year.
    #[must_use]
    pub const fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Restricts to one year if `year` is `Some`.
    #[must_use]
    pub const fn maybe_year(mut self, year: Option<i32>) -> Self {
        if year.is_some() {
            self.year = year;
        }
        self
    }

    /// Returns `true` if `record` passes every configured constraint.
    #[must_use]
    pub fn matches(&self, record: &IncidentRecord) -> bool {
        self.state.as_deref().is_none_or(|s| record.state == s)
            && self.district.as_deref().is_none_or(|d| record.district == d)
            && self.year.is_none_or(|y| record.year == y)
    }
}

/// Aggregated counts for one year of a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyTotals {
    /// Reporting year.
    pub year: i32,
    /// Per-category counts summed over the region's rows for the year.
    pub counts: CategoryCounts,
    /// Sum of all categories.
    pub total: u64,
}

/// The incident table.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<IncidentRecord>,
    maxima: CategoryCounts,
}

impl Dataset {
    /// Wraps already-loaded records, computing per-category maxima.
    #[must_use]
    pub fn new(records: Vec<IncidentRecord>) -> Self {
        let mut maxima = CategoryCounts::default();
        for record in &records {
            maxima.max_assign(&record.counts);
        }
        Self { records, maxima }
    }

    /// Number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the table has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Largest single-row count observed for each category.
    #[must_use]
    pub const fn category_maxima(&self) -> &CategoryCounts {
        &self.maxima
    }

    /// Sorted unique state names.
    #[must_use]
    pub fn states(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.state.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Canonical spelling of `state` if it exists in the table.
    #[must_use]
    pub fn find_state(&self, state: &str) -> Option<&str> {
        let wanted = title_case(state);
        self.records
            .iter()
            .find(|r| r.state == wanted)
            .map(|r| r.state.as_str())
    }

    /// Sorted unique district names within `state`.
    #[must_use]
    pub fn districts(&self, state: &str) -> Vec<&str> {
        let filter = RegionFilter::new().state(state);
        self.records
            .iter()
            .filter(|r| filter.matches(r))
            .map(|r| r.district.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Canonical spelling of `district` within `state` if it exists.
    #[must_use]
    pub fn find_district(&self, state: &str, district: &str) -> Option<&str> {
        let filter = RegionFilter::new().state(state).district(district);
        self.filter(&filter).next().map(|r| r.district.as_str())
    }

    /// Sorted unique years across the whole table.
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Most recent year, or `None` for an empty table.
    #[must_use]
    pub fn latest_year(&self) -> Option<i32> {
        self.records.iter().map(|r| r.year).max()
    }

    /// Most recent year with rows for `state`.
    #[must_use]
    pub fn latest_year_for(&self, state: &str) -> Option<i32> {
        let filter = RegionFilter::new().state(state);
        self.filter(&filter).map(|r| r.year).max()
    }

    /// Iterates rows matching `filter`.
    pub fn filter<'a>(
        &'a self,
        filter: &RegionFilter,
    ) -> impl Iterator<Item = &'a IncidentRecord> {
        self.records.iter().filter(move |r| filter.matches(r))
    }

    /// Group-by-year totals for a state, or a single district when
    /// `district` is given. Sorted by year ascending.
    #[must_use]
    pub fn yearly_totals(&self, state: &str, district: Option<&str>) -> Vec<YearlyTotals> {
        let mut filter = RegionFilter::new().state(state);
        if let Some(district) = district {
            filter = filter.district(district);
        }

        let mut by_year: BTreeMap<i32, CategoryCounts> = BTreeMap::new();
        for record in self.filter(&filter) {
            by_year.entry(record.year).or_default().accumulate(&record.counts);
        }

        by_year
            .into_iter()
            .map(|(year, counts)| YearlyTotals {
                year,
                total: counts.total(),
                counts,
            })
            .collect()
    }
}

/// The coordinate table.
#[derive(Debug, Clone, Default)]
pub struct Locations {
    records: Vec<LocationRecord>,
}

impl Locations {
    /// Wraps already-loaded records.
    #[must_use]
    pub const fn new(records: Vec<LocationRecord>) -> Self {
        Self { records }
    }

    /// Map centre for a state: the first coordinate row of that state.
    #[must_use]
    pub fn state_center(&self, state: &str) -> Option<&LocationRecord> {
        let state = title_case(state);
        self.records.iter().find(|r| r.state == state)
    }

    /// Coordinates of a single district.
    #[must_use]
    pub fn district(&self, state: &str, district: &str) -> Option<&LocationRecord> {
        let state = title_case(state);
        let district = title_case(district);
        self.records
            .iter()
            .find(|r| r.state == state && r.district == district)
    }
}
