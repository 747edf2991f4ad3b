#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Crime category taxonomy and tabular record types.
//!
//! This crate defines the six fixed crime categories tracked by the
//! district-level incident tables, along with the row types for the
//! incident and coordinate datasets. Everything downstream (scoring,
//! filtering, rendering) is expressed in terms of these types.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One of the six crime categories counted per district and year.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CrimeCategory {
    /// Murder
    Murder,
    /// Rape
    Rape,
    /// Kidnapping and abduction
    KidnappingAbduction,
    /// Robbery
    Robbery,
    /// Burglary
    Burglary,
    /// Dowry deaths
    DowryDeaths,
}

impl CrimeCategory {
    /// Returns the column header used for this category in the incident
    /// CSV dataset.
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Murder => "murder",
            Self::Rape => "rape",
            Self::KidnappingAbduction => "kidnapping & abduction",
            Self::Robbery => "robbery",
            Self::Burglary => "burglary",
            Self::DowryDeaths => "dowry deaths",
        }
    }

    /// Returns a human-readable label for tables and charts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Murder => "Murder",
            Self::Rape => "Rape",
            Self::KidnappingAbduction => "Kidnapping & Abduction",
            Self::Robbery => "Robbery",
            Self::Burglary => "Burglary",
            Self::DowryDeaths => "Dowry Deaths",
        }
    }

    /// Returns the default weight of this category in the severity index.
    #[must_use]
    pub const fn default_weight(self) -> u32 {
        match self {
            Self::Murder => 5,
            Self::Rape | Self::KidnappingAbduction => 4,
            Self::Robbery | Self::Burglary | Self::DowryDeaths => 3,
        }
    }

    /// Looks up a category by its CSV column header, ignoring case and
    /// surrounding whitespace.
    #[must_use]
    pub fn from_column_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|cat| cat.column_name().eq_ignore_ascii_case(name))
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Murder,
            Self::Rape,
            Self::KidnappingAbduction,
            Self::Robbery,
            Self::Burglary,
            Self::DowryDeaths,
        ]
    }
}

/// Incident counts for each [`CrimeCategory`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCounts {
    /// Murder count.
    pub murder: u64,
    /// Rape count.
    pub rape: u64,
    /// Kidnapping and abduction count.
    pub kidnapping_abduction: u64,
    /// Robbery count.
    pub robbery: u64,
    /// Burglary count.
    pub burglary: u64,
    /// Dowry deaths count.
    pub dowry_deaths: u64,
}

impl CategoryCounts {
    /// Returns the count for a single category.
    #[must_use]
    pub const fn get(&self, category: CrimeCategory) -> u64 {
        match category {
            CrimeCategory::Murder => self.murder,
            CrimeCategory::Rape => self.rape,
            CrimeCategory::KidnappingAbduction => self.kidnapping_abduction,
            CrimeCategory::Robbery => self.robbery,
            CrimeCategory::Burglary => self.burglary,
            CrimeCategory::DowryDeaths => self.dowry_deaths,
        }
    }

    /// Returns a mutable reference to the count for a single category.
    pub const fn get_mut(&mut self, category: CrimeCategory) -> &mut u64 {
        match category {
            CrimeCategory::Murder => &mut self.murder,
            CrimeCategory::Rape => &mut self.rape,
            CrimeCategory::KidnappingAbduction => &mut self.kidnapping_abduction,
            CrimeCategory::Robbery => &mut self.robbery,
            CrimeCategory::Burglary => &mut self.burglary,
            CrimeCategory::DowryDeaths => &mut self.dowry_deaths,
        }
    }

    /// Builder-style setter.
    #[must_use]
    pub const fn with(mut self, category: CrimeCategory, count: u64) -> Self {
        *self.get_mut(category) = count;
        self
    }

    /// Sum of all six categories.
    #[must_use]
    pub fn total(&self) -> u64 {
        CrimeCategory::all().iter().map(|c| self.get(*c)).sum()
    }

    /// Adds another set of counts into this one, saturating on overflow.
    pub fn accumulate(&mut self, other: &Self) {
        for cat in CrimeCategory::all() {
            let slot = self.get_mut(*cat);
            *slot = slot.saturating_add(other.get(*cat));
        }
    }

    /// Keeps the per-category maximum of this and `other`.
    pub fn max_assign(&mut self, other: &Self) {
        for cat in CrimeCategory::all() {
            let slot = self.get_mut(*cat);
            *slot = (*slot).max(other.get(*cat));
        }
    }

    /// Iterates `(category, count)` pairs in canonical category order.
    pub fn iter(&self) -> impl Iterator<Item = (CrimeCategory, u64)> + '_ {
        CrimeCategory::all().iter().map(|c| (*c, self.get(*c)))
    }
}

/// One row of the incident dataset: counts for a single district and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// State or union territory name (title case).
    pub state: String,
    /// District name (title case).
    pub district: String,
    /// Reporting year.
    pub year: i32,
    /// Per-category incident counts.
    pub counts: CategoryCounts,
}

/// One row of the coordinate dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    /// State or union territory name (title case).
    pub state: String,
    /// District name (title case).
    pub district: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}
