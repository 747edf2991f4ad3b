#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Page state and view types for the crime severity dashboard.
//!
//! Views are plain serializable snapshots built from the loaded tables.
//! The terminal renderer and the JSON API both consume them, so they are
//! kept separate from the dataset row types.

use crime_index_crime_models::CrimeCategory;
use crime_index_severity_models::{SeverityBand, SeverityIndex};
use serde::{Deserialize, Serialize};

/// Which dashboard page is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "camelCase")]
pub enum Page {
    /// Choose a state.
    #[default]
    SelectRegion,
    /// District severity map and table for a state.
    ShowAnalysis {
        /// Selected state.
        state: String,
    },
    /// Trend, breakdown, and recommendations for one district.
    ShowDetail {
        /// Selected state.
        state: String,
        /// Selected district.
        district: String,
    },
}

/// User input that moves between [`Page`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum PageAction {
    /// Pick a state.
    SelectState {
        /// State name.
        state: String,
    },
    /// Pick a district of the current state.
    SelectDistrict {
        /// District name.
        district: String,
    },
    /// Go one page up.
    Back,
    /// Return to [`Page::SelectRegion`].
    Home,
}

impl Page {
    /// Applies `action`, returning the resulting page. Actions that make
    /// no sense on the current page leave it unchanged.
    #[must_use]
    pub fn next(self, action: PageAction) -> Self {
        match (self, action) {
            (_, PageAction::Home) | (Self::SelectRegion | Self::ShowAnalysis { .. }, PageAction::Back) => {
                Self::SelectRegion
            }
            (Self::SelectRegion, PageAction::SelectState { state }) => Self::ShowAnalysis { state },
            (Self::ShowAnalysis { state }, PageAction::SelectDistrict { district }) => {
                Self::ShowDetail { state, district }
            }
            (Self::ShowDetail { state, .. }, PageAction::Back) => Self::ShowAnalysis { state },
            (page, _) => page,
        }
    }

    /// Short title for headers and prompts.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::SelectRegion => "Crime Data Analysis & Safety Insights".to_string(),
            Self::ShowAnalysis { state } => format!("Crime Severity Index for Districts in {state}"),
            Self::ShowDetail { state, district } => format!("{district}, {state}"),
        }
    }
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// One row of the district severity table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictSeverity {
    /// District name.
    pub district: String,
    /// Severity index for the analysis year.
    pub severity: SeverityIndex,
    /// Classification band.
    pub band: SeverityBand,
    /// Sum of all category counts for the analysis year.
    pub total_incidents: u64,
    /// District coordinates, if known.
    pub coordinates: Option<Coordinates>,
}

/// The per-state analysis page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisView {
    /// State name.
    pub state: String,
    /// Year analysed, `None` if the state has no rows at all.
    pub year: Option<i32>,
    /// Severity of the whole state for the year.
    pub state_severity: SeverityIndex,
    /// Band of the whole state.
    pub state_band: SeverityBand,
    /// Map centre, `None` when the coordinate table has no row for the
    /// state.
    pub center: Option<Coordinates>,
    /// Districts sorted by severity, highest first.
    pub districts: Vec<DistrictSeverity>,
    /// Non-fatal problems (missing coordinates).
    pub warnings: Vec<String>,
}

/// Per-category slice of a district's counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    /// Category.
    pub category: CrimeCategory,
    /// Display label.
    pub label: String,
    /// Raw incident count.
    pub count: u64,
    /// Weight used in the index.
    pub weight: u32,
    /// `count * weight`.
    pub weighted: u64,
}

/// One point of a district's year-over-year trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Reporting year.
    pub year: i32,
    /// Severity index for the year.
    pub severity: SeverityIndex,
    /// Classification band.
    pub band: SeverityBand,
    /// Sum of all categories for the year.
    pub total_incidents: u64,
}

/// Safety advice shown on the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationView {
    /// One-line summary.
    pub headline: String,
    /// Individual recommendations.
    pub advice: Vec<String>,
}

/// The per-district detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    /// State name.
    pub state: String,
    /// District name.
    pub district: String,
    /// Year the breakdown and headline severity refer to.
    pub year: Option<i32>,
    /// Severity index for `year`.
    pub severity: SeverityIndex,
    /// Classification band for `year`.
    pub band: SeverityBand,
    /// Category breakdown for `year`.
    pub categories: Vec<CategoryBreakdown>,
    /// Severity per year, ascending.
    pub trend: Vec<TrendPoint>,
    /// Safety advice.
    pub recommendations: RecommendationView,
}

/// A crime category as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCategory {
    /// Category identifier.
    pub category: CrimeCategory,
    /// Display label.
    pub label: String,
    /// CSV column header.
    pub column: String,
    /// Weight used in the index.
    pub weight: u32,
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Number of incident rows loaded.
    pub incident_rows: usize,
}
