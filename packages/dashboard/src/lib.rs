#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Crime severity dashboard.
//!
//! A [`Dashboard`] owns the loaded incident and coordinate tables plus a
//! resolved [`Scorer`], and builds the per-state analysis and per-district
//! detail views from them. Views are rendered to the terminal
//! ([`render`]), exported as `GeoJSON` ([`map`]), or served as JSON by the
//! API server. [`interactive`] drives the page state machine from
//! terminal prompts.

pub mod config;
pub mod interactive;
pub mod map;
pub mod render;
mod views;

use std::sync::Arc;

use crime_index_dataset::progress::ProgressCallback;
use crime_index_dataset::{Dataset, DatasetError, Locations, load};
use crime_index_severity::Scorer;
use crime_index_severity_models::ScoringConfig;

use crate::config::{ConfigError, DashboardConfig};

/// Errors that can occur while building or presenting dashboard views.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// The requested state is not in the incident table.
    #[error("Unknown state '{0}'")]
    UnknownState(String),

    /// The requested district is not in the incident table for the state.
    #[error("Unknown district '{district}' in {state}")]
    UnknownDistrict {
        /// State searched.
        state: String,
        /// District requested.
        district: String,
    },

    /// Loading a dataset failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Loading configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A terminal prompt failed.
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Loaded tables plus the scoring setup used for every view.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Dataset,
    locations: Locations,
    scorer: Scorer,
    year: Option<i32>,
}

impl Dashboard {
    /// Builds a dashboard over already-loaded tables. `year` pins the
    /// analysis year; `None` picks the latest year per state.
    #[must_use]
    pub fn new(
        dataset: Dataset,
        locations: Locations,
        scoring: &ScoringConfig,
        year: Option<i32>,
    ) -> Self {
        let scorer = Scorer::new(scoring, dataset.category_maxima());
        Self {
            dataset,
            locations,
            scorer,
            year,
        }
    }

    /// Loads both CSVs named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Dataset`] if either file cannot be read
    /// or parsed.
    pub fn load(
        config: &DashboardConfig,
        incidents_progress: &Arc<dyn ProgressCallback>,
        locations_progress: &Arc<dyn ProgressCallback>,
    ) -> Result<Self, DashboardError> {
        let incidents = load::load_incidents(&config.crime_data, incidents_progress)?;
        let locations = load::load_locations(&config.location_data, locations_progress)?;

        let dataset = Dataset::new(incidents);
        log::info!(
            "Loaded {} incident rows across {} states ({} coordinate rows)",
            dataset.len(),
            dataset.states().len(),
            locations.len()
        );

        Ok(Self::new(
            dataset,
            Locations::new(locations),
            &config.scoring,
            config.year,
        ))
    }

    /// The incident table.
    #[must_use]
    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Sorted state names.
    #[must_use]
    pub fn states(&self) -> Vec<&str> {
        self.dataset.states()
    }

    /// Sorted district names of `state`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::UnknownState`] if `state` is not present.
    pub fn districts(&self, state: &str) -> Result<Vec<&str>, DashboardError> {
        let state = self.resolve_state(state)?;
        Ok(self.dataset.districts(state))
    }

    /// Canonical spelling of `state`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::UnknownState`] if `state` is not present.
    pub fn resolve_state(&self, state: &str) -> Result<&str, DashboardError> {
        self.dataset
            .find_state(state)
            .ok_or_else(|| DashboardError::UnknownState(state.to_string()))
    }

    /// Canonical spelling of `district` within `state`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::UnknownState`] or
    /// [`DashboardError::UnknownDistrict`].
    pub fn resolve_district(&self, state: &str, district: &str) -> Result<&str, DashboardError> {
        let state = self.resolve_state(state)?;
        self.dataset
            .find_district(state, district)
            .ok_or_else(|| DashboardError::UnknownDistrict {
                state: state.to_string(),
                district: district.to_string(),
            })
    }
}
