#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Weighted crime severity index.
//!
//! Sums category counts over a slice of incident rows, weights them,
//! divides by a [`Normalizer`] and scales to 0-100. The resulting
//! [`SeverityIndex`] is then bucketed into a [`SeverityBand`] and paired
//! with canned safety recommendations.
//!
//! [`SeverityIndex`]: crime_index_severity_models::SeverityIndex
//! [`SeverityBand`]: crime_index_severity_models::SeverityBand

pub mod classify;
pub mod recommendations;
pub mod scorer;

pub use classify::classify;
pub use scorer::{Normalizer, ScoredSlice, Scorer, compute_index, weighted_sum};
