#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Scoring configuration and result types for the crime severity index.
//!
//! The index is a weighted sum of category counts divided by a
//! normalizer and scaled to 0-100. This crate holds the knobs that
//! parameterize that computation ([`CategoryWeights`],
//! [`NormalizerPolicy`], [`BandThresholds`]) and the values it produces
//! ([`SeverityIndex`], [`SeverityBand`]).

use std::collections::BTreeMap;

use crime_index_crime_models::CrimeCategory;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Per-category ceiling used by [`NormalizerPolicy::FixedCeiling`] when
/// none is configured.
pub const DEFAULT_CEILING: u64 = 500;

/// Errors raised when validating scoring configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringConfigError {
    /// A category is missing from the weight table.
    #[error("missing weight for category {0}")]
    MissingWeight(CrimeCategory),

    /// A category weight is zero.
    #[error("weight for category {0} must be positive")]
    ZeroWeight(CrimeCategory),

    /// The fixed ceiling is zero.
    #[error("normalizer ceiling must be positive")]
    ZeroCeiling,

    /// Threshold bounds are out of order or outside 0-100.
    #[error("invalid band thresholds: low_below={low_below}, moderate_max={moderate_max}")]
    InvalidThresholds {
        /// Configured lower bound of the moderate band.
        low_below: f64,
        /// Configured upper bound of the moderate band.
        moderate_max: f64,
    },
}

/// Mapping of each [`CrimeCategory`] to its positive integer weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryWeights(BTreeMap<CrimeCategory, u32>);

impl Default for CategoryWeights {
    fn default() -> Self {
        Self(
            CrimeCategory::all()
                .iter()
                .map(|c| (*c, c.default_weight()))
                .collect(),
        )
    }
}

impl CategoryWeights {
    /// Builds a weight table from explicit `(category, weight)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringConfigError`] if any category is missing or has a
    /// zero weight.
    pub fn new(
        weights: impl IntoIterator<Item = (CrimeCategory, u32)>,
    ) -> Result<Self, ScoringConfigError> {
        let weights = Self(weights.into_iter().collect());
        weights.validate()?;
        Ok(weights)
    }

    /// Checks that all six categories carry a positive weight.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringConfigError`] on the first offending category.
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        for cat in CrimeCategory::all() {
            match self.0.get(cat) {
                None => return Err(ScoringConfigError::MissingWeight(*cat)),
                Some(0) => return Err(ScoringConfigError::ZeroWeight(*cat)),
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Returns the weight for `category`, or 0 if it is not present.
    #[must_use]
    pub fn get(&self, category: CrimeCategory) -> u32 {
        self.0.get(&category).copied().unwrap_or(0)
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().map(|w| u64::from(*w)).sum()
    }

    /// Iterates `(category, weight)` pairs in canonical category order.
    pub fn iter(&self) -> impl Iterator<Item = (CrimeCategory, u32)> + '_ {
        self.0.iter().map(|(c, w)| (*c, *w))
    }
}

/// How the weighted sum is scaled into the 0-100 index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NormalizerPolicy {
    /// `sum(ceiling * weight)`. Comparable across datasets and calls.
    FixedCeiling {
        /// Per-category count treated as the top of the scale.
        #[serde(default = "default_ceiling")]
        ceiling: u64,
    },
    /// `sum(max_observed(category) * weight)` over the full loaded
    /// dataset. Shifts whenever the dataset changes.
    DatasetMax,
}

const fn default_ceiling() -> u64 {
    DEFAULT_CEILING
}

impl Default for NormalizerPolicy {
    fn default() -> Self {
        Self::FixedCeiling {
            ceiling: DEFAULT_CEILING,
        }
    }
}

impl std::fmt::Display for NormalizerPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FixedCeiling { ceiling } => write!(f, "fixed ceiling ({ceiling})"),
            Self::DatasetMax => write!(f, "dataset maximum"),
        }
    }
}

/// Classification band derived from a [`SeverityIndex`].
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
pub enum SeverityBand {
    /// Below the moderate threshold.
    Low,
    /// Between the two thresholds.
    Moderate,
    /// Above the moderate band.
    High,
}

impl SeverityBand {
    /// Marker color used on the map.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "green",
            Self::Moderate => "orange",
            Self::High => "red",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Moderate, Self::High]
    }
}

/// Boundaries between the [`SeverityBand`]s.
///
/// `index < low_below` is [`SeverityBand::Low`]. The moderate band runs
/// from `low_below` up to `moderate_max`, closed or open at the top
/// depending on `moderate_inclusive`. Everything above is
/// [`SeverityBand::High`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BandThresholds {
    /// Lower bound (inclusive) of the moderate band.
    pub low_below: f64,
    /// Upper bound of the moderate band.
    pub moderate_max: f64,
    /// Whether `moderate_max` itself is moderate (`true`) or high.
    pub moderate_inclusive: bool,
}

impl BandThresholds {
    /// `< 25` low, `25..=55` moderate, `> 55` high.
    pub const STANDARD: Self = Self {
        low_below: 25.0,
        moderate_max: 55.0,
        moderate_inclusive: true,
    };

    /// `< 40` low, `40..70` moderate, `>= 70` high.
    pub const WIDE: Self = Self {
        low_below: 40.0,
        moderate_max: 70.0,
        moderate_inclusive: false,
    };

    /// Checks that the bounds are ordered and within 0-100.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringConfigError::InvalidThresholds`] otherwise.
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if in_range(self.low_below)
            && in_range(self.moderate_max)
            && self.low_below <= self.moderate_max
        {
            Ok(())
        } else {
            Err(ScoringConfigError::InvalidThresholds {
                low_below: self.low_below,
                moderate_max: self.moderate_max,
            })
        }
    }
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Named threshold sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdPreset {
    /// [`BandThresholds::STANDARD`]
    Standard,
    /// [`BandThresholds::WIDE`]
    Wide,
}

/// Threshold configuration: either a named preset or explicit bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThresholdConfig {
    /// A named preset, e.g. `thresholds = "wide"`.
    Preset(ThresholdPreset),
    /// Explicit bounds.
    Custom(BandThresholds),
}

impl ThresholdConfig {
    /// Returns the concrete bounds for this configuration.
    #[must_use]
    pub const fn resolve(&self) -> BandThresholds {
        match self {
            Self::Preset(ThresholdPreset::Standard) => BandThresholds::STANDARD,
            Self::Preset(ThresholdPreset::Wide) => BandThresholds::WIDE,
            Self::Custom(t) => *t,
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self::Preset(ThresholdPreset::Standard)
    }
}

/// Complete scoring configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ScoringConfig {
    /// Category weights.
    pub weights: CategoryWeights,
    /// Normalizer policy.
    pub normalizer: NormalizerPolicy,
    /// Band thresholds.
    pub thresholds: ThresholdConfig,
}

impl ScoringConfig {
    /// Validates weights, ceiling, and thresholds.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScoringConfigError`] found.
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        self.weights.validate()?;
        if let NormalizerPolicy::FixedCeiling { ceiling: 0 } = self.normalizer {
            return Err(ScoringConfigError::ZeroCeiling);
        }
        self.thresholds.resolve().validate()
    }
}

/// A computed severity index, rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeverityIndex(f64);

impl SeverityIndex {
    /// The zero index.
    pub const ZERO: Self = Self(0.0);

    /// Wraps a raw ratio-times-100 value, rounding it to two decimals with
    /// ties going to the even digit. Non-finite inputs collapse to zero.
    #[must_use]
    pub fn from_raw(raw: f64) -> Self {
        if raw.is_finite() {
            Self((raw * 100.0).round_ties_even() / 100.0)
        } else {
            Self::ZERO
        }
    }

    /// Returns the rounded value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for SeverityIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
