//! Severity index computation.
//!
//! `index = sum(weight * sum_rows(count)) / normalizer * 100`, rounded to
//! two decimals. A zero normalizer yields an index of zero.

use crime_index_crime_models::{CategoryCounts, CrimeCategory};
use crime_index_severity_models::{
    BandThresholds, CategoryWeights, NormalizerPolicy, ScoringConfig, SeverityBand, SeverityIndex,
};

use crate::classify::classify;

/// Sums per-category counts across rows.
pub fn aggregate<'a>(rows: impl IntoIterator<Item = &'a CategoryCounts>) -> CategoryCounts {
    let mut totals = CategoryCounts::default();
    for row in rows {
        totals.accumulate(row);
    }
    totals
}

/// Weighted sum of already-aggregated counts.
#[must_use]
pub fn weighted_sum(counts: &CategoryCounts, weights: &CategoryWeights) -> u64 {
    weights
        .iter()
        .map(|(cat, w)| counts.get(cat).saturating_mul(u64::from(w)))
        .fold(0, u64::saturating_add)
}

/// Per-category weighted contribution, in canonical category order.
#[must_use]
pub fn category_contributions(
    counts: &CategoryCounts,
    weights: &CategoryWeights,
) -> Vec<(CrimeCategory, u64)> {
    CrimeCategory::all()
        .iter()
        .map(|cat| {
            (
                *cat,
                counts.get(*cat).saturating_mul(u64::from(weights.get(*cat))),
            )
        })
        .collect()
}

/// Category with the largest weighted contribution, or `None` if every
/// contribution is zero. Ties go to the earlier category.
#[must_use]
pub fn dominant_category(counts: &CategoryCounts, weights: &CategoryWeights) -> Option<CrimeCategory> {
    category_contributions(counts, weights)
        .into_iter()
        .filter(|(_, v)| *v > 0)
        .fold(None, |best: Option<(CrimeCategory, u64)>, (cat, v)| match best {
            Some((_, bv)) if bv >= v => best,
            _ => Some((cat, v)),
        })
        .map(|(cat, _)| cat)
}

/// Denominator that scales a weighted sum into the 0-100 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer(f64);

impl Normalizer {
    /// `sum(ceiling * weight)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fixed(ceiling: u64, weights: &CategoryWeights) -> Self {
        Self((ceiling.saturating_mul(weights.total())) as f64)
    }

    /// `sum(max_observed(category) * weight)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_maxima(maxima: &CategoryCounts, weights: &CategoryWeights) -> Self {
        Self(weighted_sum(maxima, weights) as f64)
    }

    /// Builds the normalizer for `policy`. `maxima` is only consulted for
    /// [`NormalizerPolicy::DatasetMax`].
    #[must_use]
    pub fn resolve(
        policy: NormalizerPolicy,
        weights: &CategoryWeights,
        maxima: &CategoryCounts,
    ) -> Self {
        match policy {
            NormalizerPolicy::FixedCeiling { ceiling } => Self::fixed(ceiling, weights),
            NormalizerPolicy::DatasetMax => Self::from_maxima(maxima, weights),
        }
    }

    /// Returns the raw denominator.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Computes the severity index for a set of rows.
///
/// Row order does not affect the result.
pub fn compute_index<'a>(
    rows: impl IntoIterator<Item = &'a CategoryCounts>,
    weights: &CategoryWeights,
    normalizer: Normalizer,
) -> SeverityIndex {
    index_for_totals(&aggregate(rows), weights, normalizer)
}

/// Computes the severity index from already-aggregated counts.
#[must_use]
pub fn index_for_totals(
    totals: &CategoryCounts,
    weights: &CategoryWeights,
    normalizer: Normalizer,
) -> SeverityIndex {
    if normalizer.value() <= 0.0 {
        return SeverityIndex::ZERO;
    }

    #[allow(clippy::cast_precision_loss)]
    let sum = weighted_sum(totals, weights) as f64;
    SeverityIndex::from_raw(sum / normalizer.value() * 100.0)
}

/// Result of scoring one slice of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSlice {
    /// Aggregated per-category counts for the slice.
    pub totals: CategoryCounts,
    /// Severity index.
    pub index: SeverityIndex,
    /// Classification band.
    pub band: SeverityBand,
    /// Category contributing most to the weighted sum.
    pub dominant: Option<CrimeCategory>,
}

/// A scoring configuration bound to a resolved normalizer.
///
/// Built once per loaded dataset and reused for every slice.
#[derive(Debug, Clone)]
pub struct Scorer {
    weights: CategoryWeights,
    normalizer: Normalizer,
    thresholds: BandThresholds,
}

impl Scorer {
    /// Resolves `config` against the dataset's per-category maxima.
    #[must_use]
    pub fn new(config: &ScoringConfig, maxima: &CategoryCounts) -> Self {
        let normalizer = Normalizer::resolve(config.normalizer, &config.weights, maxima);
        log::debug!(
            "Severity scorer: policy={}, normalizer={}",
            config.normalizer,
            normalizer.value()
        );
        if normalizer.value() <= 0.0 {
            log::warn!("Severity normalizer is zero; every index will be 0");
        }
        Self {
            weights: config.weights.clone(),
            normalizer,
            thresholds: config.thresholds.resolve(),
        }
    }

    /// Scores a slice of rows.
    pub fn score<'a>(&self, rows: impl IntoIterator<Item = &'a CategoryCounts>) -> ScoredSlice {
        let totals = aggregate(rows);
        let index = index_for_totals(&totals, &self.weights, self.normalizer);
        ScoredSlice {
            totals,
            index,
            band: classify(index, &self.thresholds),
            dominant: dominant_category(&totals, &self.weights),
        }
    }

    /// Category weights in use.
    #[must_use]
    pub const fn weights(&self) -> &CategoryWeights {
        &self.weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_fixed() -> (CategoryWeights, Normalizer) {
        let weights = CategoryWeights::default();
        let normalizer = Normalizer::fixed(500, &weights);
        (weights, normalizer)
    }

    #[test]
    fn all_zero_counts_score_zero() {
        let (weights, normalizer) = default_fixed();
        let rows = vec![CategoryCounts::default(); 4];
        assert_eq!(compute_index(&rows, &weights, normalizer), SeverityIndex::ZERO);
    }

    #[test]
    fn empty_slice_scores_zero() {
        let (weights, normalizer) = default_fixed();
        let rows: Vec<CategoryCounts> = Vec::new();
        assert_eq!(compute_index(&rows, &weights, normalizer), SeverityIndex::ZERO);
    }

    #[test]
    fn murder_hundred_scores_four_point_five_five() {
        let (weights, normalizer) = default_fixed();
        assert!((normalizer.value() - 11_000.0).abs() < f64::EPSILON);

        let rows = [CategoryCounts::default().with(CrimeCategory::Murder, 100)];
        assert_eq!(weighted_sum(&rows[0], &weights), 500);
        let index = compute_index(&rows, &weights, normalizer);
        assert!((index.value() - 4.55).abs() < 1e-9, "got {index}");
    }

    #[test]
    fn single_category_at_ceiling() {
        let (weights, normalizer) = default_fixed();
        for cat in CrimeCategory::all() {
            let rows = [CategoryCounts::default().with(*cat, 500)];
            let index = compute_index(&rows, &weights, normalizer);
            let w = f64::from(weights.get(*cat));
            let expected = SeverityIndex::from_raw(w * 500.0 / 11_000.0 * 100.0);
            assert_eq!(index, expected, "{cat}");
        }
    }

    #[test]
    fn every_category_at_ceiling_is_one_hundred() {
        let (weights, normalizer) = default_fixed();
        let row = CrimeCategory::all()
            .iter()
            .fold(CategoryCounts::default(), |acc, c| acc.with(*c, 500));
        let index = compute_index([&row], &weights, normalizer);
        assert!((index.value() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn row_order_does_not_matter() {
        let (weights, normalizer) = default_fixed();
        let a = CategoryCounts::default()
            .with(CrimeCategory::Robbery, 37)
            .with(CrimeCategory::Rape, 11);
        let b = CategoryCounts::default().with(CrimeCategory::DowryDeaths, 8);
        let c = CategoryCounts::default()
            .with(CrimeCategory::Murder, 19)
            .with(CrimeCategory::Burglary, 240);

        let forward = compute_index([&a, &b, &c], &weights, normalizer);
        let reverse = compute_index([&c, &b, &a], &weights, normalizer);
        let shuffled = compute_index([&b, &c, &a], &weights, normalizer);
        assert_eq!(forward, reverse);
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn index_is_monotonic_in_each_category() {
        let (weights, normalizer) = default_fixed();
        let base = CategoryCounts::default()
            .with(CrimeCategory::Murder, 12)
            .with(CrimeCategory::Burglary, 80);

        for cat in CrimeCategory::all() {
            let mut previous = compute_index([&base], &weights, normalizer);
            for step in 1..=20u64 {
                let row = base.with(*cat, base.get(*cat) + step * 25);
                let current = compute_index([&row], &weights, normalizer);
                assert!(current >= previous, "{cat} decreased at step {step}");
                previous = current;
            }
        }
    }

    #[test]
    fn zero_normalizer_scores_zero() {
        let weights = CategoryWeights::default();
        let normalizer = Normalizer::from_maxima(&CategoryCounts::default(), &weights);
        let rows = [CategoryCounts::default().with(CrimeCategory::Murder, 3)];
        assert_eq!(compute_index(&rows, &weights, normalizer), SeverityIndex::ZERO);
    }

    #[test]
    fn dataset_max_policy_is_relative_to_maxima() {
        let weights = CategoryWeights::default();
        let maxima = CategoryCounts::default()
            .with(CrimeCategory::Murder, 10)
            .with(CrimeCategory::Burglary, 20);
        let normalizer = Normalizer::resolve(NormalizerPolicy::DatasetMax, &weights, &maxima);
        // 10*5 + 20*3
        assert!((normalizer.value() - 110.0).abs() < f64::EPSILON);

        let index = compute_index([&maxima], &weights, normalizer);
        assert!((index.value() - 100.0).abs() < 1e-9);

        // Summing two maximal rows goes past 100 under this policy.
        let doubled = compute_index([&maxima, &maxima], &weights, normalizer);
        assert!((doubled.value() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn dominant_category_picks_largest_weighted_share() {
        let weights = CategoryWeights::default();
        let counts = CategoryCounts::default()
            .with(CrimeCategory::Murder, 10)
            .with(CrimeCategory::Burglary, 20);
        assert_eq!(
            dominant_category(&counts, &weights),
            Some(CrimeCategory::Burglary)
        );
        assert_eq!(dominant_category(&CategoryCounts::default(), &weights), None);
    }

    #[test]
    fn scorer_classifies_slices() {
        let scorer = Scorer::new(&ScoringConfig::default(), &CategoryCounts::default());
        let heavy = CrimeCategory::all()
            .iter()
            .fold(CategoryCounts::default(), |acc, c| acc.with(*c, 400));
        let slice = scorer.score([&heavy]);
        assert!((slice.index.value() - 80.0).abs() < 1e-9);
        assert_eq!(slice.band, SeverityBand::High);
        assert_eq!(slice.dominant, Some(CrimeCategory::Murder));

        let quiet = scorer.score([&CategoryCounts::default()]);
        assert_eq!(quiet.band, SeverityBand::Low);
        assert_eq!(quiet.dominant, None);
    }
}
