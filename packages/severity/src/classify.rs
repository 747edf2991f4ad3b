//! Threshold-based classification of a [`SeverityIndex`] into a
//! [`SeverityBand`].

use crime_index_severity_models::{BandThresholds, SeverityBand, SeverityIndex};

/// Buckets `index` using `thresholds`.
#[must_use]
pub fn classify(index: SeverityIndex, thresholds: &BandThresholds) -> SeverityBand {
    let value = index.value();
    if value < thresholds.low_below {
        SeverityBand::Low
    } else if value < thresholds.moderate_max
        || (thresholds.moderate_inclusive && value <= thresholds.moderate_max)
    {
        SeverityBand::Moderate
    } else {
        SeverityBand::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(value: f64, thresholds: &BandThresholds) -> SeverityBand {
        classify(SeverityIndex::from_raw(value), thresholds)
    }

    #[test]
    fn standard_boundaries() {
        let t = BandThresholds::STANDARD;
        assert_eq!(band(0.0, &t), SeverityBand::Low);
        assert_eq!(band(24.99, &t), SeverityBand::Low);
        assert_eq!(band(25.0, &t), SeverityBand::Moderate);
        assert_eq!(band(55.0, &t), SeverityBand::Moderate);
        assert_eq!(band(55.01, &t), SeverityBand::High);
        assert_eq!(band(100.0, &t), SeverityBand::High);
    }

    #[test]
    fn wide_boundaries() {
        let t = BandThresholds::WIDE;
        assert_eq!(band(39.99, &t), SeverityBand::Low);
        assert_eq!(band(40.0, &t), SeverityBand::Moderate);
        assert_eq!(band(69.99, &t), SeverityBand::Moderate);
        assert_eq!(band(70.0, &t), SeverityBand::High);
    }

    #[test]
    fn above_one_hundred_is_high() {
        assert_eq!(band(250.0, &BandThresholds::STANDARD), SeverityBand::High);
    }
}
