//! View builders for the analysis and detail pages.

use crime_index_crime_models::{CrimeCategory, LocationRecord};
use crime_index_dashboard_models::{
    AnalysisView, ApiCategory, CategoryBreakdown, Coordinates, DetailView, DistrictSeverity,
    RecommendationView, TrendPoint,
};
use crime_index_dataset::RegionFilter;
use crime_index_severity::recommendations;

use crate::{Dashboard, DashboardError};

const fn coordinates(record: &LocationRecord) -> Coordinates {
    Coordinates {
        latitude: record.latitude,
        longitude: record.longitude,
    }
}

impl Dashboard {
    /// Categories and the weights currently in use.
    #[must_use]
    pub fn categories(&self) -> Vec<ApiCategory> {
        CrimeCategory::all()
            .iter()
            .map(|cat| ApiCategory {
                category: *cat,
                label: cat.label().to_string(),
                column: cat.column_name().to_string(),
                weight: self.scorer.weights().get(*cat),
            })
            .collect()
    }

    /// Year used for `state` when the caller does not pick one: the
    /// pinned year if configured, else the latest year present for the
    /// state.
    #[must_use]
    pub fn analysis_year(&self, state: &str) -> Option<i32> {
        self.year.or_else(|| self.dataset.latest_year_for(state))
    }

    /// Builds the per-state analysis page: one severity row per district
    /// for `year`, sorted highest first, with map coordinates where the
    /// coordinate table has them.
    ///
    /// Missing coordinates are reported in [`AnalysisView::warnings`]
    /// and never fail the view.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::UnknownState`] if `state` is not present.
    pub fn analysis(&self, state: &str, year: Option<i32>) -> Result<AnalysisView, DashboardError> {
        let state = self.resolve_state(state)?;
        let year = year.or_else(|| self.analysis_year(state));
        let mut warnings = Vec::new();

        let center = self.locations.state_center(state).map(coordinates);
        if center.is_none() {
            log::warn!("No coordinates found for state {state}");
            warnings.push("Coordinates for the selected state were not found.".to_string());
        }

        let state_filter = RegionFilter::new().state(state).maybe_year(year);
        let state_slice = self
            .scorer
            .score(self.dataset.filter(&state_filter).map(|r| &r.counts));

        let mut districts: Vec<DistrictSeverity> = self
            .dataset
            .districts(state)
            .into_iter()
            .map(|district| {
                let filter = RegionFilter::new()
                    .state(state)
                    .district(district)
                    .maybe_year(year);
                let slice = self
                    .scorer
                    .score(self.dataset.filter(&filter).map(|r| &r.counts));

                let coords = self.locations.district(state, district).map(coordinates);
                if coords.is_none() && center.is_some() {
                    log::warn!("No coordinates found for {district}, {state}");
                    warnings.push(format!("Coordinates for {district} were not found."));
                }

                DistrictSeverity {
                    district: district.to_string(),
                    severity: slice.index,
                    band: slice.band,
                    total_incidents: slice.totals.total(),
                    coordinates: coords,
                }
            })
            .collect();

        districts.sort_by(|a, b| {
            b.severity
                .value()
                .total_cmp(&a.severity.value())
                .then_with(|| a.district.cmp(&b.district))
        });

        Ok(AnalysisView {
            state: state.to_string(),
            year,
            state_severity: state_slice.index,
            state_band: state_slice.band,
            center,
            districts,
            warnings,
        })
    }

    /// Builds the per-district detail page: severity for every year the
    /// district reports, a category breakdown and recommendations for
    /// the analysis year.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::UnknownState`] or
    /// [`DashboardError::UnknownDistrict`].
    pub fn detail(
        &self,
        state: &str,
        district: &str,
        year: Option<i32>,
    ) -> Result<DetailView, DashboardError> {
        let district = self.resolve_district(state, district)?;
        let state = self.resolve_state(state)?;

        let trend: Vec<TrendPoint> = self
            .dataset
            .yearly_totals(state, Some(district))
            .into_iter()
            .map(|totals| {
                let slice = self.scorer.score([&totals.counts]);
                TrendPoint {
                    year: totals.year,
                    severity: slice.index,
                    band: slice.band,
                    total_incidents: totals.total,
                }
            })
            .collect();

        let year = year.or_else(|| self.analysis_year(state));
        let filter = RegionFilter::new()
            .state(state)
            .district(district)
            .maybe_year(year);
        let slice = self
            .scorer
            .score(self.dataset.filter(&filter).map(|r| &r.counts));

        let weights = self.scorer.weights();
        let categories = slice
            .totals
            .iter()
            .map(|(cat, count)| {
                let weight = weights.get(cat);
                CategoryBreakdown {
                    category: cat,
                    label: cat.label().to_string(),
                    count,
                    weight,
                    weighted: count.saturating_mul(u64::from(weight)),
                }
            })
            .collect();

        let advice = recommendations::for_slice(&slice);

        Ok(DetailView {
            state: state.to_string(),
            district: district.to_string(),
            year,
            severity: slice.index,
            band: slice.band,
            categories,
            trend,
            recommendations: RecommendationView {
                headline: advice.headline.to_string(),
                advice: advice.lines().map(str::to_string).collect(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use crime_index_crime_models::{CategoryCounts, IncidentRecord};
    use crime_index_dataset::{Dataset, Locations};
    use crime_index_severity_models::{
        BandThresholds, NormalizerPolicy, ScoringConfig, SeverityBand, ThresholdConfig,
    };

    use super::*;

    fn record(state: &str, district: &str, year: i32, counts: CategoryCounts) -> IncidentRecord {
        IncidentRecord {
            state: state.to_string(),
            district: district.to_string(),
            year,
            counts,
        }
    }

    fn location(state: &str, district: &str, lat: f64, lon: f64) -> LocationRecord {
        LocationRecord {
            state: state.to_string(),
            district: district.to_string(),
            latitude: lat,
            longitude: lon,
        }
    }

    fn dashboard(scoring: &ScoringConfig, year: Option<i32>) -> Dashboard {
        let murder = |n| CategoryCounts::default().with(CrimeCategory::Murder, n);
        let dataset = Dataset::new(vec![
            record("Goa", "North Goa", 2022, murder(100)),
            record("Goa", "North Goa", 2023, murder(200)),
            record("Goa", "South Goa", 2023, murder(50)),
            record(
                "Goa",
                "Panaji",
                2023,
                CategoryCounts::default()
                    .with(CrimeCategory::Murder, 500)
                    .with(CrimeCategory::Rape, 500)
                    .with(CrimeCategory::Robbery, 500),
            ),
            record("Kerala", "Kollam", 2023, murder(10)),
        ]);
        let locations = Locations::new(vec![
            location("Goa", "North Goa", 15.5, 73.9),
            location("Goa", "South Goa", 15.2, 74.0),
        ]);
        Dashboard::new(dataset, locations, scoring, year)
    }

    #[test]
    fn analysis_sorts_districts_descending() {
        let dash = dashboard(&ScoringConfig::default(), None);
        let view = dash.analysis("goa", None).unwrap();
        assert_eq!(view.state, "Goa");
        assert_eq!(view.year, Some(2023));

        let names: Vec<_> = view.districts.iter().map(|d| d.district.as_str()).collect();
        assert_eq!(names, vec!["Panaji", "North Goa", "South Goa"]);

        // 500*(5+4+3) / 11000 * 100
        assert!((view.districts[0].severity.value() - 54.55).abs() < 1e-9);
        assert_eq!(view.districts[0].band, SeverityBand::Moderate);
        // 200*5 / 11000 * 100
        assert!((view.districts[1].severity.value() - 9.09).abs() < 1e-9);
        assert_eq!(view.districts[1].band, SeverityBand::Low);
    }

    #[test]
    fn analysis_warns_about_missing_district_coordinates() {
        let dash = dashboard(&ScoringConfig::default(), None);
        let view = dash.analysis("Goa", None).unwrap();
        assert!(view.center.is_some());
        assert_eq!(view.warnings, vec!["Coordinates for Panaji were not found."]);
        let panaji = view.districts.iter().find(|d| d.district == "Panaji").unwrap();
        assert!(panaji.coordinates.is_none());
    }

    #[test]
    fn analysis_warns_once_when_state_coordinates_missing() {
        let dash = dashboard(&ScoringConfig::default(), None);
        let view = dash.analysis("Kerala", None).unwrap();
        assert!(view.center.is_none());
        assert_eq!(
            view.warnings,
            vec!["Coordinates for the selected state were not found."]
        );
        assert_eq!(view.districts.len(), 1);
    }

    #[test]
    fn analysis_respects_explicit_year() {
        let dash = dashboard(&ScoringConfig::default(), None);
        let view = dash.analysis("Goa", Some(2022)).unwrap();
        assert_eq!(view.year, Some(2022));
        let north = view.districts.iter().find(|d| d.district == "North Goa").unwrap();
        assert!((north.severity.value() - 4.55).abs() < 1e-9);
        let south = view.districts.iter().find(|d| d.district == "South Goa").unwrap();
        assert_eq!(south.total_incidents, 0);
    }

    #[test]
    fn analysis_rejects_unknown_state() {
        let dash = dashboard(&ScoringConfig::default(), None);
        let err = dash.analysis("Atlantis", None).unwrap_err();
        assert!(matches!(err, DashboardError::UnknownState(ref s) if s == "Atlantis"));
    }

    #[test]
    fn wide_thresholds_change_bands() {
        let scoring = ScoringConfig {
            thresholds: ThresholdConfig::Custom(BandThresholds::WIDE),
            ..ScoringConfig::default()
        };
        let dash = dashboard(&scoring, None);
        let view = dash.analysis("Goa", None).unwrap();
        assert_eq!(view.districts[0].band, SeverityBand::Moderate);

        let strict = ScoringConfig {
            thresholds: ThresholdConfig::Custom(BandThresholds {
                low_below: 5.0,
                moderate_max: 50.0,
                moderate_inclusive: true,
            }),
            ..ScoringConfig::default()
        };
        let view = dashboard(&strict, None).analysis("Goa", None).unwrap();
        assert_eq!(view.districts[0].band, SeverityBand::High);
    }

    #[test]
    fn dataset_max_policy_scales_to_largest_row() {
        let scoring = ScoringConfig {
            normalizer: NormalizerPolicy::DatasetMax,
            ..ScoringConfig::default()
        };
        let dash = dashboard(&scoring, None);
        let view = dash.analysis("Goa", None).unwrap();
        assert!((view.districts[0].severity.value() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn detail_builds_trend_and_breakdown() {
        let dash = dashboard(&ScoringConfig::default(), None);
        let view = dash.detail("GOA", "north goa", None).unwrap();
        assert_eq!(view.district, "North Goa");
        assert_eq!(view.year, Some(2023));
        assert_eq!(view.trend.len(), 2);
        assert_eq!(view.trend[0].year, 2022);
        assert!((view.trend[0].severity.value() - 4.55).abs() < 1e-9);
        assert!((view.severity.value() - 9.09).abs() < 1e-9);

        let murder = view
            .categories
            .iter()
            .find(|c| c.category == CrimeCategory::Murder)
            .unwrap();
        assert_eq!(murder.count, 200);
        assert_eq!(murder.weighted, 1000);
        assert_eq!(view.categories.len(), CrimeCategory::all().len());

        assert!(!view.recommendations.advice.is_empty());
        assert!(view.recommendations.headline.contains("low"));
    }

    #[test]
    fn detail_uses_pinned_year() {
        let dash = dashboard(&ScoringConfig::default(), Some(2022));
        let view = dash.detail("Goa", "North Goa", None).unwrap();
        assert_eq!(view.year, Some(2022));
        assert!((view.severity.value() - 4.55).abs() < 1e-9);
    }

    #[test]
    fn detail_defaults_to_state_analysis_year() {
        let murder = |n| CategoryCounts::default().with(CrimeCategory::Murder, n);
        let dataset = Dataset::new(vec![
            record("Goa", "North Goa", 2022, murder(300)),
            record("Goa", "South Goa", 2023, murder(10)),
        ]);
        let dash = Dashboard::new(
            dataset,
            Locations::default(),
            &ScoringConfig::default(),
            None,
        );

        let analysis = dash.analysis("Goa", None).unwrap();
        let north = analysis
            .districts
            .iter()
            .find(|d| d.district == "North Goa")
            .unwrap();
        assert_eq!(north.total_incidents, 0);

        let detail = dash.detail("Goa", "North Goa", None).unwrap();
        assert_eq!(detail.year, analysis.year);
        assert_eq!(detail.severity, north.severity);
        assert_eq!(detail.band, north.band);
        assert_eq!(detail.trend.len(), 1);
        assert_eq!(detail.trend[0].year, 2022);
    }

    #[test]
    fn loaded_tables_join_across_name_casing() {
        use crime_index_dataset::load::{read_incidents, read_locations};
        use crime_index_dataset::progress::null_progress;

        let incidents = "\
STATE/UT,DISTRICT,YEAR,MURDER,RAPE,KIDNAPPING & ABDUCTION,ROBBERY,BURGLARY,DOWRY DEATHS
TAMIL NADU,CHENNAI,2023,100,0,0,0,0,0
TAMIL NADU,MADURAI,2023,20,0,0,0,0,0
";
        let locations = "\
State,District,Latitude,Longitude
Tamil Nadu,Chennai,13.08,80.27
tamil nadu,madurai,9.93,78.12
";
        let dash = Dashboard::new(
            Dataset::new(read_incidents(incidents.as_bytes(), &null_progress()).unwrap()),
            Locations::new(read_locations(locations.as_bytes(), &null_progress()).unwrap()),
            &ScoringConfig::default(),
            None,
        );

        let view = dash.analysis("tamil nadu", None).unwrap();
        assert_eq!(view.state, "Tamil Nadu");
        assert!(view.center.is_some());
        assert!(view.warnings.is_empty(), "{:?}", view.warnings);
        assert!(view.districts.iter().all(|d| d.coordinates.is_some()));
        assert_eq!(view.districts[0].district, "Chennai");
    }

    #[test]
    fn detail_rejects_unknown_district() {
        let dash = dashboard(&ScoringConfig::default(), None);
        let err = dash.detail("Goa", "Kollam", None).unwrap_err();
        assert!(matches!(err, DashboardError::UnknownDistrict { .. }));
    }

    #[test]
    fn categories_report_weights() {
        let dash = dashboard(&ScoringConfig::default(), None);
        let cats = dash.categories();
        assert_eq!(cats.len(), 6);
        assert_eq!(cats[0].category, CrimeCategory::Murder);
        assert_eq!(cats[0].weight, 5);
        assert_eq!(cats[2].column, "kidnapping & abduction");
    }
}
