//! Plain-text rendering of dashboard views.
//!
//! Produces fixed-width tables and horizontal bar charts suitable for a
//! terminal. Every function returns a `String` so the output can be
//! printed, logged, or asserted on.

use std::fmt::Write as _;

use crime_index_dashboard_models::{AnalysisView, DetailView};
use crime_index_severity_models::SeverityBand;

/// Width of the longest bar in a chart, in characters.
pub const BAR_WIDTH: usize = 40;

const BAR_CHAR: char = '█';

fn band_marker(band: SeverityBand) -> &'static str {
    match band {
        SeverityBand::Low => "[LOW]",
        SeverityBand::Moderate => "[MODERATE]",
        SeverityBand::High => "[HIGH]",
    }
}

fn heading(out: &mut String, title: &str) {
    writeln!(out, "{title}").unwrap();
    writeln!(out, "{}", "=".repeat(title.chars().count())).unwrap();
}

/// Renders a bar proportional to `value / max`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * width as f64).round() as usize;
    std::iter::repeat_n(BAR_CHAR, len.clamp(1, width)).collect()
}

/// Renders the list of states as a numbered menu.
///
/// # Panics
///
/// Never: writes go to an in-memory `String`.
#[must_use]
pub fn render_states(states: &[&str]) -> String {
    let mut out = String::new();
    heading(&mut out, "States / Union Territories");
    for (i, state) in states.iter().enumerate() {
        writeln!(out, "{:>3}. {state}", i + 1).unwrap();
    }
    out
}

/// Renders the per-state analysis page: warnings, the district table,
/// and a bar chart of district severities.
///
/// # Panics
///
/// Never: writes go to an in-memory `String`.
#[must_use]
pub fn render_analysis(view: &AnalysisView) -> String {
    let mut out = String::new();
    let title = view.year.map_or_else(
        || format!("Crime Severity Index for Districts in {}", view.state),
        |y| format!("Crime Severity Index for Districts in {} ({y})", view.state),
    );
    heading(&mut out, &title);
    writeln!(
        out,
        "State severity: {} {}",
        view.state_severity,
        band_marker(view.state_band)
    )
    .unwrap();

    for warning in &view.warnings {
        writeln!(out, "warning: {warning}").unwrap();
    }
    out.push('\n');

    let name_width = view
        .districts
        .iter()
        .map(|d| d.district.chars().count())
        .max()
        .unwrap_or(0)
        .max("District".len());

    writeln!(
        out,
        "{:<name_width$}  {:>8}  {:<10}  {:>10}",
        "District", "Severity", "Band", "Incidents"
    )
    .unwrap();
    writeln!(out, "{}", "-".repeat(name_width + 36)).unwrap();
    for row in &view.districts {
        writeln!(
            out,
            "{:<name_width$}  {:>8}  {:<10}  {:>10}",
            row.district,
            row.severity.to_string(),
            row.band.label(),
            row.total_incidents
        )
        .unwrap();
    }

    if view.districts.iter().any(|d| d.severity.value() > 0.0) {
        out.push('\n');
        heading(&mut out, "Severity by District");
        let max = view
            .districts
            .iter()
            .map(|d| d.severity.value())
            .fold(0.0, f64::max);
        for row in &view.districts {
            writeln!(
                out,
                "{:<name_width$}  {} {}",
                row.district,
                bar(row.severity.value(), max, BAR_WIDTH),
                row.severity
            )
            .unwrap();
        }
    }

    out
}

/// Renders the per-district detail page: headline severity, category
/// breakdown chart, year-over-year trend, and recommendations.
///
/// # Panics
///
/// Never: writes go to an in-memory `String`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn render_detail(view: &DetailView) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("{}, {}", view.district, view.state));
    let year = view
        .year
        .map_or_else(|| "all years".to_string(), |y| y.to_string());
    writeln!(
        out,
        "Severity ({year}): {} {}",
        view.severity,
        band_marker(view.band)
    )
    .unwrap();
    out.push('\n');

    heading(&mut out, "Incidents by Category");
    let label_width = view
        .categories
        .iter()
        .map(|c| c.label.chars().count())
        .max()
        .unwrap_or(0);
    let max = view.categories.iter().map(|c| c.count).max().unwrap_or(0) as f64;
    for cat in &view.categories {
        writeln!(
            out,
            "{:<label_width$}  {:>6} x{}  {}",
            cat.label,
            cat.count,
            cat.weight,
            bar(cat.count as f64, max, BAR_WIDTH)
        )
        .unwrap();
    }
    out.push('\n');

    if !view.trend.is_empty() {
        heading(&mut out, "Severity Trend");
        let max = view
            .trend
            .iter()
            .map(|p| p.severity.value())
            .fold(0.0, f64::max);
        for point in &view.trend {
            writeln!(
                out,
                "{}  {:>6}  {:<10}  {}",
                point.year,
                point.severity.to_string(),
                point.band.label(),
                bar(point.severity.value(), max, BAR_WIDTH)
            )
            .unwrap();
        }
        out.push('\n');
    }

    heading(&mut out, "Safety Recommendations");
    writeln!(out, "{}", view.recommendations.headline).unwrap();
    for line in &view.recommendations.advice {
        writeln!(out, "  - {line}").unwrap();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crime_index_crime_models::CrimeCategory;
    use crime_index_dashboard_models::{
        CategoryBreakdown, DistrictSeverity, RecommendationView, TrendPoint,
    };
    use crime_index_severity_models::SeverityIndex;

    #[test]
    fn bar_scales_and_clamps() {
        assert_eq!(bar(10.0, 10.0, 20).chars().count(), 20);
        assert_eq!(bar(5.0, 10.0, 20).chars().count(), 10);
        assert_eq!(bar(0.01, 10.0, 20).chars().count(), 1);
        assert!(bar(0.0, 10.0, 20).is_empty());
        assert!(bar(3.0, 0.0, 20).is_empty());
    }

    #[test]
    fn renders_states_menu() {
        let out = render_states(&["Goa", "Kerala"]);
        assert!(out.contains("  1. Goa"));
        assert!(out.contains("  2. Kerala"));
    }

    #[test]
    fn renders_analysis_table_and_warnings() {
        let view = AnalysisView {
            state: "Goa".to_string(),
            year: Some(2023),
            state_severity: SeverityIndex::from_raw(20.0),
            state_band: SeverityBand::Low,
            center: None,
            districts: vec![DistrictSeverity {
                district: "North Goa".to_string(),
                severity: SeverityIndex::from_raw(12.5),
                band: SeverityBand::Low,
                total_incidents: 120,
                coordinates: None,
            }],
            warnings: vec!["Coordinates for the selected state were not found.".to_string()],
        };
        let out = render_analysis(&view);
        assert!(out.starts_with("Crime Severity Index for Districts in Goa (2023)\n"));
        assert!(out.contains("warning: Coordinates for the selected state were not found."));
        assert!(out.contains("North Goa     12.50  Low"));
        assert!(out.contains("Severity by District"));
    }

    #[test]
    fn renders_detail_sections() {
        let view = DetailView {
            state: "Goa".to_string(),
            district: "North Goa".to_string(),
            year: Some(2023),
            severity: SeverityIndex::from_raw(60.0),
            band: SeverityBand::High,
            categories: vec![CategoryBreakdown {
                category: CrimeCategory::Murder,
                label: "Murder".to_string(),
                count: 12,
                weight: 5,
                weighted: 60,
            }],
            trend: vec![TrendPoint {
                year: 2023,
                severity: SeverityIndex::from_raw(60.0),
                band: SeverityBand::High,
                total_incidents: 12,
            }],
            recommendations: RecommendationView {
                headline: "Crime levels are high.".to_string(),
                advice: vec!["Stay safe.".to_string()],
            },
        };
        let out = render_detail(&view);
        assert!(out.contains("Severity (2023): 60.00 [HIGH]"));
        assert!(out.contains("Incidents by Category"));
        assert!(out.contains("Severity Trend"));
        assert!(out.contains("  - Stay safe."));
    }
}
