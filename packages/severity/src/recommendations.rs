//! Canned safety recommendations keyed by [`SeverityBand`].
//!
//! The general advice depends only on the band. On top of that, the
//! category contributing most to the weighted sum adds one targeted tip.

use crime_index_crime_models::CrimeCategory;
use crime_index_severity_models::SeverityBand;
use serde::Serialize;

use crate::scorer::ScoredSlice;

/// Recommendations for a scored slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    /// Band the advice was chosen for.
    pub band: SeverityBand,
    /// One-line summary.
    pub headline: &'static str,
    /// General advice for the band.
    pub general: &'static [&'static str],
    /// Advice targeting the dominant category, if any.
    pub focus: Option<&'static str>,
}

impl Recommendations {
    /// Iterates every line of advice, general first.
    pub fn lines(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.general.iter().copied().chain(self.focus)
    }
}

/// Builds recommendations for a band and optional dominant category.
#[must_use]
pub const fn recommend(band: SeverityBand, dominant: Option<CrimeCategory>) -> Recommendations {
    Recommendations {
        band,
        headline: headline(band),
        general: general(band),
        focus: match dominant {
            Some(cat) => Some(focus(cat)),
            None => None,
        },
    }
}

/// Builds recommendations for a [`ScoredSlice`].
#[must_use]
pub const fn for_slice(slice: &ScoredSlice) -> Recommendations {
    recommend(slice.band, slice.dominant)
}

const fn headline(band: SeverityBand) -> &'static str {
    match band {
        SeverityBand::Low => "Crime levels are low. Standard precautions are sufficient.",
        SeverityBand::Moderate => "Crime levels are moderate. Stay alert and plan ahead.",
        SeverityBand::High => "Crime levels are high. Exercise heightened caution.",
    }
}

const fn general(band: SeverityBand) -> &'static [&'static str] {
    match band {
        SeverityBand::Low => &[
            "Keep doors and windows locked when away from home.",
            "Stay aware of your surroundings in crowded places.",
            "Save local emergency numbers on your phone.",
        ],
        SeverityBand::Moderate => &[
            "Avoid poorly lit or isolated areas after dark.",
            "Travel in groups where possible and share your live location.",
            "Keep valuables out of sight in public and in vehicles.",
            "Register with neighbourhood watch or community safety groups.",
        ],
        SeverityBand::High => &[
            "Avoid travelling alone at night and prefer registered transport.",
            "Install secure locks, lighting, and if possible CCTV at home.",
            "Keep emergency contacts and the nearest police station on hand.",
            "Report suspicious activity to local police immediately.",
            "Coordinate with local authorities and community groups on safety measures.",
        ],
    }
}

const fn focus(category: CrimeCategory) -> &'static str {
    match category {
        CrimeCategory::Murder => {
            "Violent crime drives this score: avoid confrontations and known hotspots."
        }
        CrimeCategory::Rape => {
            "Sexual violence is prominent: use women's helplines and trusted escorts when travelling."
        }
        CrimeCategory::KidnappingAbduction => {
            "Abductions are prominent: supervise children and verify anyone offering transport."
        }
        CrimeCategory::Robbery => {
            "Robbery is prominent: carry minimal cash and avoid displaying phones or jewellery."
        }
        CrimeCategory::Burglary => {
            "Burglary is prominent: reinforce entry points and keep the home lit when away."
        }
        CrimeCategory::DowryDeaths => {
            "Dowry-related deaths are prominent: report harassment to the women's cell without delay."
        }
    }
}
