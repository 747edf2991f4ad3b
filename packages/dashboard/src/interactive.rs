//! Interactive terminal dashboard.
//!
//! Walks the [`Page`] state machine with `dialoguer` menus: pick a state,
//! inspect its district severity table, drill into a district, and export
//! the severity map along the way.

use std::path::PathBuf;

use crime_index_dashboard_models::{Page, PageAction};
use dialoguer::{Input, Select};

use crate::{Dashboard, DashboardError, map, render};

/// Actions offered on the analysis page.
enum AnalysisAction {
    ViewDistrict,
    ExportMap,
    Home,
    Quit,
}

impl AnalysisAction {
    const ALL: &[Self] = &[Self::ViewDistrict, Self::ExportMap, Self::Home, Self::Quit];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::ViewDistrict => "View district details",
            Self::ExportMap => "Export severity map (GeoJSON)",
            Self::Home => "Choose another state",
            Self::Quit => "Quit",
        }
    }
}

/// Actions offered on the district detail page.
enum DetailAction {
    Back,
    Home,
    Quit,
}

impl DetailAction {
    const ALL: &[Self] = &[Self::Back, Self::Home, Self::Quit];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Back => "Back to state analysis",
            Self::Home => "Choose another state",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the interactive dashboard until the user quits.
///
/// # Errors
///
/// Returns [`DashboardError`] if a prompt fails, a view cannot be built,
/// or a map export fails.
pub fn run(dashboard: &Dashboard) -> Result<(), DashboardError> {
    let mut page = Page::default();

    loop {
        println!();
        let action = match &page {
            Page::SelectRegion => select_region(dashboard)?,
            Page::ShowAnalysis { state } => show_analysis(dashboard, state)?,
            Page::ShowDetail { state, district } => show_detail(dashboard, state, district)?,
        };

        let Some(action) = action else {
            break;
        };
        log::debug!("{page:?} -> {action:?}");
        page = page.next(action);
    }

    Ok(())
}

fn select_region(dashboard: &Dashboard) -> Result<Option<PageAction>, DashboardError> {
    println!("{}", Page::SelectRegion.title());
    println!();

    let states = dashboard.states();
    if states.is_empty() {
        println!("No states found in the crime data.");
        return Ok(None);
    }

    let mut labels: Vec<&str> = states.clone();
    labels.push("Quit");

    let idx = Select::new()
        .with_prompt("Select a state")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(states.get(idx).map(|state| PageAction::SelectState {
        state: (*state).to_string(),
    }))
}

fn show_analysis(dashboard: &Dashboard, state: &str) -> Result<Option<PageAction>, DashboardError> {
    let view = dashboard.analysis(state, None)?;
    print!("{}", render::render_analysis(&view));
    println!();

    let labels: Vec<&str> = AnalysisAction::ALL
        .iter()
        .map(AnalysisAction::label)
        .collect();

    loop {
        let idx = Select::new()
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact()?;

        match AnalysisAction::ALL[idx] {
            AnalysisAction::ViewDistrict => {
                if view.districts.is_empty() {
                    println!("No districts recorded for {state}.");
                    continue;
                }
                let mut names: Vec<&str> =
                    view.districts.iter().map(|d| d.district.as_str()).collect();
                names.push("Cancel");

                let pick = Select::new()
                    .with_prompt("Select a district")
                    .items(&names)
                    .default(0)
                    .interact()?;

                if let Some(row) = view.districts.get(pick) {
                    return Ok(Some(PageAction::SelectDistrict {
                        district: row.district.clone(),
                    }));
                }
            }
            AnalysisAction::ExportMap => {
                let default = map::default_map_path(&view.state);
                let path: String = Input::new()
                    .with_prompt("Output file")
                    .default(default.display().to_string())
                    .interact_text()?;
                let path = PathBuf::from(path);

                if map::write_severity_map(&view, &path)? {
                    println!("Map written to {}", path.display());
                } else {
                    println!("Coordinates for the selected state were not found.");
                }
            }
            AnalysisAction::Home => return Ok(Some(PageAction::Home)),
            AnalysisAction::Quit => return Ok(None),
        }
    }
}

fn show_detail(
    dashboard: &Dashboard,
    state: &str,
    district: &str,
) -> Result<Option<PageAction>, DashboardError> {
    let view = dashboard.detail(state, district, None)?;
    print!("{}", render::render_detail(&view));
    println!();

    let labels: Vec<&str> = DetailAction::ALL.iter().map(DetailAction::label).collect();

    let idx = Select::new()
        .with_prompt("What next?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(match DetailAction::ALL[idx] {
        DetailAction::Back => Some(PageAction::Back),
        DetailAction::Home => Some(PageAction::Home),
        DetailAction::Quit => None,
    })
}
