#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the crime severity dashboard.
//!
//! ```text
//! crime_index states
//! crime_index analyze --state "Tamil Nadu" [--year 2023] [--json]
//! crime_index detail --state "Tamil Nadu" --district Chennai [--json]
//! crime_index map --state "Tamil Nadu" [--output map.geojson]
//! crime_index serve [--bind 0.0.0.0] [--port 8080]
//! ```
//!
//! Running `crime_index` with no subcommand enters interactive mode.
//!
//! Uses `indicatif-log-bridge` (via [`crime_index_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and the loading spinners never fight for the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use crime_index_cli_utils::{IndicatifProgress, MultiProgress};
use crime_index_dashboard::config::DashboardConfig;
use crime_index_dashboard::{Dashboard, map, render};
use dialoguer::{Input, Select};

#[derive(Parser)]
#[command(
    name = "crime_index",
    about = "Crime severity index for Indian states and districts",
    version
)]
struct Cli {
    /// Config file (defaults to crime_index.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Incident CSV, overriding the config file
    #[arg(long, global = true)]
    crime_data: Option<PathBuf>,

    /// Coordinate CSV, overriding the config file
    #[arg(long, global = true)]
    location_data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every state and union territory in the crime data
    States,
    /// Severity of every district in a state
    Analyze {
        /// State or union territory
        #[arg(long)]
        state: String,
        /// Year to analyse (defaults to the latest year for the state)
        #[arg(long)]
        year: Option<i32>,
        /// Print the view as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Category breakdown, trend, and safety advice for a district
    Detail {
        /// State or union territory
        #[arg(long)]
        state: String,
        /// District within the state
        #[arg(long)]
        district: String,
        /// Year for the breakdown (defaults to the latest year for the state)
        #[arg(long)]
        year: Option<i32>,
        /// Print the view as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Export the district severity map of a state as GeoJSON
    Map {
        /// State or union territory
        #[arg(long)]
        state: String,
        /// Year to map (defaults to the latest year for the state)
        #[arg(long)]
        year: Option<i32>,
        /// Output file (defaults to <state>_severity_map.geojson)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Serve the dashboard as a JSON API
    Serve {
        /// Address to bind (defaults to BIND_ADDR or 127.0.0.1)
        #[arg(long)]
        bind: Option<String>,
        /// Port to bind (defaults to PORT or 8080)
        #[arg(long)]
        port: Option<u16>,
    },
}

/// Top-level tool selection for interactive mode.
enum Tool {
    Browse,
    ExportMap,
    Server,
}

impl Tool {
    const ALL: &[Self] = &[Self::Browse, Self::ExportMap, Self::Server];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Browse => "Browse dashboard",
            Self::ExportMap => "Export a state severity map",
            Self::Server => "Start server",
        }
    }
}

fn load_dashboard(cli: &Cli, multi: &MultiProgress) -> Result<Dashboard, Box<dyn std::error::Error>> {
    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(path) = &cli.crime_data {
        config.crime_data.clone_from(path);
    }
    if let Some(path) = &cli.location_data {
        config.location_data.clone_from(path);
    }

    let dashboard = Dashboard::load(
        &config,
        &IndicatifProgress::records_bar(multi, "Reading crime data"),
        &IndicatifProgress::records_bar(multi, "Reading coordinates"),
    )?;
    Ok(dashboard)
}

fn export_map(
    dashboard: &Dashboard,
    state: &str,
    year: Option<i32>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let view = dashboard.analysis(state, year)?;
    for warning in &view.warnings {
        log::warn!("{warning}");
    }

    let path = output.unwrap_or_else(|| map::default_map_path(&view.state));
    if map::write_severity_map(&view, &path)? {
        println!("Map written to {}", path.display());
    } else {
        eprintln!("Coordinates for the selected state were not found.");
    }
    Ok(())
}

fn serve(dashboard: Dashboard, bind: Option<String>, port: Option<u16>) -> std::io::Result<()> {
    let (env_addr, env_port) = crime_index_server::bind_from_env();
    let bind_addr = bind.unwrap_or(env_addr);
    let port = port.unwrap_or(env_port);

    actix_web::rt::System::new().block_on(crime_index_server::run_server(
        Arc::new(dashboard),
        bind_addr,
        port,
    ))
}

fn interactive(dashboard: Dashboard) -> Result<(), Box<dyn std::error::Error>> {
    println!("Crime Data Analysis & Safety Insights");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Browse => crime_index_dashboard::interactive::run(&dashboard)?,
        Tool::ExportMap => {
            let states = dashboard.states();
            if states.is_empty() {
                println!("No states found in the crime data.");
                return Ok(());
            }
            let pick = Select::new()
                .with_prompt("Select a state")
                .items(&states)
                .default(0)
                .interact()?;
            let state = states[pick];

            let output: String = Input::new()
                .with_prompt("Output file")
                .default(map::default_map_path(state).display().to_string())
                .interact_text()?;

            export_map(&dashboard, state, None, Some(PathBuf::from(output)))?;
        }
        Tool::Server => {
            actix_web::rt::System::new()
                .block_on(crime_index_server::interactive::run(Arc::new(dashboard)))?;
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let multi = crime_index_cli_utils::init_logger();

    let dashboard = load_dashboard(&cli, &multi)?;

    let Some(command) = cli.command else {
        return interactive(dashboard);
    };

    match command {
        Commands::States => {
            print!("{}", render::render_states(&dashboard.states()));
        }
        Commands::Analyze { state, year, json } => {
            let view = dashboard.analysis(&state, year)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render::render_analysis(&view));
            }
        }
        Commands::Detail {
            state,
            district,
            year,
            json,
        } => {
            let view = dashboard.detail(&state, &district, year)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render::render_detail(&view));
            }
        }
        Commands::Map {
            state,
            year,
            output,
        } => export_map(&dashboard, &state, year, output)?,
        Commands::Serve { bind, port } => serve(dashboard, bind, port)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_analyze_with_global_flags() {
        let cli = Cli::try_parse_from([
            "crime_index",
            "analyze",
            "--state",
            "Tamil Nadu",
            "--year",
            "2023",
            "--crime-data",
            "/tmp/crimes.csv",
        ])
        .unwrap();
        assert_eq!(cli.crime_data, Some(PathBuf::from("/tmp/crimes.csv")));
        assert!(matches!(
            cli.command,
            Some(Commands::Analyze { ref state, year: Some(2023), json: false }) if state == "Tamil Nadu"
        ));
    }

    #[test]
    fn no_subcommand_is_interactive() {
        let cli = Cli::try_parse_from(["crime_index"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn detail_requires_district() {
        assert!(Cli::try_parse_from(["crime_index", "detail", "--state", "Goa"]).is_err());
    }
}
