#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone API server for the crime severity dashboard.
//!
//! Reads `crime_index.toml` (or `CRIME_INDEX_CONFIG`), loads both CSVs,
//! and serves on `BIND_ADDR:PORT`.

use std::sync::Arc;

use crime_index_cli_utils::IndicatifProgress;
use crime_index_dashboard::Dashboard;
use crime_index_dashboard::config::DashboardConfig;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = crime_index_cli_utils::init_logger();

    let config = DashboardConfig::load(None)?;
    let dashboard = Dashboard::load(
        &config,
        &IndicatifProgress::records_bar(&multi, "Reading crime data"),
        &IndicatifProgress::records_bar(&multi, "Reading coordinates"),
    )?;

    let (bind_addr, port) = crime_index_server::bind_from_env();
    crime_index_server::run_server(Arc::new(dashboard), bind_addr, port).await?;

    Ok(())
}
