//! CSV readers for the incident and coordinate tables.
//!
//! Header lookup is case-insensitive and whitespace-trimmed. Region
//! names are normalized with [`title_case`] as rows are read.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crime_index_crime_models::{CategoryCounts, CrimeCategory, IncidentRecord, LocationRecord};

use crate::DatasetError;
use crate::normalize::title_case;
use crate::progress::ProgressCallback;

/// Incident table column holding the state / union territory.
pub const STATE_COLUMN: &str = "state/ut";
/// Incident table column holding the district.
pub const DISTRICT_COLUMN: &str = "district";
/// Incident table column holding the reporting year.
pub const YEAR_COLUMN: &str = "year";

/// Coordinate table column holding the state.
pub const LOCATION_STATE_COLUMN: &str = "state";
/// Coordinate table column holding the district.
pub const LOCATION_DISTRICT_COLUMN: &str = "district";
/// Coordinate table column holding the latitude.
pub const LATITUDE_COLUMN: &str = "latitude";
/// Coordinate table column holding the longitude.
pub const LONGITUDE_COLUMN: &str = "longitude";

/// Resolved column positions for the incident table.
struct IncidentColumns {
    state: usize,
    district: usize,
    year: usize,
    categories: Vec<(CrimeCategory, usize)>,
}

impl IncidentColumns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, DatasetError> {
        let categories = CrimeCategory::all()
            .iter()
            .map(|cat| Ok((*cat, find_column(headers, cat.column_name())?)))
            .collect::<Result<Vec<_>, DatasetError>>()?;

        Ok(Self {
            state: find_column(headers, STATE_COLUMN)?,
            district: find_column(headers, DISTRICT_COLUMN)?,
            year: find_column(headers, YEAR_COLUMN)?,
            categories,
        })
    }
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize, DatasetError> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| DatasetError::MissingColumn {
            column: name.to_string(),
        })
}

/// Line in the source file where `record` starts. Quoted cells may span
/// several lines, so this can run ahead of the record count.
fn source_line(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, csv::Position::line)
}

fn field<'a>(record: &'a csv::StringRecord, idx: usize) -> &'a str {
    record.get(idx).unwrap_or("").trim()
}

/// Parses a non-negative count. Empty cells count as zero; integral
/// floats such as `"12.0"` are accepted.
fn parse_count(raw: &str, row: u64, column: &str) -> Result<u64, DatasetError> {
    if raw.is_empty() {
        return Ok(0);
    }
    if let Ok(v) = raw.parse::<u64>() {
        return Ok(v);
    }
    match raw.parse::<f64>() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 => Ok(v as u64),
        _ => Err(DatasetError::InvalidValue {
            row,
            column: column.to_string(),
            value: raw.to_string(),
        }),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn parse_year(raw: &str, row: u64) -> Result<i32, DatasetError> {
    raw.parse::<i32>()
        .ok()
        .or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.fract() == 0.0 && v.abs() < 10_000.0)
                .map(|v| v as i32)
        })
        .ok_or_else(|| DatasetError::InvalidValue {
            row,
            column: YEAR_COLUMN.to_string(),
            value: raw.to_string(),
        })
}

fn parse_coordinate(raw: &str, row: u64, column: &str) -> Result<f64, DatasetError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DatasetError::InvalidValue {
            row,
            column: column.to_string(),
            value: raw.to_string(),
        })
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input)
}

/// Reads incident rows from any CSV source.
///
/// # Errors
///
/// Returns [`DatasetError`] if a required column is missing or a cell
/// cannot be parsed.
pub fn read_incidents<R: Read>(
    input: R,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Vec<IncidentRecord>, DatasetError> {
    let mut rdr = reader(input);
    let columns = IncidentColumns::resolve(rdr.headers()?)?;

    let mut records = Vec::new();
    let mut record = csv::StringRecord::new();

    while rdr.read_record(&mut record)? {
        let row = source_line(&record);

        let state = field(&record, columns.state);
        let district = field(&record, columns.district);
        if state.is_empty() || district.is_empty() {
            log::debug!("Skipping row {row}: empty state or district");
            continue;
        }

        let mut counts = CategoryCounts::default();
        for (cat, idx) in &columns.categories {
            *counts.get_mut(*cat) = parse_count(field(&record, *idx), row, cat.column_name())?;
        }

        records.push(IncidentRecord {
            state: title_case(state),
            district: title_case(district),
            year: parse_year(field(&record, columns.year), row)?,
            counts,
        });
        progress.inc(1);
    }

    progress.finish(format!("Loaded {} incident rows", records.len()));
    Ok(records)
}

/// Reads coordinate rows from any CSV source.
///
/// # Errors
///
/// Returns [`DatasetError`] if a required column is missing or a
/// coordinate cannot be parsed.
pub fn read_locations<R: Read>(
    input: R,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Vec<LocationRecord>, DatasetError> {
    let mut rdr = reader(input);
    let headers = rdr.headers()?;
    let state_idx = find_column(headers, LOCATION_STATE_COLUMN)?;
    let district_idx = find_column(headers, LOCATION_DISTRICT_COLUMN)?;
    let lat_idx = find_column(headers, LATITUDE_COLUMN)?;
    let lon_idx = find_column(headers, LONGITUDE_COLUMN)?;

    let mut records = Vec::new();
    let mut record = csv::StringRecord::new();

    while rdr.read_record(&mut record)? {
        let row = source_line(&record);

        let state = field(&record, state_idx);
        if state.is_empty() {
            log::debug!("Skipping location row {row}: empty state");
            continue;
        }

        records.push(LocationRecord {
            state: title_case(state),
            district: title_case(field(&record, district_idx)),
            latitude: parse_coordinate(field(&record, lat_idx), row, LATITUDE_COLUMN)?,
            longitude: parse_coordinate(field(&record, lon_idx), row, LONGITUDE_COLUMN)?,
        });
        progress.inc(1);
    }

    progress.finish(format!("Loaded {} location rows", records.len()));
    Ok(records)
}

/// Loads the incident table from a CSV file.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be opened or parsed.
pub fn load_incidents(
    path: &Path,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Vec<IncidentRecord>, DatasetError> {
    log::info!("Loading incident data from {}", path.display());
    progress.set_message(format!("Reading {}", path.display()));
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_incidents(file, progress)
}

/// Loads the coordinate table from a CSV file.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be opened or parsed.
pub fn load_locations(
    path: &Path,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Vec<LocationRecord>, DatasetError> {
    log::info!("Loading location data from {}", path.display());
    progress.set_message(format!("Reading {}", path.display()));
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_locations(file, progress)
}
