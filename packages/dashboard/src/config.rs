//! Dashboard configuration.
//!
//! Read from a TOML file (default `crime_index.toml`, or the path in
//! `CRIME_INDEX_CONFIG`). A missing default file is not an error: every
//! key has a default. `CRIME_DATA_PATH` and `LOCATION_DATA_PATH` override
//! the dataset paths after the file is read.
//!
//! ```toml
//! crime_data = "data/crime_data.csv"
//! location_data = "data/state_district_lat_long.csv"
//! year = 2023
//!
//! [scoring]
//! thresholds = "standard"
//!
//! [scoring.normalizer]
//! type = "fixed_ceiling"
//! ceiling = 500
//! ```

use std::path::{Path, PathBuf};

use crime_index_severity_models::{ScoringConfig, ScoringConfigError};
use serde::{Deserialize, Serialize};

/// Config file read when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "crime_index.toml";
/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "CRIME_INDEX_CONFIG";
/// Environment variable overriding [`DashboardConfig::crime_data`].
pub const CRIME_DATA_ENV: &str = "CRIME_DATA_PATH";
/// Environment variable overriding [`DashboardConfig::location_data`].
pub const LOCATION_DATA_ENV: &str = "LOCATION_DATA_PATH";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        /// Config path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`DashboardConfig`].
    #[error("Failed to parse config {}: {source}", .path.display())]
    Parse {
        /// Config path.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// Scoring parameters are invalid.
    #[error("Invalid scoring configuration: {0}")]
    Scoring(#[from] ScoringConfigError),
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DashboardConfig {
    /// Incident CSV path.
    pub crime_data: PathBuf,
    /// Coordinate CSV path.
    pub location_data: PathBuf,
    /// Year to analyse. `None` uses the latest year present for the
    /// selected state.
    pub year: Option<i32>,
    /// Scoring parameters.
    pub scoring: ScoringConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            crime_data: PathBuf::from("data/crime_data.csv"),
            location_data: PathBuf::from("data/state_district_lat_long.csv"),
            year: None,
            scoring: ScoringConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Parses configuration from a TOML string and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if parsing or validation fails.
    pub fn from_toml(toml_str: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.scoring.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`, or from `CRIME_INDEX_CONFIG`, or
    /// from [`DEFAULT_CONFIG_PATH`], then applies environment overrides.
    ///
    /// An explicitly named file must exist; the default file may be
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a named file is missing or any file
    /// fails to parse or validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::read(&path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::read(path)?
                } else {
                    log::debug!("No {DEFAULT_CONFIG_PATH} found, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env();
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Reading config from {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents, path)
    }

    fn apply_env(&mut self) {
        if let Some(path) = std::env::var_os(CRIME_DATA_ENV) {
            self.crime_data = PathBuf::from(path);
        }
        if let Some(path) = std::env::var_os(LOCATION_DATA_ENV) {
            self.location_data = PathBuf::from(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crime_index_severity_models::{BandThresholds, NormalizerPolicy};

    #[test]
    fn empty_file_uses_defaults() {
        let config = DashboardConfig::from_toml("", Path::new("test.toml")).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn parses_full_config() {
        let config = DashboardConfig::from_toml(
            r#"
            crime_data = "/tmp/crimes.csv"
            location_data = "/tmp/coords.csv"
            year = 2024

            [scoring]
            thresholds = "wide"

            [scoring.normalizer]
            type = "fixed_ceiling"
            ceiling = 1000
            "#,
            Path::new("test.toml"),
        )
        .unwrap();
        assert_eq!(config.crime_data, PathBuf::from("/tmp/crimes.csv"));
        assert_eq!(config.year, Some(2024));
        assert_eq!(
            config.scoring.normalizer,
            NormalizerPolicy::FixedCeiling { ceiling: 1000 }
        );
        assert_eq!(config.scoring.thresholds.resolve(), BandThresholds::WIDE);
    }

    #[test]
    fn rejects_zero_ceiling() {
        let err = DashboardConfig::from_toml(
            r#"
            [scoring.normalizer]
            type = "fixed_ceiling"
            ceiling = 0
            "#,
            Path::new("test.toml"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Scoring(ScoringConfigError::ZeroCeiling)
        ));
    }

    #[test]
    fn parse_error_names_file() {
        let err = DashboardConfig::from_toml("year = \"soon\"", Path::new("bad.toml")).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = DashboardConfig::load(Some(Path::new("/nonexistent/crime_index.toml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
