//! Pipeline configuration.
//!
//! The [`Default`] impls are the built-in configuration. A user file passed
//! with `--config` overrides it; omitted tables and keys keep their
//! defaults. Command-line flags are applied last. `--print-config` writes
//! the defaults out as a starting file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vigilance_map_spatial::sampling::SamplingConfig;

const DEFAULT_REGIONS: &str = "https://france-geojson.gregoiredavid.fr/repo/regions.geojson";
const DEFAULT_FORECAST: &str = "http://storage.gra.cloud.ovh.net/v1/AUTH_555bdc85997f4552914346d4550c421e/gra-vigi6-archive_public/2023/06/15/140214/CDP_CARTE_EXTERNE.json";

/// Errors from loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading the file.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// File that failed to read.
        path: PathBuf,
        source: std::io::Error,
    },

    /// TOML parsing failed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed.
    #[error("TOML error: {0}")]
    TomlWrite(#[from] toml::ser::Error),
}

/// Full pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub sampling: SamplingConfig,
    pub sources: SourcesConfig,
    pub output: OutputConfig,
}

/// Where the boundary and forecast documents come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// URL or local path of the region `GeoJSON`.
    pub regions: String,
    /// URL or local path of the vigilance document.
    pub forecast: String,
    /// Feature property holding the region code.
    pub region_id_property: String,
    /// Feature property holding the region name.
    pub region_name_property: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            regions: DEFAULT_REGIONS.to_string(),
            forecast: DEFAULT_FORECAST.to_string(),
            region_id_property: "code".to_string(),
            region_name_property: "nom".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving `map_J{n}.geojson` / `.html`.
    pub directory: PathBuf,
    /// Write map files at all.
    pub render: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("maps"),
            render: true,
        }
    }
}

impl PipelineConfig {
    /// Renders this configuration as a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TomlWrite`] if a value cannot be represented.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the document is not valid TOML or
    /// has values of the wrong type.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printed_defaults_read_back_unchanged() {
        let text = PipelineConfig::default().to_toml().unwrap();
        assert!(text.contains("[sources]"));
        assert!(text.contains(DEFAULT_REGIONS));
        assert_eq!(
            PipelineConfig::from_toml(&text).unwrap(),
            PipelineConfig::default()
        );
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(PipelineConfig::from_toml("").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = PipelineConfig::from_toml(
            r#"
            [sampling]
            count = 50

            [output]
            render = false
            "#,
        )
        .unwrap();

        assert_eq!(config.sampling.count, 50);
        assert_eq!(config.sampling.seed, 42);
        assert!(!config.output.render);
        assert_eq!(config.output.directory, PathBuf::from("maps"));
        assert_eq!(config.sources, SourcesConfig::default());
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(matches!(
            PipelineConfig::from_toml("[sampling]\ncount = \"many\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = PipelineConfig::load(Path::new("/nonexistent/vigilance.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/vigilance.toml"));
    }
}
