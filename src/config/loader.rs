//! Configuration loading from disk.
//!
//! The document format is chosen by file extension: `.xml`, `.yml`/`.yaml`,
//! `.json` or `.toml`. All formats produce the same [`MappingConfig`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::config::schema::{MapEntryConfig, MappingConfig, MissingValue};
use crate::config::validation::{validate_config, ValidationError};
use crate::mapping::RuleSet;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Parse error (json): {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error (yaml): {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Parse error (toml): {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Parse error (xml): {0}")]
    Xml(#[from] quick_xml::de::DeError),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Xml,
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// Select the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("xml") => Ok(ConfigFormat::Xml),
            Some("yml") | Some("yaml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigFormat::Xml => "xml",
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Json => "json",
            ConfigFormat::Toml => "toml",
        };
        f.write_str(name)
    }
}

/// Parse a document without validating it.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<MappingConfig, ConfigError> {
    let config: MappingConfig = match format {
        ConfigFormat::Json => serde_json::from_str(content)?,
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        ConfigFormat::Toml => toml::from_str(content)?,
        ConfigFormat::Xml => quick_xml::de::from_str::<XmlMappingDocument>(content)?.into(),
    };
    Ok(config)
}

fn read_config(path: &Path) -> Result<MappingConfig, ConfigError> {
    let format = ConfigFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content, format)
}

/// Load and validate a mapping document.
pub fn load_config(path: &Path) -> Result<MappingConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load a mapping document and compile it into a [`RuleSet`].
pub fn load_rule_set(path: &Path) -> Result<RuleSet, ConfigError> {
    let config = read_config(path)?;
    let patterns = validate_config(&config).map_err(ConfigError::Validation)?;
    let rule_set = RuleSet::from_validated(&config, patterns);

    tracing::info!(
        path = %path.display(),
        name = ?rule_set.name(),
        mappings = rule_set.len(),
        "Loaded url mappings"
    );
    Ok(rule_set)
}

/// `<url-mapping name=".." missing-value="..">` with `<map>` children.
#[derive(Debug, Deserialize)]
struct XmlMappingDocument {
    #[serde(rename = "@name", default)]
    name: Option<String>,
    #[serde(rename = "@missing-value", default)]
    missing_value: MissingValue,
    #[serde(rename = "map", default)]
    maps: Vec<XmlMapEntry>,
}

#[derive(Debug, Deserialize)]
struct XmlMapEntry {
    pattern: String,
    #[serde(rename = "implicit-parameters", default)]
    implicit: XmlParameters,
    #[serde(rename = "override-parameters", default)]
    overrides: XmlParameters,
    #[serde(rename = "ignore-parameters", default)]
    ignore: XmlParameters,
}

#[derive(Debug, Default, Deserialize)]
struct XmlParameters {
    #[serde(rename = "parameter", default)]
    parameters: Vec<XmlParameter>,
}

/// `<parameter key="k">v</parameter>`
#[derive(Debug, Deserialize)]
struct XmlParameter {
    #[serde(rename = "@key")]
    key: String,
    #[serde(rename = "$text", default)]
    value: String,
}

impl From<XmlParameters> for IndexMap<String, String> {
    fn from(params: XmlParameters) -> Self {
        params
            .parameters
            .into_iter()
            .map(|p| (p.key, p.value))
            .collect()
    }
}

impl From<XmlMappingDocument> for MappingConfig {
    fn from(doc: XmlMappingDocument) -> Self {
        Self {
            name: doc.name,
            missing_value: doc.missing_value,
            maps: doc
                .maps
                .into_iter()
                .map(|m| MapEntryConfig {
                    pattern: m.pattern,
                    implicit: m.implicit.into(),
                    overrides: m.overrides.into(),
                    ignore: m.ignore.into(),
                })
                .collect(),
        }
    }
}
