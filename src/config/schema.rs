//! Configuration schema definitions.
//!
//! This module defines the mapping document structure shared by the JSON,
//! YAML and TOML loaders. The XML loader deserializes its own element layout
//! and converts into these types.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Root of a URL mapping document.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct MappingConfig {
    /// Label used in log output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// What forward mapping writes for a placeholder with no value.
    pub missing_value: MissingValue,

    /// Map entries in priority order.
    pub maps: Vec<MapEntryConfig>,
}

/// One configured mapping entry.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct MapEntryConfig {
    /// Regular expression with named placeholders, e.g. `/posts/(?<id>\d+)`.
    pub pattern: String,

    /// Parameters implied by a match on this entry.
    #[serde(
        default,
        alias = "implicit-parameters",
        deserialize_with = "scalar_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub implicit: IndexMap<String, String>,

    /// Parameters forced after reverse extraction.
    #[serde(
        default,
        rename = "override",
        alias = "override-parameters",
        deserialize_with = "scalar_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub overrides: IndexMap<String, String>,

    /// Parameters dropped in both directions. Values are informational.
    #[serde(
        default,
        alias = "ignore-parameters",
        deserialize_with = "scalar_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub ignore: IndexMap<String, String>,
}

/// Parameter value as written in the document. Unquoted numbers and
/// booleans are kept as their text form.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    String(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::String(s) => s,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn scalar_map<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, Scalar>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(key, value)| (key, value.into())).collect())
}

/// Substitution for a forward-mapping placeholder that has no value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingValue {
    /// Substitute an empty string.
    #[default]
    Empty,
    /// Substitute the text `null`.
    Null,
}
