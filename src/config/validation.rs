//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Compile every pattern and check its placeholders
//! - Reject empty parameter keys
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MappingConfig → Result<Vec<IndexedPattern>, Vec<ValidationError>>
//! - The indexed patterns are handed on to rule construction, so every
//!   pattern is compiled once
//! - Runs before config is accepted into the system
//! - Rule shadowing is not checked; unreachable entries are allowed

use thiserror::Error;

use crate::config::schema::MappingConfig;
use crate::mapping::indexer::{index_pattern, IndexedPattern, PatternError};

/// A single semantic problem in a mapping document.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The pattern failed to compile or index.
    #[error("map entry {entry} (`{pattern}`): {source}")]
    InvalidPattern {
        entry: usize,
        pattern: String,
        #[source]
        source: PatternError,
    },

    /// A parameter map contains an empty key.
    #[error("map entry {entry}: empty key in {section} parameters")]
    EmptyKey { entry: usize, section: &'static str },
}

/// Validate a parsed mapping document.
///
/// On success returns the indexed pattern of every map entry, in document order.
pub fn validate_config(config: &MappingConfig) -> Result<Vec<IndexedPattern>, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut patterns = Vec::with_capacity(config.maps.len());

    if config.maps.is_empty() {
        tracing::warn!(name = ?config.name, "Mapping document contains no map entries");
    }

    for (entry, map) in config.maps.iter().enumerate() {
        match index_pattern(&map.pattern) {
            Ok(indexed) => patterns.push(indexed),
            Err(source) => errors.push(ValidationError::InvalidPattern {
                entry,
                pattern: map.pattern.clone(),
                source,
            }),
        }

        let sections = [
            ("implicit", &map.implicit),
            ("override", &map.overrides),
            ("ignore", &map.ignore),
        ];
        for (section, params) in sections {
            if params.keys().any(|k| k.trim().is_empty()) {
                errors.push(ValidationError::EmptyKey { entry, section });
            }
        }
    }

    if errors.is_empty() {
        Ok(patterns)
    } else {
        Err(errors)
    }
}
