//! Process-wide URL mapper.
//!
//! # Responsibilities
//! - Hold the live RuleSet for concurrent read-only use
//! - Publish replacement RuleSets atomically (reload)
//! - Expose forward and reverse mapping over the live RuleSet
//!
//! # Design Decisions
//! - RuleSet published through `ArcSwap`; an in-flight call keeps the
//!   RuleSet it loaded even if a reload lands mid-call
//! - A failed reload leaves the current RuleSet in place

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::loader::{load_rule_set, ConfigError};
use crate::mapping::RuleSet;
use crate::params::ParameterSink;
use crate::uri::StructuredUri;

/// Shared handle to the live mapping rules.
#[derive(Debug)]
pub struct UrlMapper {
    rules: ArcSwap<RuleSet>,
    source: Option<PathBuf>,
}

impl UrlMapper {
    /// Create a mapper over an in-memory rule set. [`reload`](Self::reload)
    /// is a no-op for such a mapper.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules: ArcSwap::from_pointee(rules),
            source: None,
        }
    }

    /// Load the mapping document at `path`. Any failure is fatal to the caller.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let rules = load_rule_set(path)?;
        Ok(Self {
            rules: ArcSwap::from_pointee(rules),
            source: Some(path.to_path_buf()),
        })
    }

    /// The document this mapper was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Snapshot of the live rule set.
    pub fn rules(&self) -> Arc<RuleSet> {
        self.rules.load_full()
    }

    /// Publish a new rule set.
    pub fn replace(&self, rules: RuleSet) {
        tracing::info!(mappings = rules.len(), "Publishing new url mappings");
        self.rules.store(Arc::new(rules));
    }

    /// Re-read the source document and publish it.
    ///
    /// Returns the number of loaded mappings. On error the current rules stay live.
    pub fn reload(&self) -> Result<usize, ConfigError> {
        let Some(path) = &self.source else {
            return Ok(self.rules.load().len());
        };

        match load_rule_set(path) {
            Ok(rules) => {
                let count = rules.len();
                self.replace(rules);
                Ok(count)
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Reload failed, keeping current url mappings");
                Err(e)
            }
        }
    }

    /// Forward-map `uri` in place. Returns `true` if a rule was applied.
    pub fn map_to_url(&self, uri: &mut StructuredUri) -> bool {
        self.rules.load().map_to_url(uri).is_some()
    }

    /// Reverse-map `url` into `sink`. Returns `true` if a rule matched.
    pub fn map_from_url<S>(&self, url: &str, sink: &mut S) -> bool
    where
        S: ParameterSink + ?Sized,
    {
        self.rules.load().map_from_url(url, sink).is_some()
    }
}
