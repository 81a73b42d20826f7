//! Compiled mapping rules.
//!
//! A [`Rule`] is built from one configured map entry and never changes
//! afterwards. A [`RuleSet`] keeps rules in document order, which is also
//! their match priority.

use indexmap::IndexMap;
use regex::Regex;

use crate::config::schema::{MapEntryConfig, MappingConfig, MissingValue};
use crate::mapping::indexer::{
    index_pattern, IndexedPattern, PatternError, Segment, CONTEXT_PATH, WEBAPP_ROOT,
};

/// One mapping between a URL pattern and a parameter set.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: String,
    matcher: Regex,
    groups: IndexMap<String, usize>,
    template: Vec<Segment>,
    implicit: IndexMap<String, String>,
    overrides: IndexMap<String, String>,
    ignore: IndexMap<String, String>,
}

impl Rule {
    /// Compile a rule from its configuration entry.
    pub fn compile(entry: &MapEntryConfig) -> Result<Self, PatternError> {
        let indexed = index_pattern(&entry.pattern)?;
        Ok(Self::from_indexed(entry, indexed))
    }

    /// Build a rule from an entry whose pattern has already been indexed.
    pub fn from_indexed(entry: &MapEntryConfig, indexed: IndexedPattern) -> Self {
        Self {
            pattern: entry.pattern.clone(),
            matcher: indexed.matcher,
            groups: indexed.groups,
            template: indexed.template,
            implicit: entry.implicit.clone(),
            overrides: entry.overrides.clone(),
            ignore: entry.ignore.clone(),
        }
    }

    /// The raw pattern text as configured.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Anchored matcher for whole-string matching.
    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }

    /// Placeholder name → capture-group number.
    pub fn placeholder_index(&self) -> &IndexMap<String, usize> {
        &self.groups
    }

    /// Placeholders whose values come from request parameters.
    pub fn parameter_placeholders(&self) -> impl Iterator<Item = (&str, usize)> {
        self.groups
            .iter()
            .filter(|(name, _)| !is_reserved(name))
            .map(|(name, index)| (name.as_str(), *index))
    }

    pub fn template(&self) -> &[Segment] {
        &self.template
    }

    pub fn implicit(&self) -> &IndexMap<String, String> {
        &self.implicit
    }

    pub fn overrides(&self) -> &IndexMap<String, String> {
        &self.overrides
    }

    pub fn ignore(&self) -> &IndexMap<String, String> {
        &self.ignore
    }

    pub fn is_ignored(&self, key: &str) -> bool {
        self.ignore.contains_key(key)
    }
}

/// True for placeholder names resolved from context rather than parameters.
pub fn is_reserved(name: &str) -> bool {
    name == CONTEXT_PATH || name == WEBAPP_ROOT
}

/// Ordered, immutable collection of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    name: Option<String>,
    rules: Vec<Rule>,
    missing_value: MissingValue,
}

impl RuleSet {
    /// Create a rule set from already compiled rules.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            name: None,
            rules,
            missing_value: MissingValue::default(),
        }
    }

    /// Compile every entry of a (validated) configuration.
    ///
    /// Stops at the first failing entry and reports its position.
    pub fn from_config(config: &MappingConfig) -> Result<Self, (usize, PatternError)> {
        let rules = config
            .maps
            .iter()
            .enumerate()
            .map(|(i, entry)| Rule::compile(entry).map_err(|e| (i, e)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: config.name.clone(),
            rules,
            missing_value: config.missing_value,
        })
    }

    /// Assemble a rule set from a configuration and the indexed patterns
    /// produced by validating it, entry for entry.
    pub fn from_validated(config: &MappingConfig, patterns: Vec<IndexedPattern>) -> Self {
        let rules = config
            .maps
            .iter()
            .zip(patterns)
            .map(|(entry, indexed)| Rule::from_indexed(entry, indexed))
            .collect();

        Self {
            name: config.name.clone(),
            rules,
            missing_value: config.missing_value,
        }
    }

    pub fn with_missing_value(mut self, missing_value: MissingValue) -> Self {
        self.missing_value = missing_value;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn missing_value(&self) -> MissingValue {
        self.missing_value
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
