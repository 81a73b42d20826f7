//! Reverse mapping: simplified URL path → structured parameters.
//!
//! # Responsibilities
//! - Select the first rule whose pattern matches the whole URL
//! - Write captured placeholder values into the parameter sink
//! - Apply implicit, override and ignore parameters, in that order
//!
//! # Design Decisions
//! - One trailing `/` is stripped before matching
//! - Reserved placeholders (`contextPath`, `webAppRoot`) are never extracted
//! - Optional placeholders that did not participate are not written
//! - No match leaves the sink untouched

use crate::mapping::rule::{Rule, RuleSet};
use crate::params::ParameterSink;

impl RuleSet {
    /// Extract parameters from `url` into `sink` using the first matching rule.
    ///
    /// Returns the selected rule so the caller can rewrite the request path.
    pub fn map_from_url<S>(&self, url: &str, sink: &mut S) -> Option<&Rule>
    where
        S: ParameterSink + ?Sized,
    {
        let url = url.strip_suffix('/').unwrap_or(url);

        let (rule, captures) = self
            .rules()
            .iter()
            .find_map(|rule| rule.matcher().captures(url).map(|caps| (rule, caps)))?;

        tracing::debug!(pattern = rule.pattern(), url, "Reverse mapping rule selected");

        for (name, index) in rule.parameter_placeholders() {
            if let Some(value) = captures.get(index) {
                sink.set(name, value.as_str());
            }
        }

        for (key, value) in rule.implicit() {
            sink.set(key, value);
        }

        for (key, value) in rule.overrides() {
            sink.set(key, value);
        }

        for key in rule.ignore().keys() {
            sink.remove(key);
        }

        Some(rule)
    }
}
