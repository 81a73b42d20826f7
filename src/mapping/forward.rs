//! Forward mapping: structured parameters → simplified URL path.
//!
//! # Responsibilities
//! - Select the first rule whose placeholders and implicit values cover the
//!   URI's parameters
//! - Substitute parameter values into the rule's template
//! - Remove consumed parameters from the URI
//!
//! # Design Decisions
//! - Path parameters win over query parameters with the same key
//! - First satisfying rule wins; rule order is priority order
//! - No match leaves the URI untouched

use indexmap::IndexMap;

use crate::config::schema::MissingValue;
use crate::mapping::indexer::{Placeholder, Segment};
use crate::mapping::rule::{Rule, RuleSet};
use crate::uri::StructuredUri;

impl RuleSet {
    /// Rewrite `uri` with the first applicable rule.
    ///
    /// Returns the selected rule, or `None` if the URI was left unchanged.
    pub fn map_to_url(&self, uri: &mut StructuredUri) -> Option<&Rule> {
        if uri.has_no_params() {
            return None;
        }

        let params = collect_params(uri);

        let (rule, implicit_found) = self
            .rules()
            .iter()
            .find_map(|rule| covered_by(rule, &params).map(|found| (rule, found)))?;

        tracing::debug!(
            pattern = rule.pattern(),
            prefix = %uri.path_prefix,
            "Forward mapping rule selected"
        );

        let web_app_root = uri.path_prefix.clone();
        let mut path = String::new();

        for segment in rule.template() {
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Placeholder(Placeholder::ContextPath) => {}
                Segment::Placeholder(Placeholder::WebAppRoot) => path.push_str(&web_app_root),
                Segment::Placeholder(Placeholder::Parameter(name)) => {
                    if !rule.is_ignored(name) {
                        match params.get(name.as_str()) {
                            Some(value) => path.push_str(value),
                            None => path.push_str(self.missing_value().substitute(name)),
                        }
                    }
                    uri.remove_param(name);
                }
            }
        }

        for key in implicit_found {
            uri.remove_param(key);
        }
        for key in rule.ignore().keys() {
            uri.remove_param(key);
        }

        uri.path_prefix = normalize_slashes(&path);
        Some(rule)
    }
}

impl MissingValue {
    /// Text substituted for a placeholder with no parameter value.
    fn substitute(self, name: &str) -> &'static str {
        tracing::warn!(placeholder = name, "No value for placeholder in forward mapping");
        match self {
            MissingValue::Empty => "",
            MissingValue::Null => "null",
        }
    }
}

/// Key → value map over path then query parameters, first occurrence wins.
fn collect_params(uri: &StructuredUri) -> IndexMap<String, String> {
    let mut params = IndexMap::new();
    for param in uri.path_params.iter().chain(&uri.query_params) {
        params
            .entry(param.key.clone())
            .or_insert_with(|| param.value.clone());
    }
    params
}

/// If `rule` covers every non-ignored key, return the implicit keys whose
/// configured value matched.
fn covered_by<'r>(rule: &'r Rule, params: &IndexMap<String, String>) -> Option<Vec<&'r str>> {
    let implicit_found: Vec<&str> = rule
        .implicit()
        .iter()
        .filter(|(key, value)| params.get(key.as_str()) == Some(*value))
        .map(|(key, _)| key.as_str())
        .collect();

    let covered = params
        .keys()
        .filter(|key| !rule.is_ignored(key))
        .all(|key| {
            rule.placeholder_index().contains_key(key) || implicit_found.contains(&key.as_str())
        });

    covered.then_some(implicit_found)
}

/// Collapse runs of `/` and drop one trailing `/`.
pub fn normalize_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    if out.ends_with('/') {
        out.pop();
    }
    out
}
