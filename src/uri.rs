//! Structured URIs handed to the forward mapper.
//!
//! # Responsibilities
//! - Hold the path prefix being rewritten
//! - Hold ordered path and query parameters
//! - Render the final relative link after mapping
//!
//! # Design Decisions
//! - Parameters keep insertion order; duplicate keys are allowed
//! - Removal is by key and drops every occurrence
//! - Path parameters render as `/key/value` segments, query parameters as
//!   a form-urlencoded query string

use std::fmt;

use url::form_urlencoded;

/// A single key/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub key: String,
    pub value: String,
}

impl Parameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A link under construction: a path prefix plus ordered parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredUri {
    /// The part of the URL being rewritten.
    pub path_prefix: String,
    /// Parameters rendered as path segments.
    pub path_params: Vec<Parameter>,
    /// Parameters rendered in the query string.
    pub query_params: Vec<Parameter>,
}

impl StructuredUri {
    /// Create a URI with the given prefix and no parameters.
    pub fn new(path_prefix: impl Into<String>) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            ..Self::default()
        }
    }

    /// Builder-style variant of [`add_path_param`](Self::add_path_param).
    pub fn with_path_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.add_path_param(key, value);
        self
    }

    /// Builder-style variant of [`add_query_param`](Self::add_query_param).
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.add_query_param(key, value);
        self
    }

    pub fn add_path_param(&mut self, key: impl Into<String>, value: impl ToString) {
        self.path_params.push(Parameter::new(key, value.to_string()));
    }

    pub fn add_query_param(&mut self, key: impl Into<String>, value: impl ToString) {
        self.query_params.push(Parameter::new(key, value.to_string()));
    }

    /// Remove every path parameter named `key`.
    pub fn remove_path_param(&mut self, key: &str) {
        self.path_params.retain(|p| p.key != key);
    }

    /// Remove every query parameter named `key`.
    pub fn remove_query_param(&mut self, key: &str) {
        self.query_params.retain(|p| p.key != key);
    }

    /// Remove `key` from both path and query parameters.
    pub fn remove_param(&mut self, key: &str) {
        self.remove_path_param(key);
        self.remove_query_param(key);
    }

    /// True when there are neither path nor query parameters.
    pub fn has_no_params(&self) -> bool {
        self.path_params.is_empty() && self.query_params.is_empty()
    }

    /// Render prefix, path segments and query string.
    pub fn relative_link(&self) -> String {
        let mut link = self.path_prefix.clone();

        for param in &self.path_params {
            link.push('/');
            link.extend(form_urlencoded::byte_serialize(param.key.as_bytes()));
            link.push('/');
            link.extend(form_urlencoded::byte_serialize(param.value.as_bytes()));
        }

        if !self.query_params.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query_params.iter().map(|p| (&p.key, &p.value)))
                .finish();
            link.push('?');
            link.push_str(&query);
        }

        link
    }
}

impl fmt::Display for StructuredUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.relative_link())
    }
}
