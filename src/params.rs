//! Parameter sinks populated by the reverse mapper.
//!
//! The request pipeline owns the real parameter store; the mapper only needs
//! "set" and "remove". [`Parameters`] is a small multi-value store for callers
//! that don't have one of their own.

use std::collections::HashMap;
use std::hash::BuildHasher;

use indexmap::IndexMap;
use serde::Serialize;

/// Destination for extracted parameters.
pub trait ParameterSink {
    /// Replace any existing value(s) for `key` with `value`.
    fn set(&mut self, key: &str, value: &str);

    /// Remove `key` if present.
    fn remove(&mut self, key: &str);
}

/// Insertion-ordered multi-value parameter store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Parameters {
    inner: IndexMap<String, Vec<String>>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value, keeping the ones already stored under `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.entry(key.into()).or_default().push(value.into());
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values stored under `key`, in insertion order.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.inner.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// Iterate `(key, first value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().filter_map(|(k, values)| {
            values.first().map(|v| (k.as_str(), v.as_str()))
        })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl ParameterSink for Parameters {
    fn set(&mut self, key: &str, value: &str) {
        self.inner.insert(key.to_string(), vec![value.to_string()]);
    }

    fn remove(&mut self, key: &str) {
        self.inner.shift_remove(key);
    }
}

impl<S: BuildHasher> ParameterSink for HashMap<String, String, S> {
    fn set(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        HashMap::remove(self, key);
    }
}

impl<S: BuildHasher> ParameterSink for IndexMap<String, String, S> {
    fn set(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.shift_remove(key);
    }
}
