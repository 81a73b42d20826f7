//! Bidirectional friendly-URL mapping.
//!
//! Rewrites structured request parameters into simplified, human-readable
//! URL paths (forward mapping) and parses such paths back into parameters
//! (reverse mapping), driven by an ordered list of pattern rules loaded from
//! an XML, YAML, JSON or TOML document.

pub mod config;
pub mod mapping;
pub mod observability;
pub mod params;
pub mod service;
pub mod uri;

pub use config::{ConfigError, MappingConfig};
pub use mapping::{Rule, RuleSet};
pub use params::{ParameterSink, Parameters};
pub use service::UrlMapper;
pub use uri::{Parameter, StructuredUri};
