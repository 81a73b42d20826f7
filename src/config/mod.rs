//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! mapping document (XML/YAML/JSON/TOML, chosen by extension)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (pattern and key checks)
//!     → MappingConfig (validated, immutable)
//!     → compiled into a RuleSet
//!
//! On reload:
//!     watcher.rs detects change
//!     → loader.rs loads and compiles the new document
//!     → atomic swap of Arc<RuleSet> in the UrlMapper
//! ```
//!
//! # Design Decisions
//! - Any load failure at startup is fatal; no partial RuleSet is published
//! - A failed reload keeps the previous RuleSet
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, load_rule_set, ConfigError, ConfigFormat};
pub use schema::{MapEntryConfig, MappingConfig, MissingValue};
pub use validation::ValidationError;
pub use watcher::ConfigWatcher;
