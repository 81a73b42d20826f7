//! URL mapping engine.
//!
//! # Data Flow
//! ```text
//! Rule Compilation (at startup):
//!     MapEntryConfig[]
//!     → indexer.rs (placeholder index + substitution template)
//!     → rule.rs (Rule, in document order)
//!     → Freeze as immutable RuleSet
//!
//! Link rendering:
//!     StructuredUri (path prefix, path params, query params)
//!     → forward.rs (first rule covering the parameters)
//!     → rewritten path prefix + residual parameters
//!
//! Incoming request:
//!     raw URL path
//!     → reverse.rs (first rule matching the whole path)
//!     → extracted / implicit / override parameters in the sink
//! ```
//!
//! # Design Decisions
//! - Rules compiled at startup, immutable at runtime
//! - Deterministic: same input always selects the same rule
//! - First match wins (document order)
//! - No match is not an error

pub mod forward;
pub mod indexer;
pub mod reverse;
pub mod rule;

pub use forward::normalize_slashes;
pub use indexer::{Placeholder, PatternError, Segment, CONTEXT_PATH, WEBAPP_ROOT};
pub use rule::{Rule, RuleSet};
