//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config / mapping / service modules produce:
//!     → tracing events (load, reload, rule selection)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr), installed by the binary
//! ```

pub mod logging;
