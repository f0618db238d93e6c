//! Observability subsystem.
//!
//! Structured logging is initialized in `main` via the tracing registry;
//! this module owns the metrics side.

pub mod metrics;
