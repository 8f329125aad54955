//! Observability primitives for the asset and testing crates.
//!
//! This crate provides:
//! - `StructuredLogger` - Explicit logger handle with component context
//! - `LogSink` - Where entries go (`tracing`, stderr, memory, discard)
//! - `LogBuilder` - Fluent structured fields

mod logging;

pub use logging::*;
