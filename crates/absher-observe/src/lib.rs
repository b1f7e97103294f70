//! Observability setup for Absher: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
