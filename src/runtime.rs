//! Runtime glue that wires configuration, the observability sink, telemetry,
//! and the runner that drives one fan-out.

pub mod config;
pub mod runner;
pub mod sink;
pub mod telemetry;
