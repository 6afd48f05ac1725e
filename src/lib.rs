//! PV forecast service.
//!
//! Consumes weather forecast events from a stream, runs a PV system simulation for each
//! one and publishes the resulting power forecast to another stream.

pub mod codec;
pub mod config;
pub mod domain;
pub mod service;
pub mod simulation;
pub mod stream;
pub mod telemetry;
