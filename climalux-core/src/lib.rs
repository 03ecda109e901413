//! Board-agnostic core logic for the light & climate monitor
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Sensor traits and error kinds
//! - Reading and snapshot data model
//! - Bounded channel plumbing between samplers and the aggregator
//! - Aggregation rules (last-write-wins, invalid never clobbers valid)
//! - Dashboard text rendering
//! - Configuration type definitions and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod aggregator;
pub mod config;
pub mod dashboard;
pub mod pipeline;
pub mod reading;
pub mod sampler;
pub mod snapshot;
pub mod traits;

pub use aggregator::{Aggregator, AggregatorStats};
pub use reading::{ClimateMeasurement, ClimateReading, LightReading, Reading};
pub use snapshot::Snapshot;
