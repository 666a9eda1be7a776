//! SoilGuard firmware library.
//!
//! Periodic soil-monitoring and irrigation-control loop: sample soil
//! temperature, moisture, and salinity at a fixed interval, run a
//! priority-ordered rule policy against each sample, drive the irrigation
//! relay, and compress each full 16-sample window into a trimmed-mean
//! report that feeds the next cycle's decisions.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by the `espidf`
//! feature within each module.

#![deny(unused_must_use)]

pub mod aggregate;
pub mod app;
pub mod config;
pub mod fsm;
pub mod pins;
pub mod policy;
pub mod sample;

mod error;

pub mod adapters;
pub mod sensors;
