//! Driven adapters: implementations of the port traits for real hardware
//! and the serial console.

pub mod relay;
pub mod report_sink;

#[cfg(feature = "espidf")]
pub mod hardware;
