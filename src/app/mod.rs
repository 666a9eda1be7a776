//! Application layer: port traits, outbound events, and the cycle service.

pub mod events;
pub mod ports;
pub mod service;
