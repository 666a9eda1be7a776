//! Port traits — the hexagonal boundary between the cycle logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ CycleService (domain)
//! ```
//!
//! Driven adapters (probes, the relay driver, report sinks) implement these
//! traits. The [`CycleService`](super::service::CycleService) consumes them
//! via generics, so the domain core never touches hardware directly.

use super::events::CycleEvent;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain calibrated probe values.
///
/// All three reads are infallible by contract — adapters return a documented
/// fallback for probes that are not (yet) fitted. Typed `SensorFault`
/// returns are a known follow-up once reads can actually fail.
pub trait SensorPort {
    /// Soil temperature (°C).
    fn read_soil_temperature_c(&mut self) -> f32;

    /// Volumetric soil moisture (0–100 %).
    fn read_soil_moisture_percent(&mut self) -> f32;

    /// Salinity as electrical conductivity (dS/m).
    fn read_salinity_ds_m(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Relay port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain commands the irrigation relay through this.
pub trait RelayOutput {
    /// Drive the relay. Idempotent — the service re-asserts the desired
    /// state every poll and adapters must tolerate repeated calls.
    fn set(&mut self, active: bool);
}

// ───────────────────────────────────────────────────────────────
// Report sink port (driven adapter: domain → logging / reporting)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`CycleEvent`]s through this port.
/// Adapters decide where they go (serial console, storage, a display).
pub trait ReportSink {
    fn emit(&mut self, event: &CycleEvent);
}
