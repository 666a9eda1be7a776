//! Soil sample value type and the reader that produces it.
//!
//! A [`SoilSample`] is an immutable point-in-time record of the three soil
//! probes plus a monotonic collection timestamp. The [`SampleReader`] is the
//! only producer; everything downstream (policy, aggregator, report sink)
//! consumes samples by value and never mutates them.

use core::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::app::ports::SensorPort;

/// One calibrated soil reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilSample {
    /// Soil temperature (°C).
    pub soil_temperature_c: f32,
    /// Volumetric soil moisture (0–100 %).
    pub soil_moisture_percent: f32,
    /// Electrical-conductivity salinity (dS/m, ≥ 0).
    pub salinity_ds_m: f32,
    /// Collection timestamp, milliseconds, monotonic within a boot.
    pub collected_at_ms: u64,
}

impl SoilSample {
    /// Fixed-order serial line: `temperature;moisture;salinity` with
    /// 1/1/2 decimal places. This is the wire format the report sink and
    /// the end-of-window raw dump both use.
    pub fn serial_line(&self) -> heapless::String<48> {
        let mut line = heapless::String::new();
        // 48 bytes always fits three clamped f32 fields; a formatting error
        // would only truncate the line, never panic.
        let _ = write!(
            line,
            "{:.1};{:.1};{:.2}",
            self.soil_temperature_c, self.soil_moisture_percent, self.salinity_ds_m
        );
        line
    }
}

/// Produces one [`SoilSample`] per call, stamped with a non-decreasing
/// timestamp. Infallible: the sensor port always yields calibrated floats
/// (unimplemented probes return documented fallbacks).
#[derive(Debug, Default)]
pub struct SampleReader {
    last_timestamp_ms: u64,
}

impl SampleReader {
    pub fn new() -> Self {
        Self {
            last_timestamp_ms: 0,
        }
    }

    /// Read all three probes and stamp the sample.
    ///
    /// Timestamps never decrease across calls within a process lifetime,
    /// even if the caller's clock steps backwards. Moisture and salinity
    /// are clamped into their documented ranges at the boundary so the
    /// rest of the system never sees an impossible value.
    pub fn read(&mut self, port: &mut impl SensorPort, now_ms: u64) -> SoilSample {
        let collected_at_ms = now_ms.max(self.last_timestamp_ms);
        self.last_timestamp_ms = collected_at_ms;

        SoilSample {
            soil_temperature_c: port.read_soil_temperature_c(),
            soil_moisture_percent: port.read_soil_moisture_percent().clamp(0.0, 100.0),
            salinity_ds_m: port.read_salinity_ds_m().max(0.0),
            collected_at_ms,
        }
    }
}
