//! Salinity (electrical conductivity) probe.
//!
//! The EC probe delivers a 10-bit raw reading (0–1023) scaled linearly to
//! 0–5 dS/m. Same lock-free publication pattern as the moisture driver:
//! the ADC owner stores raw values, the driver converts on read.

use core::sync::atomic::{AtomicU16, Ordering};

/// Full scale of the probe's 10-bit ADC.
pub const RAW_FULL_SCALE: u16 = 1023;

/// EC at full scale (dS/m).
pub const DS_M_FULL_SCALE: f32 = 5.0;

static SALINITY_RAW: AtomicU16 = AtomicU16::new(0);

/// Publish the latest raw ADC reading. Lock-free.
pub fn publish_raw(raw: u16) {
    SALINITY_RAW.store(raw.min(RAW_FULL_SCALE), Ordering::Release);
}

/// Salinity driver: converts the published raw reading to dS/m.
#[derive(Debug, Default)]
pub struct SalinitySensor;

impl SalinitySensor {
    pub fn new() -> Self {
        Self
    }

    /// Latest salinity in dS/m (0–5).
    pub fn read_ds_m(&self) -> f32 {
        raw_to_ds_m(SALINITY_RAW.load(Ordering::Acquire))
    }
}

/// Linear 0–1023 → 0–5 dS/m transform.
fn raw_to_ds_m(raw: u16) -> f32 {
    f32::from(raw.min(RAW_FULL_SCALE)) / f32::from(RAW_FULL_SCALE) * DS_M_FULL_SCALE
}
