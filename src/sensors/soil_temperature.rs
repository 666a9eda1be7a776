//! Soil temperature probe.
//!
//! The temperature value is published in milli-degrees through a lock-free
//! atomic by the platform layer. Until a reading has been published the
//! driver returns a fixed fallback so the control loop always has a
//! calibrated float to work with.
//!
//! TODO: replace the published-value fallback with a DS18B20 driver once
//! the 1-Wire bus on [`SOIL_TEMP_GPIO`](crate::pins::SOIL_TEMP_GPIO) lands.

use core::sync::atomic::{AtomicBool, AtomicI32, Ordering};

/// Temperature reported until the probe publishes a real reading (°C).
pub const FALLBACK_TEMP_C: f32 = 25.5;

static TEMP_MILLI_C: AtomicI32 = AtomicI32::new(0);
static TEMP_VALID: AtomicBool = AtomicBool::new(false);

/// Publish the latest probe temperature. Lock-free.
pub fn publish_temperature_c(celsius: f32) {
    TEMP_MILLI_C.store((celsius * 1000.0) as i32, Ordering::Release);
    TEMP_VALID.store(true, Ordering::Release);
}

/// Soil temperature driver.
#[derive(Debug, Default)]
pub struct SoilTemperatureSensor;

impl SoilTemperatureSensor {
    pub fn new() -> Self {
        Self
    }

    /// Latest soil temperature (°C), or the fallback before the first
    /// published reading.
    pub fn read_celsius(&self) -> f32 {
        if TEMP_VALID.load(Ordering::Acquire) {
            TEMP_MILLI_C.load(Ordering::Acquire) as f32 / 1000.0
        } else {
            FALLBACK_TEMP_C
        }
    }
}
