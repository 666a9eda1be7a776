//! Capacitive soil moisture probe.
//!
//! The probe delivers a 10-bit raw reading (0–1023) that maps linearly to
//! volumetric moisture 0–100 %. The raw value is published into a lock-free
//! atomic by whatever owns the ADC — the ESP-IDF hardware task in
//! production, test code on the host — so the driver itself has no
//! platform dependencies.

use core::sync::atomic::{AtomicU16, Ordering};

/// Full scale of the probe's 10-bit ADC.
pub const RAW_FULL_SCALE: u16 = 1023;

static MOISTURE_RAW: AtomicU16 = AtomicU16::new(0);

/// Publish the latest raw ADC reading. Lock-free — safe to call from the
/// platform sampling task or an ISR.
pub fn publish_raw(raw: u16) {
    MOISTURE_RAW.store(raw.min(RAW_FULL_SCALE), Ordering::Release);
}

/// Soil moisture driver: converts the published raw reading to percent.
#[derive(Debug, Default)]
pub struct MoistureSensor;

impl MoistureSensor {
    pub fn new() -> Self {
        Self
    }

    /// Latest moisture in percent (0–100).
    pub fn read_percent(&self) -> f32 {
        raw_to_percent(MOISTURE_RAW.load(Ordering::Acquire))
    }
}

/// Linear 0–1023 → 0–100 % map.
fn raw_to_percent(raw: u16) -> f32 {
    f32::from(raw.min(RAW_FULL_SCALE)) / f32::from(RAW_FULL_SCALE) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_endpoints_map_to_percent_endpoints() {
        assert_eq!(raw_to_percent(0), 0.0);
        assert_eq!(raw_to_percent(RAW_FULL_SCALE), 100.0);
    }

    #[test]
    fn midscale_is_about_half() {
        let pct = raw_to_percent(512);
        assert!((pct - 50.0).abs() < 0.1);
    }

    #[test]
    fn over_range_raw_is_clamped() {
        assert_eq!(raw_to_percent(5_000), 100.0);
    }

    #[test]
    fn published_raw_reaches_the_driver() {
        publish_raw(1023);
        let sensor = MoistureSensor::new();
        assert_eq!(sensor.read_percent(), 100.0);
        publish_raw(0);
        assert_eq!(sensor.read_percent(), 0.0);
    }
}
