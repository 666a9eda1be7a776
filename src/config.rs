//! System configuration parameters
//!
//! All tunable parameters for the SoilGuard irrigation loop. The defaults
//! are the field-calibrated values the controller ships with; nothing in
//! the core loop mutates them at runtime.

use serde::{Deserialize, Serialize};

/// Number of samples accumulated before a window is aggregated.
///
/// A compile-time constant because it sizes the fixed-capacity window
/// vector. 16 samples at 15-minute intervals spans four hours.
pub const WINDOW_CAPACITY: usize = 16;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilConfig {
    // --- Timing ---
    /// Interval between soil collections (milliseconds).
    pub collection_interval_ms: u64,

    // --- Irrigation thresholds ---
    /// Soil moisture (%) below which irrigation is always triggered.
    pub moisture_min_percent: f32,
    /// Four-hour mean soil temperature (°C) above which thermal demand
    /// triggers irrigation.
    pub mean_temp_critical_c: f32,
    /// Salinity (dS/m) above which the soil needs attention.
    pub salinity_max_ds_m: f32,
    /// Moisture (%) below which high-salinity soil is irrigated to leach
    /// salts instead of merely monitored.
    pub leach_moisture_percent: f32,
}

impl Default for SoilConfig {
    fn default() -> Self {
        Self {
            // Timing
            collection_interval_ms: 15 * 60 * 1000, // 15 minutes

            // Irrigation thresholds
            moisture_min_percent: 30.0,
            mean_temp_critical_c: 30.0,
            salinity_max_ds_m: 2.0,
            leach_moisture_percent: 55.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SoilConfig::default();
        assert!(c.collection_interval_ms > 0);
        assert!(c.moisture_min_percent > 0.0 && c.moisture_min_percent < 100.0);
        assert!(c.mean_temp_critical_c > 0.0);
        assert!(c.salinity_max_ds_m > 0.0);
        assert!(c.leach_moisture_percent > 0.0 && c.leach_moisture_percent < 100.0);
    }

    #[test]
    fn leach_threshold_above_moisture_min_invariant() {
        let c = SoilConfig::default();
        assert!(
            c.leach_moisture_percent > c.moisture_min_percent,
            "leach co-threshold must sit above the dry-soil threshold, \
             otherwise the leaching rule can never fire"
        );
    }

    #[test]
    fn window_spans_four_hours_at_default_interval() {
        let c = SoilConfig::default();
        let span_ms = c.collection_interval_ms * WINDOW_CAPACITY as u64;
        assert_eq!(span_ms, 4 * 60 * 60 * 1000);
    }

    #[test]
    fn serde_roundtrip() {
        let c = SoilConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SoilConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.collection_interval_ms, c2.collection_interval_ms);
        assert!((c.moisture_min_percent - c2.moisture_min_percent).abs() < 0.001);
        assert!((c.salinity_max_ds_m - c2.salinity_max_ds_m).abs() < 0.001);
    }

    #[test]
    fn postcard_roundtrip() {
        let c = SoilConfig::default();
        let bytes = postcard::to_allocvec(&c).unwrap();
        let c2: SoilConfig = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(c.collection_interval_ms, c2.collection_interval_ms);
        assert!((c.mean_temp_critical_c - c2.mean_temp_critical_c).abs() < 0.001);
    }
}
