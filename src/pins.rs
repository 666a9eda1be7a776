//! GPIO pin assignments for the SoilGuard controller board.

/// 1-Wire bus for the soil temperature probe.
pub const SOIL_TEMP_GPIO: i32 = 4;
/// ADC input for the capacitive soil moisture probe.
pub const SOIL_MOISTURE_ADC_GPIO: i32 = 1;
/// ADC input for the salinity (EC) probe.
pub const SALINITY_ADC_GPIO: i32 = 2;
/// Irrigation relay drive output (active high).
pub const IRRIGATION_RELAY_GPIO: i32 = 3;
