//! Sensor subsystem — individual probe drivers and the aggregating
//! [`SoilProbe`] hub.
//!
//! Raw readings flow in through lock-free atomics (`publish_*` functions)
//! written by the platform's ADC/1-Wire owner; the drivers convert them to
//! calibrated engineering units on demand. The hub implements
//! [`SensorPort`] so it can be handed straight to the cycle service.

pub mod moisture;
pub mod salinity;
pub mod soil_temperature;

use crate::app::ports::SensorPort;
use moisture::MoistureSensor;
use salinity::SalinitySensor;
use soil_temperature::SoilTemperatureSensor;

/// Aggregates the three soil probes behind the [`SensorPort`] boundary.
#[derive(Debug, Default)]
pub struct SoilProbe {
    pub temperature: SoilTemperatureSensor,
    pub moisture: MoistureSensor,
    pub salinity: SalinitySensor,
}

impl SoilProbe {
    pub fn new() -> Self {
        Self {
            temperature: SoilTemperatureSensor::new(),
            moisture: MoistureSensor::new(),
            salinity: SalinitySensor::new(),
        }
    }
}

impl SensorPort for SoilProbe {
    fn read_soil_temperature_c(&mut self) -> f32 {
        self.temperature.read_celsius()
    }

    fn read_soil_moisture_percent(&mut self) -> f32 {
        self.moisture.read_percent()
    }

    fn read_salinity_ds_m(&mut self) -> f32 {
        self.salinity.read_ds_m()
    }
}
