//! ESP-IDF hardware adapter.
//!
//! Owns the ADC channels for the moisture and salinity probes and publishes
//! raw readings into the sensor drivers' atomics before each poll. The
//! relay GPIO is wrapped by [`GpioRelay`](super::relay::GpioRelay), which
//! already speaks `embedded-hal`.

use std::rc::Rc;

use anyhow::{Context, Result};
use esp_idf_hal::adc::attenuation::DB_11;
use esp_idf_hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::adc::ADC1;
use esp_idf_hal::gpio::{Gpio1, Gpio2};
use log::warn;

use crate::sensors::{moisture, salinity};

/// The ESP32 ADC is 12-bit; probe calibrations expect the 10-bit range.
const ADC_TO_PROBE_SHIFT: u16 = 2;

/// Periodic ADC sampler feeding the probe drivers.
pub struct AdcSampler<'d> {
    moisture_ch: AdcChannelDriver<'d, Gpio1, Rc<AdcDriver<'d, ADC1>>>,
    salinity_ch: AdcChannelDriver<'d, Gpio2, Rc<AdcDriver<'d, ADC1>>>,
}

impl<'d> AdcSampler<'d> {
    pub fn new(adc1: ADC1, moisture_gpio: Gpio1, salinity_gpio: Gpio2) -> Result<Self> {
        let adc = Rc::new(AdcDriver::new(adc1).context("ADC1 init")?);
        let config = AdcChannelConfig {
            attenuation: DB_11,
            ..Default::default()
        };
        let moisture_ch = AdcChannelDriver::new(Rc::clone(&adc), moisture_gpio, &config)
            .context("moisture channel")?;
        let salinity_ch =
            AdcChannelDriver::new(adc, salinity_gpio, &config).context("salinity channel")?;
        Ok(Self {
            moisture_ch,
            salinity_ch,
        })
    }

    /// Read both channels once and publish into the probe drivers.
    pub fn sample_and_publish(&mut self) {
        match self.moisture_ch.read() {
            Ok(raw) => moisture::publish_raw(raw >> ADC_TO_PROBE_SHIFT),
            Err(e) => warn!("moisture ADC read failed: {e}"),
        }
        match self.salinity_ch.read() {
            Ok(raw) => salinity::publish_raw(raw >> ADC_TO_PROBE_SHIFT),
            Err(e) => warn!("salinity ADC read failed: {e}"),
        }
    }
}
