//! SoilGuard Firmware — Main Entry Point
//!
//! Hexagonal architecture with a cooperative polling loop:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  AdcSampler        GpioRelay        SerialReportSink     │
//! │  (probe raws)      (RelayOutput)    (ReportSink)         │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ───────────────      │
//! │                                                          │
//! │  ┌──────────────────────────────────────────────────┐    │
//! │  │           CycleService (pure logic)              │    │
//! │  │  FSM · IrrigationPolicy · WindowAggregator       │    │
//! │  └──────────────────────────────────────────────────┘    │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![deny(unused_must_use)]

use std::time::Instant;

use anyhow::Result;
use log::info;

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::peripherals::Peripherals;

use soilguard::adapters::hardware::AdcSampler;
use soilguard::adapters::relay::GpioRelay;
use soilguard::adapters::report_sink::SerialReportSink;
use soilguard::app::ports::{RelayOutput, SensorPort};
use soilguard::app::service::CycleService;
use soilguard::config::SoilConfig;
use soilguard::sensors::SoilProbe;

/// Polling cadence of the main loop. The 15-minute collection interval is
/// enforced inside the service; the loop merely checks often enough.
const POLL_PERIOD_MS: u32 = 500;

/// Bundles the probe hub and the relay so the service sees one `hw` value
/// satisfying both ports.
struct Board<P: embedded_hal::digital::OutputPin> {
    probe: SoilProbe,
    relay: GpioRelay<P>,
}

impl<P: embedded_hal::digital::OutputPin> SensorPort for Board<P> {
    fn read_soil_temperature_c(&mut self) -> f32 {
        self.probe.read_soil_temperature_c()
    }
    fn read_soil_moisture_percent(&mut self) -> f32 {
        self.probe.read_soil_moisture_percent()
    }
    fn read_salinity_ds_m(&mut self) -> f32 {
        self.probe.read_salinity_ds_m()
    }
}

impl<P: embedded_hal::digital::OutputPin> RelayOutput for Board<P> {
    fn set(&mut self, active: bool) {
        self.relay.set(active);
    }
}

fn main() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("SoilGuard v{} starting", env!("CARGO_PKG_VERSION"));

    let peripherals = Peripherals::take()?;

    // Relay off before anything else runs.
    let relay_pin = PinDriver::output(peripherals.pins.gpio3)?;
    let relay = GpioRelay::new(relay_pin);

    let mut sampler = AdcSampler::new(
        peripherals.adc1,
        peripherals.pins.gpio1,
        peripherals.pins.gpio2,
    )?;

    let mut board = Board {
        probe: SoilProbe::new(),
        relay,
    };
    let mut sink = SerialReportSink::new();
    let mut service = CycleService::new(SoilConfig::default());

    let boot = Instant::now();
    let now_ms = |boot: Instant| boot.elapsed().as_millis() as u64;

    service.start(now_ms(boot), &mut sink);

    loop {
        sampler.sample_and_publish();
        service.poll(now_ms(boot), &mut board, &mut sink);
        FreeRtos::delay_ms(POLL_PERIOD_MS);
    }
}
