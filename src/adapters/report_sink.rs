//! Serial report sink adapter.
//!
//! Implements [`ReportSink`] by rendering structured cycle events to the
//! logger (UART / USB-CDC in production). Per-sample lines use the fixed
//! `temperature;moisture;salinity` field order; the end-of-window report
//! carries the processing timestamp, the removed extremes, the trimmed
//! mean, and the raw sample dump in collection order.

use log::{info, warn};

use crate::app::events::CycleEvent;
use crate::app::ports::ReportSink;

/// Adapter that renders every [`CycleEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct SerialReportSink;

impl SerialReportSink {
    pub fn new() -> Self {
        Self
    }
}

impl ReportSink for SerialReportSink {
    fn emit(&mut self, event: &CycleEvent) {
        match event {
            CycleEvent::Started(state) => {
                info!("START | initial_state={state:?}");
            }
            CycleEvent::SampleCollected { seq, sample } => {
                info!("SAMPLE {:02} | {}", seq, sample.serial_line());
            }
            CycleEvent::Decision { verdict, .. } => {
                if verdict.irrigate {
                    info!("DECISION | IRRIGATE ({})", verdict.reason);
                } else {
                    info!("DECISION | hold ({})", verdict.reason);
                }
            }
            CycleEvent::WindowReport(report) => {
                info!("REPORT | four-hour soil temperature window");
                info!("REPORT | processed_at_ms: {}", report.generated_at_ms);
                info!("REPORT | sample_count: {}", report.sample_count);
                info!("REPORT | removed_min_c: {:.2}", report.min_temperature_c);
                info!("REPORT | removed_max_c: {:.2}", report.max_temperature_c);
                info!("REPORT | trimmed_mean_c: {:.2}", report.trimmed_mean_c);
                info!("REPORT | raw samples (temp;moisture;salinity):");
                for sample in &report.samples {
                    info!("REPORT |   {}", sample.serial_line());
                }
            }
            CycleEvent::InsufficientData { sample_count } => {
                warn!("REPORT | too few samples for a trimmed mean ({sample_count})");
            }
        }
    }
}
