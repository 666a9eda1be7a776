//! Outbound cycle events.
//!
//! The [`CycleService`](super::service::CycleService) emits these through
//! the [`ReportSink`](super::ports::ReportSink) port. Adapters on the other
//! side decide what to do with them — render to the serial console, queue
//! for a display, etc.

use crate::aggregate::AggregationReport;
use crate::fsm::StateId;
use crate::policy::Verdict;
use crate::sample::SoilSample;

/// Structured events emitted by the cycle core.
#[derive(Debug, Clone)]
pub enum CycleEvent {
    /// The cycle controller has started (carries initial state).
    Started(StateId),

    /// A sample was collected. `seq` counts collections since boot.
    SampleCollected { seq: u32, sample: SoilSample },

    /// The irrigation policy reached a verdict for the collected sample.
    Decision { sample: SoilSample, verdict: Verdict },

    /// A full window was compressed into a report.
    WindowReport(AggregationReport),

    /// Aggregation was requested with too few samples for a trimmed mean.
    InsufficientData { sample_count: usize },
}
