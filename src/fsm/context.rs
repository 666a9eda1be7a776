//! Shared mutable context threaded through every FSM handler.
//!
//! `CycleContext` is the single struct that state handlers read from and
//! write to: the pending sample, the window aggregator, the rolling
//! decision state, the latched relay command, timing, and configuration.
//! The service fills the inputs before ticking the machine and drains the
//! outputs afterwards, so the handlers themselves stay pure functions of
//! the context.

use crate::aggregate::{AggregationOutcome, RollingState, WindowAggregator};
use crate::config::SoilConfig;
use crate::policy::Verdict;
use crate::sample::SoilSample;

/// Relay command latched by the state handlers and applied to the
/// [`RelayOutput`](crate::app::ports::RelayOutput) port by the service
/// after every tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelayCommand {
    /// Desired relay state (`true` = irrigating).
    pub active: bool,
}

/// The shared context passed to every state handler function.
pub struct CycleContext {
    // -- Timing --
    /// Poll timestamp, milliseconds (set by the service each poll).
    pub now_ms: u64,
    /// Timestamp of the last collected sample. Updated to the *sample*
    /// timestamp, not the poll clock, so interval drift does not
    /// accumulate (missed intervals are not made up either).
    pub last_collection_ms: u64,

    // -- Inputs (written by the service before the tick) --
    /// Sample read this poll, waiting to be collected. `Some` only on
    /// polls where the collection interval has elapsed.
    pub pending_sample: Option<SoilSample>,

    // -- Cycle state --
    /// Bounded sample window, exclusively owned here.
    pub window: WindowAggregator,
    /// Carry-over trimmed mean from the last completed window.
    pub rolling: RollingState,
    /// Total samples collected since boot (report numbering).
    pub sample_seq: u32,

    // -- Outputs (drained by the service after the tick) --
    /// Relay command latched by the most recent decision.
    pub command: RelayCommand,
    /// Sample collected this poll, with its verdict, for event emission.
    pub collected: Option<(SoilSample, Verdict)>,
    /// Aggregation outcome produced this poll, for event emission.
    pub pending_report: Option<AggregationOutcome>,

    // -- Configuration --
    pub config: SoilConfig,
}

impl CycleContext {
    /// Create a new context with the given configuration.
    pub fn new(config: SoilConfig) -> Self {
        Self {
            now_ms: 0,
            last_collection_ms: 0,
            pending_sample: None,
            window: WindowAggregator::new(),
            rolling: RollingState::default(),
            sample_seq: 0,
            command: RelayCommand::default(),
            collected: None,
            pending_report: None,
            config,
        }
    }

    /// True when the collection interval has elapsed since the last sample.
    pub fn collection_due(&self) -> bool {
        self.now_ms.saturating_sub(self.last_collection_ms) >= self.config.collection_interval_ms
    }
}
