//! Cycle service — the hexagonal core.
//!
//! [`CycleService`] owns the FSM, the sample reader, and the shared cycle
//! context. It exposes a clean, hardware-agnostic API; all I/O flows through
//! port traits injected at the call site, making the entire service testable
//! with mock adapters.
//!
//! ```text
//!   SensorPort ──▶ ┌───────────────────────────┐ ──▶ ReportSink
//!                  │       CycleService        │
//!  RelayOutput ◀── │  FSM · Policy · Window    │
//!                  └───────────────────────────┘
//! ```

use log::info;

use crate::aggregate::AggregationOutcome;
use crate::config::SoilConfig;
use crate::fsm::context::CycleContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::sample::SampleReader;

use super::events::CycleEvent;
use super::ports::{RelayOutput, ReportSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// CycleService
// ───────────────────────────────────────────────────────────────

/// Orchestrates the perpetual sampling-decision-aggregation cycle.
pub struct CycleService {
    fsm: Fsm,
    ctx: CycleContext,
    reader: SampleReader,
    poll_count: u64,
}

impl CycleService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next.
    pub fn new(config: SoilConfig) -> Self {
        let ctx = CycleContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Idle);
        Self {
            fsm,
            ctx,
            reader: SampleReader::new(),
            poll_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the cycle. Seeds the interval reference with the boot clock,
    /// so the first collection lands one full interval after startup.
    pub fn start(&mut self, now_ms: u64, sink: &mut impl ReportSink) {
        self.ctx.now_ms = now_ms;
        self.ctx.last_collection_ms = now_ms;
        self.fsm.start(&mut self.ctx);
        sink.emit(&CycleEvent::Started(self.fsm.current_state()));
        info!("CycleService started in {:?}", self.fsm.current_state());
    }

    // ── Per-poll orchestration ────────────────────────────────

    /// Run one polling iteration: stage a sample if the interval elapsed,
    /// drive the FSM to quiescence, apply the relay command, emit events.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`RelayOutput`] — this avoids a double mutable borrow while keeping
    /// the port boundary explicit. Returns control to the caller every
    /// iteration; there is no blocking inside.
    pub fn poll(
        &mut self,
        now_ms: u64,
        hw: &mut (impl SensorPort + RelayOutput),
        sink: &mut impl ReportSink,
    ) {
        self.poll_count += 1;
        self.ctx.now_ms = now_ms;

        // 1. Stage one sample when the collection interval has elapsed.
        //    Sensors are read only on due polls, never in between.
        if self.ctx.collection_due() {
            self.ctx.pending_sample = Some(self.reader.read(hw, now_ms));
        }

        // 2. Drive the machine through the whole collection cycle. A full
        //    pass is Idle → Sampling → Aggregating → Idle, so the bound is
        //    the state count; aggregation is never deferred to a later poll.
        self.fsm.tick(&mut self.ctx);
        for _ in 0..StateId::COUNT {
            if self.fsm.current_state() == StateId::Idle {
                break;
            }
            self.fsm.tick(&mut self.ctx);
        }

        // 3. Re-assert the latched relay command (idempotent by contract).
        hw.set(self.ctx.command.active);

        // 4. Drain and emit this poll's events in collection order.
        if let Some((sample, verdict)) = self.ctx.collected.take() {
            sink.emit(&CycleEvent::SampleCollected {
                seq: self.ctx.sample_seq,
                sample,
            });
            sink.emit(&CycleEvent::Decision { sample, verdict });
        }
        if let Some(outcome) = self.ctx.pending_report.take() {
            match outcome {
                AggregationOutcome::Report(report) => {
                    sink.emit(&CycleEvent::WindowReport(report));
                }
                AggregationOutcome::InsufficientData { sample_count } => {
                    sink.emit(&CycleEvent::InsufficientData { sample_count });
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current FSM state (always `Idle` between polls).
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Total polling iterations since startup.
    pub fn poll_count(&self) -> u64 {
        self.poll_count
    }

    /// Total samples collected since startup.
    pub fn sample_count(&self) -> u32 {
        self.ctx.sample_seq
    }

    /// Samples currently accumulated in the window.
    pub fn window_len(&self) -> usize {
        self.ctx.window.len()
    }

    /// Trimmed mean temperature of the last completed window (0.0 before
    /// the first aggregation).
    pub fn last_window_mean_c(&self) -> f32 {
        self.ctx.rolling.last_four_hour_mean_c
    }

    /// Whether the relay is currently commanded on.
    pub fn relay_commanded(&self) -> bool {
        self.ctx.command.active
    }

    /// Clone of the live configuration.
    pub fn current_config(&self) -> SoilConfig {
        self.ctx.config.clone()
    }
}
