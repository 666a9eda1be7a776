//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern: a fixed table of state descriptors, each
//! with optional `on_enter`/`on_exit` actions and a per-tick `on_update`
//! handler that returns `Some(next)` to transition or `None` to stay.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │  StateTable                                            │
//! │  ┌─────────────┬──────────┬─────────┬────────────────┐ │
//! │  │ StateId     │ on_enter │ on_exit │ on_update      │ │
//! │  ├─────────────┼──────────┼─────────┼────────────────┤ │
//! │  │ Idle        │ fn(ctx)  │ fn(ctx) │ fn(ctx)->Opt<> │ │
//! │  │ Sampling    │ fn(ctx)  │ fn(ctx) │ fn(ctx)->Opt<> │ │
//! │  │ Aggregating │ fn(ctx)  │ fn(ctx) │ fn(ctx)->Opt<> │ │
//! │  └─────────────┴──────────┴─────────┴────────────────┘ │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! All handlers receive `&mut CycleContext` which holds the pending sample,
//! the window, the rolling state, and the relay command. No heap, no `dyn`.

pub mod context;
pub mod states;

use context::CycleContext;
use log::debug;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all cycle states.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    /// Waiting for the collection interval to elapse.
    Idle = 0,
    /// One sample collected: decide, drive relay command, append to window.
    Sampling = 1,
    /// Window full: compress it into a report and reset.
    Aggregating = 2,
}

impl StateId {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 3;

    /// Convert a `u8` index back to `StateId`. Panics on out-of-range in
    /// debug builds; returns `Idle` in release (safe quiescent fallback).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::Sampling,
            2 => Self::Aggregating,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Idle
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn = fn(&mut CycleContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut CycleContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine. Owns the state table and tracks the
/// current state; the mutable [`CycleContext`] is threaded through every
/// handler call.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut CycleContext) {
        debug!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick: call `on_update` for the current state
    /// and, if it returns `Some(next)`, execute the transition
    /// (`on_exit(current)` → update pointer → `on_enter(next)`).
    pub fn tick(&mut self, ctx: &mut CycleContext) {
        let next = (self.table[self.current].on_update)(ctx);
        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut CycleContext) {
        let next_idx = next_id as usize;

        debug!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::context::CycleContext;
    use super::*;
    use crate::aggregate::AggregationOutcome;
    use crate::config::{SoilConfig, WINDOW_CAPACITY};
    use crate::policy::Reason;
    use crate::sample::SoilSample;

    fn make_ctx() -> CycleContext {
        CycleContext::new(SoilConfig::default())
    }

    fn make_fsm() -> Fsm {
        Fsm::new(states::build_state_table(), StateId::Idle)
    }

    fn sample(temp: f32, moisture: f32, salinity: f32, at_ms: u64) -> SoilSample {
        SoilSample {
            soil_temperature_c: temp,
            soil_moisture_percent: moisture,
            salinity_ds_m: salinity,
            collected_at_ms: at_ms,
        }
    }

    /// Tick until the machine settles back in Idle (bounded).
    fn settle(fsm: &mut Fsm, ctx: &mut CycleContext) {
        fsm.tick(ctx);
        for _ in 0..StateId::COUNT {
            if fsm.current_state() == StateId::Idle {
                break;
            }
            fsm.tick(ctx);
        }
    }

    #[test]
    fn starts_in_idle() {
        let fsm = make_fsm();
        assert_eq!(fsm.current_state(), StateId::Idle);
    }

    #[test]
    fn idle_stays_without_pending_sample() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_state(), StateId::Idle);
        assert_eq!(ctx.window.len(), 0);
    }

    #[test]
    fn pending_sample_runs_one_collection_cycle() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);

        ctx.now_ms = 900_000;
        ctx.pending_sample = Some(sample(25.0, 20.0, 1.0, 900_000));
        settle(&mut fsm, &mut ctx);

        assert_eq!(fsm.current_state(), StateId::Idle);
        assert_eq!(ctx.window.len(), 1);
        assert_eq!(ctx.sample_seq, 1);
        assert_eq!(ctx.last_collection_ms, 900_000);
        // Moisture 20% < 30% → relay commanded on.
        assert!(ctx.command.active);
        let (_, verdict) = ctx.collected.expect("collected sample recorded");
        assert_eq!(verdict.reason, Reason::LowMoisture);
    }

    #[test]
    fn filling_the_window_aggregates_in_the_same_settle() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);

        for i in 0..WINDOW_CAPACITY {
            ctx.now_ms = (i as u64 + 1) * 900_000;
            ctx.pending_sample = Some(sample(20.0 + i as f32, 50.0, 1.0, ctx.now_ms));
            settle(&mut fsm, &mut ctx);
            ctx.collected = None;
        }

        assert_eq!(fsm.current_state(), StateId::Idle);
        assert!(ctx.window.is_empty(), "window cleared after aggregation");
        match ctx.pending_report.take() {
            Some(AggregationOutcome::Report(r)) => {
                assert_eq!(r.sample_count, WINDOW_CAPACITY);
                // temps 20..35, trimmed of 20 and 35 → mean 27.5
                assert!((r.trimmed_mean_c - 27.5).abs() < 1e-4);
            }
            other => panic!("expected a window report, got {other:?}"),
        }
        assert!((ctx.rolling.last_four_hour_mean_c - 27.5).abs() < 1e-4);
    }

    #[test]
    fn settle_without_staged_sample_collects_nothing() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);

        // No pending sample: the machine must not decide or append.
        settle(&mut fsm, &mut ctx);
        assert_eq!(ctx.window.len(), 0);
        assert!(ctx.collected.is_none());
    }

    #[test]
    fn state_id_from_index_roundtrip() {
        for i in 0..StateId::COUNT {
            let id = StateId::from_index(i);
            assert_eq!(id as usize, i);
        }
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn state_id_from_invalid_index_returns_idle() {
        let id = StateId::from_index(99);
        assert_eq!(id, StateId::Idle);
    }
}
