//! Concrete state handler functions and table builder.
//!
//! Each state is three plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!  IDLE ──[sample pending]──▶ SAMPLING
//!    ▲                           │
//!    │      [window not full]    │ [window full]
//!    ├───────────────────────────┤
//!    │                           ▼
//!    └──[report stashed]── AGGREGATING
//! ```
//!
//! The service reads one sample into the context when the collection
//! interval elapses; the machine then runs the whole
//! collect → decide → append (→ aggregate) cycle and settles back in Idle
//! within the same poll. There is no terminal state.

use super::context::CycleContext;
use super::{StateDescriptor, StateId};
use crate::policy;
use log::{info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table. Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: None,
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1 — Sampling
        StateDescriptor {
            id: StateId::Sampling,
            name: "Sampling",
            on_enter: Some(sampling_enter),
            on_exit: None,
            on_update: sampling_update,
        },
        // Index 2 — Aggregating
        StateDescriptor {
            id: StateId::Aggregating,
            name: "Aggregating",
            on_enter: Some(aggregating_enter),
            on_exit: None,
            on_update: aggregating_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state — waiting for the collection interval
// ═══════════════════════════════════════════════════════════════════════════

fn idle_update(ctx: &mut CycleContext) -> Option<StateId> {
    // The service only stages a sample when the interval has elapsed.
    if ctx.pending_sample.is_some() {
        return Some(StateId::Sampling);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  SAMPLING state — collect, decide, append
// ═══════════════════════════════════════════════════════════════════════════

fn sampling_enter(ctx: &mut CycleContext) {
    let Some(sample) = ctx.pending_sample.take() else {
        // Reachable only if the machine is driven without a staged sample;
        // nothing to collect, the update handler returns to Idle.
        warn!("SAMPLING entered with no staged sample");
        return;
    };

    ctx.sample_seq = ctx.sample_seq.wrapping_add(1);

    let verdict = policy::decide(&sample, &ctx.rolling, &ctx.config);
    ctx.command.active = verdict.irrigate;
    ctx.collected = Some((sample, verdict));

    // The reference time for the next interval is the sample timestamp,
    // not the poll clock: processing latency must not drift the schedule.
    ctx.last_collection_ms = sample.collected_at_ms;

    let full = ctx.window.append(sample);
    info!(
        "SAMPLING: #{:02} {} | {} ({}) | window {}/{}",
        ctx.sample_seq,
        sample.serial_line(),
        if verdict.irrigate { "IRRIGATE" } else { "hold" },
        verdict.reason,
        ctx.window.len(),
        crate::config::WINDOW_CAPACITY,
    );
    debug_assert!(full == ctx.window.is_full());
}

fn sampling_update(ctx: &mut CycleContext) -> Option<StateId> {
    if ctx.window.is_full() {
        Some(StateId::Aggregating)
    } else {
        Some(StateId::Idle)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  AGGREGATING state — window full, compress and reset
// ═══════════════════════════════════════════════════════════════════════════

fn aggregating_enter(ctx: &mut CycleContext) {
    let outcome = ctx.window.aggregate_and_reset(ctx.now_ms, &mut ctx.rolling);
    info!(
        "AGGREGATING: window compressed, rolling mean {:.2} °C",
        ctx.rolling.last_four_hour_mean_c
    );
    ctx.pending_report = Some(outcome);
}

fn aggregating_update(_ctx: &mut CycleContext) -> Option<StateId> {
    Some(StateId::Idle)
}
