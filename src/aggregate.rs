//! Windowed trimmed-mean aggregation.
//!
//! The [`WindowAggregator`] owns the bounded sample window. Samples are
//! appended in collection order; when the window fills, the controller asks
//! for an aggregate-and-reset, which compresses the window into an
//! [`AggregationReport`] and overwrites the rolling decision state with the
//! trimmed mean temperature.
//!
//! The window is a fixed-capacity `heapless::Vec` — no allocation per cycle,
//! length can never exceed [`WINDOW_CAPACITY`], and a completed aggregation
//! clears it atomically. Nothing from a prior cycle survives a reset.

use serde::{Deserialize, Serialize};

use crate::config::WINDOW_CAPACITY;
use crate::sample::SoilSample;

/// Fewer samples than this and a trimmed mean is meaningless: after
/// dropping one minimum and one maximum, nothing would remain.
pub const MIN_SAMPLES_FOR_MEAN: usize = 3;

// ---------------------------------------------------------------------------
// Rolling decision state
// ---------------------------------------------------------------------------

/// The single scalar carried across cycles: the trimmed mean soil
/// temperature of the last completed window. Written only by
/// [`WindowAggregator::aggregate_and_reset`], read only by the policy.
/// Initialised to 0.0 at boot (no history yet).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RollingState {
    pub last_four_hour_mean_c: f32,
}

// ---------------------------------------------------------------------------
// Aggregation output
// ---------------------------------------------------------------------------

/// End-of-window summary. Ephemeral: produced once per full window,
/// emitted through the report sink, never retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationReport {
    /// Samples that went into this window.
    pub sample_count: usize,
    /// Lowest temperature removed before averaging.
    pub min_temperature_c: f32,
    /// Highest temperature removed before averaging.
    pub max_temperature_c: f32,
    /// Arithmetic mean of the remaining `n - 2` temperatures.
    pub trimmed_mean_c: f32,
    /// Processing timestamp (milliseconds).
    pub generated_at_ms: u64,
    /// Raw samples in collection order.
    pub samples: heapless::Vec<SoilSample, WINDOW_CAPACITY>,
}

/// Outcome of an aggregation request.
#[derive(Debug, Clone)]
pub enum AggregationOutcome {
    /// Window held enough samples; mean computed, rolling state updated.
    Report(AggregationReport),
    /// Fewer than [`MIN_SAMPLES_FOR_MEAN`] samples: no mean is computed and
    /// the rolling state is left untouched.
    InsufficientData { sample_count: usize },
}

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

/// Accumulates samples into a bounded window and compresses full windows
/// into trimmed-mean reports. Exclusive owner of the window.
#[derive(Debug, Default)]
pub struct WindowAggregator {
    window: heapless::Vec<SoilSample, WINDOW_CAPACITY>,
}

impl WindowAggregator {
    pub fn new() -> Self {
        Self {
            window: heapless::Vec::new(),
        }
    }

    /// Append a sample in collection order. Returns `true` when the window
    /// has just become (or already is) full and must be aggregated before
    /// the next append.
    pub fn append(&mut self, sample: SoilSample) -> bool {
        if self.window.push(sample).is_err() {
            // Controller contract: aggregate fires in the same poll that
            // fills the window, so an overflowing push indicates a caller
            // bug. The sample is dropped rather than corrupting the window.
            debug_assert!(false, "append on a full window");
            return true;
        }
        self.window.is_full()
    }

    /// Compress the window into a report and reset.
    ///
    /// Sorts the window's temperatures ascending and removes exactly one
    /// element at each end **by sorted position** — if several samples share
    /// the minimum value, only the first sorted occurrence is dropped (same
    /// for the maximum). The arithmetic mean of the remaining `n - 2` values
    /// becomes the new rolling four-hour mean.
    ///
    /// With fewer than [`MIN_SAMPLES_FOR_MEAN`] samples the request reports
    /// [`AggregationOutcome::InsufficientData`]: no mean, no rolling-state
    /// write, and the window is left as-is.
    pub fn aggregate_and_reset(
        &mut self,
        generated_at_ms: u64,
        state: &mut RollingState,
    ) -> AggregationOutcome {
        let n = self.window.len();
        if n < MIN_SAMPLES_FOR_MEAN {
            return AggregationOutcome::InsufficientData { sample_count: n };
        }

        let mut temperatures: heapless::Vec<f32, WINDOW_CAPACITY> = self
            .window
            .iter()
            .map(|s| s.soil_temperature_c)
            .collect();
        temperatures.sort_unstable_by(f32::total_cmp);

        let min_temperature_c = temperatures[0];
        let max_temperature_c = temperatures[n - 1];

        // One min and one max off the ends; mean of what remains.
        let kept = &temperatures[1..n - 1];
        let trimmed_mean_c = kept.iter().sum::<f32>() / kept.len() as f32;

        state.last_four_hour_mean_c = trimmed_mean_c;

        let report = AggregationReport {
            sample_count: n,
            min_temperature_c,
            max_temperature_c,
            trimmed_mean_c,
            generated_at_ms,
            samples: self.window.clone(),
        };

        self.window.clear();
        AggregationOutcome::Report(report)
    }

    /// Samples currently held.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.window.is_full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(temp: f32) -> SoilSample {
        SoilSample {
            soil_temperature_c: temp,
            soil_moisture_percent: 50.0,
            salinity_ds_m: 1.0,
            collected_at_ms: 0,
        }
    }

    fn fill(agg: &mut WindowAggregator, temps: &[f32]) {
        for &t in temps {
            agg.append(sample(t));
        }
    }

    #[test]
    fn three_samples_degenerate_to_middle_value() {
        let mut agg = WindowAggregator::new();
        let mut state = RollingState::default();
        fill(&mut agg, &[10.0, 20.0, 30.0]);

        match agg.aggregate_and_reset(1_000, &mut state) {
            AggregationOutcome::Report(r) => {
                assert_eq!(r.sample_count, 3);
                assert_eq!(r.min_temperature_c, 10.0);
                assert_eq!(r.max_temperature_c, 30.0);
                assert_eq!(r.trimmed_mean_c, 20.0);
                assert_eq!(r.generated_at_ms, 1_000);
            }
            AggregationOutcome::InsufficientData { .. } => panic!("expected report"),
        }
        assert_eq!(state.last_four_hour_mean_c, 20.0);
        assert!(agg.is_empty());
    }

    #[test]
    fn outlier_is_trimmed_not_averaged() {
        let mut agg = WindowAggregator::new();
        let mut state = RollingState::default();
        fill(&mut agg, &[1.0, 2.0, 3.0, 4.0, 100.0]);

        match agg.aggregate_and_reset(0, &mut state) {
            AggregationOutcome::Report(r) => {
                assert_eq!(r.min_temperature_c, 1.0);
                assert_eq!(r.max_temperature_c, 100.0);
                assert!((r.trimmed_mean_c - 3.0).abs() < 1e-6);
            }
            AggregationOutcome::InsufficientData { .. } => panic!("expected report"),
        }
    }

    #[test]
    fn trimmed_mean_invariant_under_input_order() {
        let orderings: [&[f32]; 3] = [
            &[1.0, 2.0, 3.0, 4.0, 100.0],
            &[100.0, 4.0, 3.0, 2.0, 1.0],
            &[3.0, 100.0, 1.0, 4.0, 2.0],
        ];
        for temps in orderings {
            let mut agg = WindowAggregator::new();
            let mut state = RollingState::default();
            fill(&mut agg, temps);
            match agg.aggregate_and_reset(0, &mut state) {
                AggregationOutcome::Report(r) => {
                    assert!((r.trimmed_mean_c - 3.0).abs() < 1e-6);
                }
                AggregationOutcome::InsufficientData { .. } => panic!("expected report"),
            }
        }
    }

    #[test]
    fn duplicate_minimum_drops_only_one_occurrence() {
        let mut agg = WindowAggregator::new();
        let mut state = RollingState::default();
        // Two samples share the minimum 5.0. Only one is excluded:
        // kept = [5.0, 10.0] → mean 7.5.
        fill(&mut agg, &[5.0, 5.0, 10.0, 20.0]);
        match agg.aggregate_and_reset(0, &mut state) {
            AggregationOutcome::Report(r) => {
                assert_eq!(r.min_temperature_c, 5.0);
                assert_eq!(r.max_temperature_c, 20.0);
                assert!((r.trimmed_mean_c - 7.5).abs() < 1e-6);
            }
            AggregationOutcome::InsufficientData { .. } => panic!("expected report"),
        }
    }

    #[test]
    fn insufficient_data_never_touches_rolling_state() {
        let mut agg = WindowAggregator::new();
        let mut state = RollingState {
            last_four_hour_mean_c: 27.5,
        };
        fill(&mut agg, &[10.0, 20.0]);

        match agg.aggregate_and_reset(0, &mut state) {
            AggregationOutcome::InsufficientData { sample_count } => {
                assert_eq!(sample_count, 2);
            }
            AggregationOutcome::Report(_) => panic!("2 samples must not produce a mean"),
        }
        assert_eq!(state.last_four_hour_mean_c, 27.5);
        // Window is left intact; the samples are not discarded.
        assert_eq!(agg.len(), 2);
    }

    #[test]
    fn reset_leaves_no_residue_for_the_next_cycle() {
        let mut agg = WindowAggregator::new();
        let mut state = RollingState::default();
        fill(&mut agg, &[40.0, 41.0, 42.0, 43.0]);
        let _ = agg.aggregate_and_reset(0, &mut state);
        assert!(agg.is_empty());

        // Refill with cooler temperatures: the new mean must reflect only
        // the new window, not the hot one that preceded it.
        fill(&mut agg, &[10.0, 11.0, 12.0]);
        match agg.aggregate_and_reset(0, &mut state) {
            AggregationOutcome::Report(r) => {
                assert_eq!(r.sample_count, 3);
                assert_eq!(r.trimmed_mean_c, 11.0);
            }
            AggregationOutcome::InsufficientData { .. } => panic!("expected report"),
        }
        assert_eq!(state.last_four_hour_mean_c, 11.0);
    }

    #[test]
    fn append_reports_full_exactly_at_capacity() {
        let mut agg = WindowAggregator::new();
        for i in 0..WINDOW_CAPACITY {
            let full = agg.append(sample(20.0 + i as f32));
            assert_eq!(full, i == WINDOW_CAPACITY - 1, "at sample {i}");
        }
        assert!(agg.is_full());
    }

    #[test]
    fn report_preserves_collection_order() {
        let mut agg = WindowAggregator::new();
        let mut state = RollingState::default();
        let temps = [30.0, 10.0, 20.0, 25.0];
        fill(&mut agg, &temps);
        match agg.aggregate_and_reset(0, &mut state) {
            AggregationOutcome::Report(r) => {
                let collected: heapless::Vec<f32, WINDOW_CAPACITY> =
                    r.samples.iter().map(|s| s.soil_temperature_c).collect();
                assert_eq!(collected.as_slice(), &temps);
            }
            AggregationOutcome::InsufficientData { .. } => panic!("expected report"),
        }
    }
}
