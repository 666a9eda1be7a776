//! Irrigation decision policy.
//!
//! A priority-ordered list of rules evaluated short-circuit: the first rule
//! that produces a verdict wins and later rules are never consulted. The
//! order is load-bearing — a bone-dry soil must irrigate even when salinity
//! says "monitor". Each rule is a plain `fn` in a `const` table, so new
//! rules can be added and unit-tested independently without touching the
//! evaluation loop.
//!
//! ```text
//!   1. moisture < MOISTURE_MIN            → irrigate  "low moisture"
//!   2. rolling 4h mean > TEMP_CRITICAL    → irrigate  "high thermal demand"
//!   3. salinity > SALINITY_MAX
//!        moisture < leach co-threshold    → irrigate  "… leach"
//!        otherwise                        → hold      "… monitor"
//!   4. fallthrough                        → hold      "normal conditions"
//! ```
//!
//! The policy is a pure function of the sample, the rolling decision state,
//! and the configured thresholds. It is total and never panics. The caller
//! (the cycle controller) drives the relay; this module only decides.

use crate::aggregate::RollingState;
use crate::config::SoilConfig;
use crate::sample::SoilSample;

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Why the policy reached its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// Soil moisture below the dry threshold.
    LowMoisture,
    /// Rolling four-hour mean temperature above the critical threshold.
    HighThermalDemand,
    /// High salinity with dry soil — irrigate to leach salts downward.
    SalinityLeach,
    /// High salinity but soil is moist — watering would not help; watch it.
    SalinityMonitor,
    /// Nothing out of range.
    Normal,
}

impl Reason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LowMoisture => "low moisture",
            Self::HighThermalDemand => "high thermal demand",
            Self::SalinityLeach => "high salinity + dry soil: leach",
            Self::SalinityMonitor => "high salinity: monitor",
            Self::Normal => "normal conditions",
        }
    }
}

impl core::fmt::Display for Reason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The policy's output: drive the relay or not, and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub irrigate: bool,
    pub reason: Reason,
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// One rule: returns `Some(verdict)` to decide, `None` to pass to the next.
type Rule = fn(&SoilSample, &RollingState, &SoilConfig) -> Option<Verdict>;

/// Evaluation order is significant; do not reorder.
const RULES: [Rule; 4] = [
    rule_low_moisture,
    rule_thermal_demand,
    rule_salinity,
    rule_normal,
];

fn rule_low_moisture(
    sample: &SoilSample,
    _state: &RollingState,
    config: &SoilConfig,
) -> Option<Verdict> {
    (sample.soil_moisture_percent < config.moisture_min_percent).then_some(Verdict {
        irrigate: true,
        reason: Reason::LowMoisture,
    })
}

fn rule_thermal_demand(
    _sample: &SoilSample,
    state: &RollingState,
    config: &SoilConfig,
) -> Option<Verdict> {
    (state.last_four_hour_mean_c > config.mean_temp_critical_c).then_some(Verdict {
        irrigate: true,
        reason: Reason::HighThermalDemand,
    })
}

fn rule_salinity(
    sample: &SoilSample,
    _state: &RollingState,
    config: &SoilConfig,
) -> Option<Verdict> {
    if sample.salinity_ds_m <= config.salinity_max_ds_m {
        return None;
    }
    if sample.soil_moisture_percent < config.leach_moisture_percent {
        Some(Verdict {
            irrigate: true,
            reason: Reason::SalinityLeach,
        })
    } else {
        Some(Verdict {
            irrigate: false,
            reason: Reason::SalinityMonitor,
        })
    }
}

fn rule_normal(
    _sample: &SoilSample,
    _state: &RollingState,
    _config: &SoilConfig,
) -> Option<Verdict> {
    Some(Verdict {
        irrigate: false,
        reason: Reason::Normal,
    })
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Evaluate the rule table in priority order. Always returns a verdict:
/// the final fallthrough rule matches unconditionally.
pub fn decide(sample: &SoilSample, state: &RollingState, config: &SoilConfig) -> Verdict {
    for rule in RULES {
        if let Some(verdict) = rule(sample, state, config) {
            return verdict;
        }
    }
    // Unreachable while rule_normal terminates the table; kept so the
    // function stays total if the table is ever edited.
    Verdict {
        irrigate: false,
        reason: Reason::Normal,
    }
}
