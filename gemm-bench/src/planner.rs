//! Iteration planning: derive warmup and timed call counts from a rough
//! per-call cost estimate, so tiny problems get many calls (statistical
//! stability) and huge problems get few (bounded wall-clock time).

use gemm_primitives::{GemmConfig, ReferencePeaks};

/// Lower bound on timed calls, for problems so large that a single call
/// already exceeds the measurement budget.
pub const MIN_TIMED_CALLS: u32 = 5;
/// Upper bound on timed calls, bounding total benchmark time for tiny shapes.
pub const MAX_TIMED_CALLS: u32 = 200;
/// Measurement budget: two seconds of work at the declared peak rate.
const TARGET_PEAK_SECONDS: f64 = 2.0;

/// Call counts for one configuration. Computed fresh per sweep entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationPlan {
    pub warmup_calls: u32,
    pub timed_calls: u32,
}

/// Derive the iteration plan for one configuration.
///
/// The cost estimate uses the conventional `2*M*N*K` flop count; transpose
/// flags and alpha/beta do not change the asymptotic op count. Warmup is a
/// fifth of the timed count, at least one call, to let clocks and driver
/// caches reach steady state before measurement.
pub fn plan(config: &GemmConfig, peaks: &ReferencePeaks) -> IterationPlan {
    let approx_flop = 2.0 * config.m as f64 * config.n as f64 * config.k as f64;
    let gemm_per_sec = approx_flop / peaks.flops;
    let target_calls = TARGET_PEAK_SECONDS / gemm_per_sec;

    let timed_calls = (target_calls.round() as i64)
        .clamp(i64::from(MIN_TIMED_CALLS), i64::from(MAX_TIMED_CALLS)) as u32;
    let warmup_calls = (timed_calls / 5).max(1);

    IterationPlan {
        warmup_calls,
        timed_calls,
    }
}
