//! Compute-vs-memory bound classification against the declared peaks.

use gemm_primitives::ReferencePeaks;

use crate::metrics::Metrics;

/// Which resource's utilization dominates for a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundBy {
    Compute,
    Memory,
}

impl BoundBy {
    /// Report label, matching the per-configuration output lines.
    pub fn label(&self) -> &'static str {
        match self {
            BoundBy::Compute => "gflops",
            BoundBy::Memory => "memory",
        }
    }
}

/// Utilization of both peaks and the dominating resource.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub flops_percent_of_peak: f64,
    pub bandwidth_percent_of_peak: f64,
    pub bound_by: BoundBy,
    pub bound_percent: f64,
}

/// Compare utilization of the two peaks.
///
/// The comparison is strict: equal utilization classifies as Memory, since
/// compute headroom is the one spent first.
pub fn classify(metrics: &Metrics, peaks: &ReferencePeaks) -> Classification {
    let flops_percent_of_peak = metrics.flops_per_second / peaks.flops * 100.0;
    let bandwidth_percent_of_peak = metrics.bytes_per_second / peaks.bytes_per_sec * 100.0;

    let bound_by = if flops_percent_of_peak > bandwidth_percent_of_peak {
        BoundBy::Compute
    } else {
        BoundBy::Memory
    };

    Classification {
        flops_percent_of_peak,
        bandwidth_percent_of_peak,
        bound_by,
        bound_percent: flops_percent_of_peak.max(bandwidth_percent_of_peak),
    }
}
