//! Sweep driver: fixed shape table crossed with both transpose flags.

use gemm_primitives::{BackendError, ComputeBackend, GemmConfig, ReferencePeaks};

use crate::classify::{classify, Classification};
use crate::error::BenchError;
use crate::executor::execute;
use crate::metrics::{compute_metrics, Metrics};
use crate::planner::{plan, IterationPlan};
use crate::stats::{sample_stats, SampleStats};

/// Shape table, in sweep order: square power-of-two sizes, their off-by-one
/// neighbors (tile-remainder paths), and skewed tall/wide/deep shapes.
pub const SHAPES: [(usize, usize, usize); 11] = [
    (512, 512, 512),
    (1024, 1024, 1024),
    (1025, 1025, 1025),
    (2048, 2048, 2048),
    (2049, 2049, 2049),
    (64, 2048, 64),
    (2048, 64, 2048),
    (2048, 2048, 64),
    (2048, 64, 64),
    (64, 2048, 2048),
    (64, 64, 2048),
];

/// One finished configuration measurement.
#[derive(Debug, Clone)]
pub struct SweepRecord {
    /// Shape index within the current transpose mode.
    pub index: usize,
    pub config: GemmConfig,
    pub plan: IterationPlan,
    /// Spread of the per-call intervals (reporting only).
    pub call_stats: SampleStats,
    /// Sum of per-call device time, the denominator of both metrics.
    pub total_seconds: f64,
    pub metrics: Metrics,
    pub classification: Classification,
}

/// All 44 configurations in sweep order: transpose-left outermost, then
/// transpose-right, then shape index.
pub fn sweep_configs() -> Vec<(usize, GemmConfig)> {
    let mut configs = Vec::with_capacity(4 * SHAPES.len());
    for transpose_left in [false, true] {
        for transpose_right in [false, true] {
            for (index, &(m, n, k)) in SHAPES.iter().enumerate() {
                configs.push((
                    index,
                    GemmConfig {
                        m,
                        n,
                        k,
                        transpose_left,
                        transpose_right,
                    },
                ));
            }
        }
    }
    configs
}

/// Run the full sweep.
///
/// `make_backend` prepares one backend instance (fresh matrices and kernel)
/// per configuration. The first failure anywhere aborts the whole sweep: a
/// partial result set would misrepresent the hardware.
pub fn run_sweep<B, F>(
    mut make_backend: F,
    peaks: &ReferencePeaks,
    progress: Option<&dyn Fn(&str)>,
) -> Result<Vec<SweepRecord>, BenchError>
where
    B: ComputeBackend,
    F: FnMut(&GemmConfig) -> Result<B, BackendError>,
{
    let mut records = Vec::new();

    for (index, config) in sweep_configs() {
        let label = format!(
            "{} {:2}: {}x{}x{}",
            config.mode_label(),
            index,
            config.m,
            config.n,
            config.k
        );
        if let Some(cb) = progress {
            cb(&format!("{label}: setup"));
        }

        let iteration_plan = plan(&config, peaks);
        let mut backend = make_backend(&config)?;

        if let Some(cb) = progress {
            cb(&format!(
                "{label}: measuring ({} warmup + {} timed)",
                iteration_plan.warmup_calls, iteration_plan.timed_calls
            ));
        }

        let timing = execute(&mut backend, &iteration_plan)?;
        let metrics = compute_metrics(&config, &timing)?;
        let classification = classify(&metrics, peaks);

        records.push(SweepRecord {
            index,
            config,
            plan: iteration_plan,
            call_stats: sample_stats(&timing.samples),
            total_seconds: timing.total_seconds,
            metrics,
            classification,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_eleven_shapes() {
        assert_eq!(SHAPES.len(), 11);
        assert_eq!(SHAPES[0], (512, 512, 512));
        assert_eq!(SHAPES[10], (64, 64, 2048));
    }

    #[test]
    fn cross_product_is_44_configs() {
        let configs = sweep_configs();
        assert_eq!(configs.len(), 44);
    }

    #[test]
    fn order_is_ta_then_tb_then_shape() {
        let configs = sweep_configs();

        // First block: NN over the shape table in order.
        for (i, (index, cfg)) in configs[..11].iter().enumerate() {
            assert_eq!(*index, i);
            assert_eq!(cfg.mode_label(), "NN");
            assert_eq!((cfg.m, cfg.n, cfg.k), SHAPES[i]);
        }

        assert_eq!(configs[11].1.mode_label(), "NT");
        assert_eq!(configs[22].1.mode_label(), "TN");
        assert_eq!(configs[33].1.mode_label(), "TT");

        // Index restarts at every transpose-mode boundary.
        assert_eq!(configs[11].0, 0);
        assert_eq!(configs[22].0, 0);
        assert_eq!(configs[33].0, 0);
        assert_eq!(configs[43].0, 10);
    }

    #[test]
    fn all_dims_positive() {
        for (_, cfg) in sweep_configs() {
            assert!(cfg.m > 0 && cfg.n > 0 && cfg.k > 0);
        }
    }
}
