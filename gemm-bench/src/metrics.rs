//! Throughput metrics from accumulated device time.
//!
//! Planning uses the rough `2*M*N*K` estimate; the reported numbers use the
//! exact multiply-add count so small-K shapes are not over-credited.

use gemm_primitives::GemmConfig;

use crate::error::BenchError;
use crate::executor::TimingResult;

/// Byte width of the matrix element type (FP32).
pub const ELEMENT_SIZE: usize = std::mem::size_of::<f32>();

/// Achieved throughput for one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub flops_per_second: f64,
    pub bytes_per_second: f64,
}

/// Total floating-point operations across `calls` timed calls: each of the
/// M*N output elements takes K multiplies and K-1 adds.
pub fn total_flop(config: &GemmConfig, calls: usize) -> f64 {
    config.m as f64 * config.n as f64 * (2 * config.k - 1) as f64 * calls as f64
}

/// Total bytes moved across `calls` timed calls: each of the three matrices
/// read or written once per call.
pub fn total_bytes(config: &GemmConfig, calls: usize) -> f64 {
    let elements = config.m * config.k + config.k * config.n + config.m * config.n;
    (elements * ELEMENT_SIZE) as f64 * calls as f64
}

/// Convert accumulated device time into FLOP/s and bytes/s.
///
/// Fails rather than dividing by a non-positive total; Inf/NaN throughput
/// must never reach a report.
pub fn compute_metrics(config: &GemmConfig, timing: &TimingResult) -> Result<Metrics, BenchError> {
    if !(timing.total_seconds > 0.0) {
        return Err(BenchError::ZeroElapsed);
    }

    let calls = timing.samples.len();
    Ok(Metrics {
        flops_per_second: total_flop(config, calls) / timing.total_seconds,
        bytes_per_second: total_bytes(config, calls) / timing.total_seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(m: usize, n: usize, k: usize) -> GemmConfig {
        GemmConfig {
            m,
            n,
            k,
            transpose_left: false,
            transpose_right: false,
        }
    }

    fn timing(total: f64, calls: usize) -> TimingResult {
        TimingResult {
            total_seconds: total,
            samples: vec![total / calls as f64; calls],
        }
    }

    #[test]
    fn exact_flop_count_small_matrix() {
        // 2x2x2: 2*2*(2*2-1) = 12 flop per call.
        assert_eq!(total_flop(&config(2, 2, 2), 1), 12.0);
        assert_eq!(total_flop(&config(2, 2, 2), 10), 120.0);
    }

    #[test]
    fn byte_count_small_matrix() {
        // 2x2x2: three 2x2 matrices, 4 bytes per element = 48 per call.
        assert_eq!(total_bytes(&config(2, 2, 2), 1), 48.0);
        assert_eq!(total_bytes(&config(2, 2, 2), 10), 480.0);
    }

    #[test]
    fn exact_count_differs_from_planning_estimate() {
        // 64x64x64: exact is 64*64*127, the planning estimate is 64^3*2.
        assert_eq!(total_flop(&config(64, 64, 64), 1), 520192.0);
        assert!(total_flop(&config(64, 64, 64), 1) < 2.0 * 64f64.powi(3));
    }

    #[test]
    fn throughput_divides_by_total_seconds() {
        let m = compute_metrics(&config(2, 2, 2), &timing(2.0, 10)).unwrap();
        assert!((m.flops_per_second - 60.0).abs() < 1e-12);
        assert!((m.bytes_per_second - 240.0).abs() < 1e-12);
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let cfg = config(64, 2048, 64);
        let t = timing(0.125, 7);
        assert_eq!(
            compute_metrics(&cfg, &t).unwrap(),
            compute_metrics(&cfg, &t).unwrap()
        );
    }

    #[test]
    fn zero_elapsed_is_an_error_not_infinity() {
        let err = compute_metrics(&config(2, 2, 2), &timing(0.0, 5)).unwrap_err();
        assert!(matches!(err, BenchError::ZeroElapsed));
    }

    #[test]
    fn nan_elapsed_is_an_error() {
        let t = TimingResult {
            total_seconds: f64::NAN,
            samples: vec![0.1],
        };
        assert!(matches!(
            compute_metrics(&config(2, 2, 2), &t).unwrap_err(),
            BenchError::ZeroElapsed
        ));
    }
}
