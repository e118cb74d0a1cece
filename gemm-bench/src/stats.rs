//! Sample statistics over per-call device times.
//!
//! Reporting only: the throughput metrics always use the raw sum, so no
//! outlier filtering happens here -- dropping samples would make the
//! displayed spread disagree with the measured total.

/// Spread of the per-call intervals for one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub stddev: f64,
    pub cv_percent: f64,
}

/// Compute mean/min/max/stddev/CV from timing samples.
pub fn sample_stats(samples: &[f64]) -> SampleStats {
    if samples.is_empty() {
        return SampleStats {
            mean: 0.0,
            min: 0.0,
            max: 0.0,
            stddev: 0.0,
            cv_percent: 0.0,
        };
    }

    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let stddev = if samples.len() > 1 {
        let variance = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        variance.sqrt()
    } else {
        0.0
    };

    let cv_percent = if mean > 0.0 {
        stddev / mean * 100.0
    } else {
        0.0
    };

    SampleStats {
        mean,
        min,
        max,
        stddev,
        cv_percent,
    }
}
