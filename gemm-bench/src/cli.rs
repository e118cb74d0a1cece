//! Command-line interface.

use clap::Parser;

use gemm_primitives::ReferencePeaks;

use crate::error::BenchError;

/// GPU GEMM roofline benchmark for Apple Silicon
#[derive(Parser, Debug)]
#[command(name = "gemm-bench", version, about)]
pub struct BenchArgs {
    /// Reference peak compute throughput in GFLOP/s
    #[arg(long, value_parser = parse_peak)]
    pub gflops: f64,

    /// Reference peak memory bandwidth in GB/s
    #[arg(long, value_parser = parse_peak)]
    pub gbps: f64,

    /// Write JSON results to file
    #[arg(long)]
    pub json: Option<String>,
}

impl BenchArgs {
    /// Convert the CLI peaks (GFLOP/s, GB/s) into absolute units.
    ///
    /// Re-validates positivity even though the value parser already did:
    /// every later stage divides by these numbers.
    pub fn reference_peaks(&self) -> Result<ReferencePeaks, BenchError> {
        let peaks = ReferencePeaks {
            flops: self.gflops * 1e9,
            bytes_per_sec: self.gbps * 1e9,
        };

        if !(peaks.flops.is_finite() && peaks.flops > 0.0) {
            return Err(BenchError::Config(format!(
                "peak compute throughput must be positive, got {} GFLOP/s",
                self.gflops
            )));
        }
        if !(peaks.bytes_per_sec.is_finite() && peaks.bytes_per_sec > 0.0) {
            return Err(BenchError::Config(format!(
                "peak bandwidth must be positive, got {} GB/s",
                self.gbps
            )));
        }

        Ok(peaks)
    }
}

/// Parse a peak value, rejecting non-positive and non-finite numbers.
fn parse_peak(s: &str) -> Result<f64, String> {
    let v: f64 = s
        .parse()
        .map_err(|e| format!("invalid number '{}': {}", s, e))?;
    if !v.is_finite() || v <= 0.0 {
        return Err(format!("expected a positive finite number, got '{}'", s));
    }
    Ok(v)
}
