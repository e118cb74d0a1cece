//! Benchmark error taxonomy.
//!
//! Three classes, all fatal for the run: startup configuration problems,
//! backend operation failures, and the zero-elapsed guard in the metrics
//! path. No retries anywhere -- a retried measurement would mask the
//! driver/device instability it is supposed to expose.

use gemm_primitives::BackendError;

#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// Invalid startup configuration (reference peaks).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A GEMM submission, completion wait, or timestamp read failed. The
    /// whole run aborts: a partial sweep would misrepresent the hardware.
    #[error("benchmark operation failed: {0}")]
    Backend(#[from] BackendError),

    /// Accumulated device time was zero; deriving throughput from it would
    /// produce Inf/NaN rather than a measurement.
    #[error("total elapsed time is zero; refusing to derive throughput")]
    ZeroElapsed,
}
