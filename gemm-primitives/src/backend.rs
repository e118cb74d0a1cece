//! Compute-backend contract the benchmark harness drives.
//!
//! The harness never talks to Metal directly; it submits GEMM operations
//! through this trait, waits on them, and reads device-side execution
//! intervals. The MPS implementation lives in [`crate::mps`]; tests drive the
//! harness with in-memory fakes.

use thiserror::Error;

/// Failure modes of the compute backend.
///
/// None of these are retried: the benchmark measures first-attempt device
/// behavior, and instability is itself diagnostic information.
#[derive(Debug, Error)]
pub enum BackendError {
    /// No Metal device is available on this system.
    #[error("no compatible Metal device found")]
    DeviceNotFound,

    /// Command queue creation failed.
    #[error("failed to create command queue")]
    CommandQueue,

    /// Command buffer creation failed.
    #[error("failed to create command buffer")]
    CommandBuffer,

    /// Device buffer allocation failed.
    #[error("failed to allocate {0} bytes of device storage")]
    Allocation(usize),

    /// The device reported an execution error for a committed operation.
    #[error("GPU execution failed: {0}")]
    Execution(String),

    /// The device reported an absent or non-positive execution interval.
    /// A zero interval is a measurement failure, never a valid fast result.
    #[error("device reported an invalid execution interval ({0} s)")]
    InvalidTiming(f64),
}

/// One GEMM configuration prepared for repeated submission.
///
/// An implementor owns the operand/result storage and whatever kernel state
/// the device needs; each `submit_gemm` enqueues one `C := op(A) * op(B)`
/// (alpha = 1, beta = 0) and returns a waitable handle.
pub trait ComputeBackend {
    /// Handle for one in-flight operation.
    type Op;

    /// Enqueue one GEMM and return its handle. Does not block.
    fn submit_gemm(&mut self) -> Result<Self::Op, BackendError>;

    /// Block until the operation completes; fails if the device reports an
    /// execution error.
    fn wait(&self, op: &Self::Op) -> Result<(), BackendError>;

    /// Device-measured execution interval for a completed operation, in
    /// seconds. Only valid after [`ComputeBackend::wait`] has returned Ok.
    fn elapsed_seconds(&self, op: &Self::Op) -> Result<f64, BackendError>;
}
