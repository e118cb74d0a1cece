//! MPS-backed GEMM execution with device-side timing.
//!
//! One [`MpsGemm`] holds the operand/result matrices and the
//! `MPSMatrixMultiplication` kernel for a single configuration; the kernel is
//! encoded onto a fresh command buffer per submission. Execution intervals
//! come from Metal's GPUStartTime/GPUEndTime hardware timestamps, which give
//! device busy-time excluding CPU-side dispatch overhead and queue latency.

use std::ptr::NonNull;

use objc2::rc::Retained;
use objc2::runtime::ProtocolObject;
use objc2::AllocAnyThread;
use objc2_metal::{
    MTLBuffer, MTLCommandBuffer, MTLCommandBufferStatus, MTLCommandQueue, MTLDevice,
    MTLResourceOptions,
};
use objc2_metal_performance_shaders::{
    MPSDataType, MPSMatrix, MPSMatrixDescriptor, MPSMatrixMultiplication,
};

use crate::backend::{BackendError, ComputeBackend};
use crate::metal_ctx::MetalContext;
use crate::types::GemmConfig;

/// One GEMM configuration prepared for repeated submission.
pub struct MpsGemm {
    queue: Retained<ProtocolObject<dyn MTLCommandQueue>>,
    kernel: Retained<MPSMatrixMultiplication>,
    left: Retained<MPSMatrix>,
    right: Retained<MPSMatrix>,
    result: Retained<MPSMatrix>,
}

impl MpsGemm {
    /// Allocate matrices and build the MPS kernel for `config`.
    ///
    /// `left_data` and `right_data` fill the operand buffers; their lengths
    /// must equal the operand element counts (`m*k` and `k*n`). The result
    /// matrix starts zeroed; beta = 0 overwrites it on every call.
    pub fn new(
        ctx: &MetalContext,
        config: &GemmConfig,
        left_data: &[f32],
        right_data: &[f32],
    ) -> Result<Self, BackendError> {
        assert_eq!(left_data.len(), config.m * config.k);
        assert_eq!(right_data.len(), config.k * config.n);

        let (lr, lc) = config.left_shape();
        let (rr, rc) = config.right_shape();
        let (cr, cc) = config.result_shape();

        let left = alloc_matrix_with_data(&ctx.device, lr, lc, left_data)?;
        let right = alloc_matrix_with_data(&ctx.device, rr, rc, right_data)?;
        let result = alloc_matrix(&ctx.device, cr, cc)?;

        let kernel = unsafe {
            MPSMatrixMultiplication::initWithDevice_transposeLeft_transposeRight_resultRows_resultColumns_interiorColumns_alpha_beta(
                MPSMatrixMultiplication::alloc(),
                &ctx.device,
                config.transpose_left,
                config.transpose_right,
                config.m,
                config.n,
                config.k,
                1.0,
                0.0,
            )
        };

        Ok(Self {
            queue: ctx.queue.clone(),
            kernel,
            left,
            right,
            result,
        })
    }
}

impl ComputeBackend for MpsGemm {
    type Op = Retained<ProtocolObject<dyn MTLCommandBuffer>>;

    fn submit_gemm(&mut self) -> Result<Self::Op, BackendError> {
        let cmd = self
            .queue
            .commandBuffer()
            .ok_or(BackendError::CommandBuffer)?;

        unsafe {
            self.kernel
                .encodeToCommandBuffer_leftMatrix_rightMatrix_resultMatrix(
                    &cmd,
                    &self.left,
                    &self.right,
                    &self.result,
                );
        }

        cmd.commit();
        Ok(cmd)
    }

    fn wait(&self, op: &Self::Op) -> Result<(), BackendError> {
        op.waitUntilCompleted();

        if op.status() == MTLCommandBufferStatus::Error {
            return Err(BackendError::Execution(format!(
                "command buffer error: {:?}",
                op.error()
            )));
        }

        Ok(())
    }

    fn elapsed_seconds(&self, op: &Self::Op) -> Result<f64, BackendError> {
        let start = op.GPUStartTime();
        let end = op.GPUEndTime();
        let elapsed = end - start;

        // Zero timestamps mean the driver never scheduled the work.
        if start == 0.0 || end == 0.0 || elapsed <= 0.0 {
            return Err(BackendError::InvalidTiming(elapsed));
        }

        Ok(elapsed)
    }
}

/// Allocate a zeroed rows x cols Float32 MPS matrix (StorageModeShared).
fn alloc_matrix(
    device: &ProtocolObject<dyn MTLDevice>,
    rows: usize,
    cols: usize,
) -> Result<Retained<MPSMatrix>, BackendError> {
    let bytes = rows * cols * std::mem::size_of::<f32>();
    let buffer = device
        .newBufferWithLength_options(bytes, MTLResourceOptions::StorageModeShared)
        .ok_or(BackendError::Allocation(bytes))?;

    Ok(wrap_matrix(&buffer, rows, cols))
}

/// Allocate a rows x cols Float32 MPS matrix initialized with `data`.
fn alloc_matrix_with_data(
    device: &ProtocolObject<dyn MTLDevice>,
    rows: usize,
    cols: usize,
    data: &[f32],
) -> Result<Retained<MPSMatrix>, BackendError> {
    assert_eq!(data.len(), rows * cols);

    let bytes = std::mem::size_of_val(data);
    let buffer = unsafe {
        let ptr =
            NonNull::new(data.as_ptr() as *mut std::ffi::c_void).expect("data pointer is null");
        device
            .newBufferWithBytes_length_options(ptr, bytes, MTLResourceOptions::StorageModeShared)
            .ok_or(BackendError::Allocation(bytes))?
    };

    Ok(wrap_matrix(&buffer, rows, cols))
}

/// Wrap a Metal buffer in an MPSMatrix with a row-major Float32 descriptor.
fn wrap_matrix(
    buffer: &Retained<ProtocolObject<dyn MTLBuffer>>,
    rows: usize,
    cols: usize,
) -> Retained<MPSMatrix> {
    let row_bytes = cols * std::mem::size_of::<f32>();
    unsafe {
        let desc = MPSMatrixDescriptor::matrixDescriptorWithRows_columns_rowBytes_dataType(
            rows,
            cols,
            row_bytes,
            MPSDataType::Float32,
        );
        MPSMatrix::initWithBuffer_descriptor(MPSMatrix::alloc(), buffer, &desc)
    }
}
