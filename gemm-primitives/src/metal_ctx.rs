//! Metal device initialization: device and command queue.
//!
//! No shader library is loaded here; the GEMM kernels come from Metal
//! Performance Shaders.

use objc2::rc::Retained;
use objc2::runtime::ProtocolObject;
use objc2_metal::{MTLCommandQueue, MTLCreateSystemDefaultDevice, MTLDevice};

use crate::backend::BackendError;

/// Core GPU state: device and command queue.
pub struct MetalContext {
    pub device: Retained<ProtocolObject<dyn MTLDevice>>,
    pub queue: Retained<ProtocolObject<dyn MTLCommandQueue>>,
}

impl MetalContext {
    /// Initialize the system default Metal device and a command queue.
    pub fn new() -> Result<Self, BackendError> {
        let device = MTLCreateSystemDefaultDevice().ok_or(BackendError::DeviceNotFound)?;
        let queue = device
            .newCommandQueue()
            .ok_or(BackendError::CommandQueue)?;

        Ok(Self { device, queue })
    }
}
