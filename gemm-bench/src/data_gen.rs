//! Deterministic operand fill.
//!
//! The benchmark never checks numerical results, but the operand buffers are
//! still filled with real values: uninitialized device memory can contain
//! denormal bit patterns, which run at a different rate through the FP
//! pipeline. The fill happens outside the timed window.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded generator for matrix operand data.
pub struct MatrixFill {
    rng: StdRng,
}

impl MatrixFill {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// `rows * cols` f32 values uniform in [-1.0, 1.0).
    pub fn matrix(&mut self, rows: usize, cols: usize) -> Vec<f32> {
        (0..rows * cols)
            .map(|_| self.rng.gen_range(-1.0f32..1.0f32))
            .collect()
    }
}
