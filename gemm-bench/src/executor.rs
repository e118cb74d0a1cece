//! Timed execution: warmup calls, then strictly sequential measured calls.

use gemm_primitives::{BackendError, ComputeBackend};

use crate::error::BenchError;
use crate::planner::IterationPlan;

/// Per-call device-measured durations for one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingResult {
    /// Sum of per-call device execution intervals, in seconds.
    pub total_seconds: f64,
    /// The individual intervals, in submission order.
    pub samples: Vec<f64>,
}

/// Run `plan.warmup_calls` untimed submissions, then `plan.timed_calls`
/// measured ones.
///
/// Every call completes before the next is submitted, so the accumulated sum
/// is device busy-time rather than pipelined wall-clock time. Warmup calls
/// are also waited on: an in-flight warmup overlapping the first timed
/// window would corrupt its timestamps.
///
/// Any submission, wait, or timestamp failure invalidates the whole
/// configuration; partial time is never returned.
pub fn execute<B: ComputeBackend>(
    backend: &mut B,
    plan: &IterationPlan,
) -> Result<TimingResult, BenchError> {
    for _ in 0..plan.warmup_calls {
        let op = backend.submit_gemm()?;
        backend.wait(&op)?;
    }

    let mut samples = Vec::with_capacity(plan.timed_calls as usize);
    let mut total_seconds = 0.0;
    for _ in 0..plan.timed_calls {
        let op = backend.submit_gemm()?;
        backend.wait(&op)?;
        let elapsed = backend.elapsed_seconds(&op)?;
        total_seconds += elapsed;
        samples.push(elapsed);
    }

    if total_seconds <= 0.0 {
        return Err(BenchError::Backend(BackendError::InvalidTiming(
            total_seconds,
        )));
    }

    Ok(TimingResult {
        total_seconds,
        samples,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Scripted backend: yields a fixed interval per timed call and records
    /// the call sequence for ordering assertions.
    struct ScriptedBackend {
        interval: f64,
        fail_on_submit: Option<u32>,
        submitted: u32,
        log: RefCell<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new(interval: f64) -> Self {
            Self {
                interval,
                fail_on_submit: None,
                submitted: 0,
                log: RefCell::new(Vec::new()),
            }
        }
    }

    impl ComputeBackend for ScriptedBackend {
        type Op = u32;

        fn submit_gemm(&mut self) -> Result<u32, BackendError> {
            self.submitted += 1;
            self.log.borrow_mut().push(format!("submit {}", self.submitted));
            if self.fail_on_submit == Some(self.submitted) {
                return Err(BackendError::CommandBuffer);
            }
            Ok(self.submitted)
        }

        fn wait(&self, op: &u32) -> Result<(), BackendError> {
            self.log.borrow_mut().push(format!("wait {op}"));
            Ok(())
        }

        fn elapsed_seconds(&self, op: &u32) -> Result<f64, BackendError> {
            self.log.borrow_mut().push(format!("elapsed {op}"));
            if self.interval <= 0.0 {
                return Err(BackendError::InvalidTiming(self.interval));
            }
            Ok(self.interval)
        }
    }

    fn plan(warmup: u32, timed: u32) -> IterationPlan {
        IterationPlan {
            warmup_calls: warmup,
            timed_calls: timed,
        }
    }

    #[test]
    fn sums_per_call_intervals() {
        let mut backend = ScriptedBackend::new(0.25);
        let timing = execute(&mut backend, &plan(2, 8)).unwrap();

        assert_eq!(timing.samples.len(), 8);
        assert!((timing.total_seconds - 2.0).abs() < 1e-12);
        // Warmup and timed calls both submit.
        assert_eq!(backend.submitted, 10);
    }

    #[test]
    fn warmup_calls_are_untimed() {
        let mut backend = ScriptedBackend::new(0.5);
        let timing = execute(&mut backend, &plan(4, 1)).unwrap();
        assert_eq!(timing.samples, vec![0.5]);
        assert!((timing.total_seconds - 0.5).abs() < 1e-12);
        // Only the single timed call reads timestamps.
        let log = backend.log.borrow();
        assert_eq!(log.iter().filter(|e| e.starts_with("elapsed")).count(), 1);
    }

    #[test]
    fn calls_are_strictly_sequential() {
        let mut backend = ScriptedBackend::new(0.1);
        execute(&mut backend, &plan(1, 2)).unwrap();
        assert_eq!(
            *backend.log.borrow(),
            vec![
                "submit 1",
                "wait 1",
                "submit 2",
                "wait 2",
                "elapsed 2",
                "submit 3",
                "wait 3",
                "elapsed 3",
            ]
        );
    }

    #[test]
    fn submit_failure_aborts_configuration() {
        let mut backend = ScriptedBackend::new(0.1);
        backend.fail_on_submit = Some(3);
        let err = execute(&mut backend, &plan(1, 5)).unwrap_err();
        assert!(matches!(
            err,
            BenchError::Backend(BackendError::CommandBuffer)
        ));
        // No further submissions after the failure.
        assert_eq!(backend.submitted, 3);
    }

    #[test]
    fn invalid_interval_aborts_configuration() {
        let mut backend = ScriptedBackend::new(0.0);
        let err = execute(&mut backend, &plan(1, 5)).unwrap_err();
        assert!(matches!(
            err,
            BenchError::Backend(BackendError::InvalidTiming(_))
        ));
    }
}
