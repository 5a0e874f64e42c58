use crate::input::Input;
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Outcome of feeding one input to a fuzz target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStatus {
    /// The target returned 0.
    Accepted,
    /// The target returned a nonzero status.
    Rejected(i32),
    /// The target panicked. Holds the panic message.
    Crash(String),
}

pub trait Executor<I: Input + ?Sized> {
    fn execute_sync(&mut self, input: &I) -> ExecutionStatus;
}

/// Runs a single-input fuzz target in the current process.
///
/// Panics are caught and reported as [`ExecutionStatus::Crash`]. Faults that
/// do not unwind (segfaults, `abort`, `panic = "abort"` builds) still take the
/// whole process down.
pub struct InProcessExecutor<F>
where
    F: FnMut(&[u8]) -> i32,
{
    harness_fn: F,
}

impl<F> InProcessExecutor<F>
where
    F: FnMut(&[u8]) -> i32,
{
    pub fn new(harness_fn: F) -> Self {
        Self { harness_fn }
    }
}

impl<I: Input + ?Sized, F> Executor<I> for InProcessExecutor<F>
where
    F: FnMut(&[u8]) -> i32,
{
    fn execute_sync(&mut self, input: &I) -> ExecutionStatus {
        let result = catch_unwind(AssertUnwindSafe(|| (self.harness_fn)(input.as_bytes())));

        match result {
            Ok(0) => ExecutionStatus::Accepted,
            Ok(code) => ExecutionStatus::Rejected(code),
            Err(panic_payload) => ExecutionStatus::Crash(panic_message(panic_payload.as_ref())),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic type".to_string()
    }
}
