//! Standalone replay driver for single-input fuzz targets.
//!
//! Links a fuzz target into an ordinary binary that feeds it the files named
//! on the command line, one by one, and prints how many were accepted,
//! rejected or crashed. Use it to reproduce findings without a fuzzing engine:
//!
//! ```no_run
//! fn target(data: &[u8]) -> i32 {
//!     if data.starts_with(b"BAD") {
//!         panic!("bad header");
//!     }
//!     0
//! }
//!
//! replayer_core::replay_main!(target);
//! ```
//!
//! Pass `-d` to pause before replaying so a debugger can be attached.

pub mod args;
pub mod config;
pub mod debugger;
pub mod driver;
pub mod executor;
pub mod input;
pub mod logging;
pub mod oracle;
pub mod tally;

pub use config::{ReplayConfig, SummaryFormat};
pub use driver::{Initializer, ReplayDriver, run_standalone};
pub use executor::{ExecutionStatus, Executor, InProcessExecutor};
pub use input::{Input, ReadError};
pub use oracle::{CrashOracle, CrashReport, Oracle};
pub use tally::RunTally;

/// Generates `fn main()` for a replay binary.
///
/// `replay_main!(target)` takes anything callable as `FnMut(&[u8]) -> i32`.
/// `replay_main!(target, init = initializer)` also runs `initializer` once on
/// the argument list before replaying.
#[macro_export]
macro_rules! replay_main {
    ($target:expr, init = $init:expr $(,)?) => {
        fn main() -> ::std::process::ExitCode {
            $crate::run_standalone($crate::ReplayDriver::new($target).with_initializer($init))
        }
    };
    ($target:expr $(,)?) => {
        fn main() -> ::std::process::ExitCode {
            $crate::run_standalone($crate::ReplayDriver::new($target))
        }
    };
}
