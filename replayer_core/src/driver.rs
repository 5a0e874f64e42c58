use crate::args::extract_flag;
use crate::config::ReplayConfig;
use crate::debugger::wait_for_debugger;
use crate::executor::{Executor, InProcessExecutor};
use crate::input::read_input;
use crate::oracle::{CrashOracle, Oracle};
use crate::tally::RunTally;
use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// One-time setup hook run before any input is replayed. It may rewrite the
/// argument list (element 0 is the program name).
pub type Initializer = Box<dyn FnOnce(&mut Vec<OsString>)>;

/// Feeds a fixed list of input files to a fuzz target, one at a time, and
/// counts the outcomes.
///
/// No mutation or coverage feedback happens here; this stands in for a fuzzing
/// engine when all that is wanted is to reproduce recorded inputs.
pub struct ReplayDriver<F>
where
    F: FnMut(&[u8]) -> i32,
{
    executor: InProcessExecutor<F>,
    oracle: CrashOracle,
    initializer: Option<Initializer>,
    config: ReplayConfig,
}

impl<F> ReplayDriver<F>
where
    F: FnMut(&[u8]) -> i32,
{
    /// `target` returns 0 to accept an input and anything else to reject it.
    /// A panic inside `target` is recorded as a crash.
    pub fn new(target: F) -> Self {
        Self {
            executor: InProcessExecutor::new(target),
            oracle: CrashOracle::new(),
            initializer: None,
            config: ReplayConfig::default(),
        }
    }

    pub fn with_initializer<G>(mut self, initializer: G) -> Self
    where
        G: FnOnce(&mut Vec<OsString>) + 'static,
    {
        self.initializer = Some(Box::new(initializer));
        self
    }

    pub fn with_config(mut self, config: ReplayConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Runs against the process's stdin and stderr.
    pub fn run<I, S>(&mut self, args: I) -> RunTally
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let stdin = io::stdin();
        let mut stdin = stdin.lock();
        let stderr = io::stderr();
        let mut stderr = stderr.lock();
        self.run_with_io(args, &mut stdin, &mut stderr)
    }

    /// Replays every file named in `args[1..]`.
    ///
    /// `console_in` is only read when the debug-wait flag is present.
    /// Attach guidance, read errors, crashes and the summary go to
    /// `console_out` whatever the log filter says.
    pub fn run_with_io<I, S>(
        &mut self,
        args: I,
        console_in: &mut dyn BufRead,
        console_out: &mut dyn Write,
    ) -> RunTally
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let filtered = extract_flag(args, &self.config.debug_wait_flag);
        let mut args = filtered.args;

        if filtered.wait_for_debugger {
            if let Err(e) = wait_for_debugger(console_in, console_out) {
                tracing::warn!("Debugger wait interrupted: {e}");
            }
        }

        if let Some(initializer) = self.initializer.take() {
            initializer(&mut args);
        }

        let paths: Vec<PathBuf> = args.into_iter().skip(1).map(PathBuf::from).collect();
        tracing::info!("Replaying {} input file(s)", paths.len());

        let mut tally = RunTally::new();
        for path in &paths {
            self.replay_one(path, &mut tally, console_out);
        }

        if let Err(e) = tally.write_summary(console_out, self.config.summary_format) {
            tracing::warn!("Failed to write summary: {e}");
        }
        tally
    }

    fn replay_one(&mut self, path: &Path, tally: &mut RunTally, console_out: &mut dyn Write) {
        tally.record_parsed();

        let data = match read_input(path) {
            Ok(data) => data,
            Err(e) => {
                report(console_out, format_args!("Read error ({}): {}", path.display(), e));
                tracing::debug!(path = %path.display(), error = ?e, "skipped unreadable input");
                tally.record_read_error();
                return;
            }
        };

        let status = self.executor.execute_sync(&data);
        tracing::debug!(path = %path.display(), size = data.len(), ?status, "replayed");

        match self.oracle.examine(path, &data, &status) {
            Some(report_entry) => {
                report(console_out, format_args!("CRASHED: {}", report_entry.description));
                tracing::info!(
                    path = %report_entry.path.display(),
                    input_hash = %report_entry.input_hash,
                    "crash recorded"
                );
                tally.record_crash(report_entry);
            }
            None => tally.record_status(&status),
        }
    }
}

fn report(console_out: &mut dyn Write, line: std::fmt::Arguments<'_>) {
    if let Err(e) = writeln!(console_out, "{line}") {
        tracing::warn!("Failed to write to console: {e}");
    }
}

/// Entry point used by [`replay_main!`](crate::replay_main): loads the config,
/// installs logging and replays the process arguments. Always exits with success.
pub fn run_standalone<F>(driver: ReplayDriver<F>) -> ExitCode
where
    F: FnMut(&[u8]) -> i32,
{
    let config = match ReplayConfig::discover() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {e:#}. Using built-in defaults.");
            ReplayConfig::default()
        }
    };

    if let Err(e) = crate::logging::init(&config.log_filter) {
        eprintln!("Warning: {e:#}");
    }

    let mut driver = driver.with_config(config);
    driver.run(std::env::args_os());
    ExitCode::SUCCESS
}
