use std::io::{self, BufRead, Write};

const ATTACH_PROMPT: &str = "\nNow attach debugger and press enter.\n";

#[cfg(target_os = "linux")]
const PTRACE_HINT: Option<&str> = Some(
    "If you get an error from ptrace 'Could not attach to the process.' \
     Use 'echo 0 | sudo tee /proc/sys/kernel/yama/ptrace_scope' to relax \
     restrictions temporarily.\n",
);
#[cfg(not(target_os = "linux"))]
const PTRACE_HINT: Option<&str> = None;

/// Prints attach guidance to `out` and blocks until one line (or EOF) is read
/// from `input`. There is no timeout.
pub fn wait_for_debugger(input: &mut dyn BufRead, out: &mut dyn Write) -> io::Result<()> {
    out.write_all(ATTACH_PROMPT.as_bytes())?;
    if let Some(hint) = PTRACE_HINT {
        out.write_all(hint.as_bytes())?;
    }
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    tracing::debug!(pid = std::process::id(), "resuming after debugger wait");
    Ok(())
}
