use crate::executor::ExecutionStatus;
use crate::input::Input;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A replayed input that made the target panic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrashReport {
    /// The file the input was read from.
    pub path: PathBuf,
    /// The panic message.
    pub description: String,
    /// MD5 of the input bytes, lowercase hex. Identical reproducers share it.
    pub input_hash: String,
}

/// Examines the outcome of one replay and decides whether it is worth reporting.
pub trait Oracle<I: Input + ?Sized> {
    fn examine(&self, path: &Path, input: &I, status: &ExecutionStatus) -> Option<CrashReport>;
}

/// Reports every [`ExecutionStatus::Crash`]. Accepted and rejected inputs are ignored.
#[derive(Debug, Default)]
pub struct CrashOracle;

impl CrashOracle {
    pub fn new() -> Self {
        CrashOracle
    }
}

impl<I: Input + ?Sized> Oracle<I> for CrashOracle {
    fn examine(&self, path: &Path, input: &I, status: &ExecutionStatus) -> Option<CrashReport> {
        match status {
            ExecutionStatus::Crash(description) => Some(CrashReport {
                path: path.to_path_buf(),
                description: description.clone(),
                input_hash: format!("{:x}", md5::compute(input.as_bytes())),
            }),
            ExecutionStatus::Accepted | ExecutionStatus::Rejected(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crash_oracle_detects_crash_and_creates_valid_report() {
        let oracle = CrashOracle::new();
        let input_data: Vec<u8> = vec![0xFF, 0xFE, 0xFD];
        let crash_status = ExecutionStatus::Crash("index out of bounds".to_string());

        let report = oracle
            .examine(Path::new("crash-1"), &input_data, &crash_status)
            .expect("Oracle should report a crash");

        assert_eq!(report.path, PathBuf::from("crash-1"));
        assert_eq!(report.description, "index out of bounds");
        assert_eq!(
            report.input_hash,
            format!("{:x}", md5::compute(&input_data))
        );
    }

    #[test]
    fn hash_of_known_input() {
        let oracle = CrashOracle::new();
        let input: &[u8] = b"";
        let report = oracle
            .examine(
                Path::new("empty"),
                input,
                &ExecutionStatus::Crash("x".to_string()),
            )
            .unwrap();
        assert_eq!(report.input_hash, "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn crash_oracle_ignores_accepted_status() {
        let oracle = CrashOracle::new();
        let input_data: Vec<u8> = vec![0x01, 0x02, 0x03];
        assert!(
            oracle
                .examine(Path::new("ok"), &input_data, &ExecutionStatus::Accepted)
                .is_none()
        );
    }

    #[test]
    fn crash_oracle_ignores_rejected_status() {
        let oracle = CrashOracle::new();
        let input_data: Vec<u8> = vec![0xAA];
        assert!(
            oracle
                .examine(Path::new("rej"), &input_data, &ExecutionStatus::Rejected(1))
                .is_none()
        );
    }
}
