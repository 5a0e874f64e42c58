use crate::config::SummaryFormat;
use crate::executor::ExecutionStatus;
use crate::oracle::CrashReport;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

/// Outcome counters for one replay run.
///
/// Every path handed to the driver bumps `parsed` and then exactly one of
/// `read_errors`, `accepted`, `rejected` or the crash list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunTally {
    parsed: usize,
    accepted: usize,
    rejected: usize,
    read_errors: usize,
    crashes: Vec<CrashReport>,
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    parsed: usize,
    accepted: usize,
    rejected: usize,
    crashed: usize,
    read_errors: usize,
    crashes: &'a [CrashReport],
}

impl RunTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_parsed(&mut self) {
        self.parsed += 1;
    }

    pub fn record_read_error(&mut self) {
        self.read_errors += 1;
    }

    /// Counts a non-crashing outcome. Crashes go through [`RunTally::record_crash`]
    /// so the path is never lost.
    pub fn record_status(&mut self, status: &ExecutionStatus) {
        match status {
            ExecutionStatus::Accepted => self.accepted += 1,
            ExecutionStatus::Rejected(_) => self.rejected += 1,
            ExecutionStatus::Crash(_) => {}
        }
    }

    pub fn record_crash(&mut self, report: CrashReport) {
        self.crashes.push(report);
    }

    pub fn parsed(&self) -> usize {
        self.parsed
    }

    pub fn accepted(&self) -> usize {
        self.accepted
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn read_errors(&self) -> usize {
        self.read_errors
    }

    pub fn crashed(&self) -> usize {
        self.crashes.len()
    }

    /// Crashes in the order they were encountered.
    pub fn crashes(&self) -> &[CrashReport] {
        &self.crashes
    }

    pub fn crashed_paths(&self) -> Vec<PathBuf> {
        self.crashes.iter().map(|c| c.path.clone()).collect()
    }

    pub fn write_summary(&self, out: &mut dyn Write, format: SummaryFormat) -> io::Result<()> {
        match format {
            SummaryFormat::Text => self.write_text(out),
            SummaryFormat::Json => self.write_json(out),
        }
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "\nSummary:")?;
        writeln!(out, "{} Files parsed", self.parsed)?;
        writeln!(out, "{} Files OK", self.accepted)?;
        writeln!(out, "{} Files Rejected", self.rejected)?;
        writeln!(out, "{} Files crashed", self.crashed())?;

        if !self.crashes.is_empty() {
            writeln!(out, "-- crashes:")?;
            for crash in &self.crashes {
                writeln!(out, "- {}", crash.path.display())?;
            }
        }
        out.flush()
    }

    fn write_json(&self, out: &mut dyn Write) -> io::Result<()> {
        let summary = JsonSummary {
            parsed: self.parsed,
            accepted: self.accepted,
            rejected: self.rejected,
            crashed: self.crashed(),
            read_errors: self.read_errors,
            crashes: &self.crashes,
        };
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        writeln!(out)?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crash(path: &str) -> CrashReport {
        CrashReport {
            path: PathBuf::from(path),
            description: "boom".to_string(),
            input_hash: "00".to_string(),
        }
    }

    fn render(tally: &RunTally, format: SummaryFormat) -> String {
        let mut buf = Vec::new();
        tally.write_summary(&mut buf, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn statuses_land_in_the_right_counter() {
        let mut tally = RunTally::new();
        tally.record_status(&ExecutionStatus::Accepted);
        tally.record_status(&ExecutionStatus::Rejected(2));
        tally.record_status(&ExecutionStatus::Rejected(-1));
        tally.record_status(&ExecutionStatus::Crash("ignored".to_string()));
        assert_eq!(tally.accepted(), 1);
        assert_eq!(tally.rejected(), 2);
        assert_eq!(tally.crashed(), 0);
    }

    #[test]
    fn crash_list_keeps_order_and_matches_counter() {
        let mut tally = RunTally::new();
        tally.record_crash(crash("b"));
        tally.record_crash(crash("a"));
        assert_eq!(tally.crashed(), 2);
        assert_eq!(
            tally.crashed_paths(),
            vec![PathBuf::from("b"), PathBuf::from("a")]
        );
    }

    #[test]
    fn text_summary_without_crashes() {
        let mut tally = RunTally::new();
        tally.record_parsed();
        tally.record_status(&ExecutionStatus::Accepted);
        tally.record_parsed();
        tally.record_status(&ExecutionStatus::Rejected(1));
        assert_eq!(
            render(&tally, SummaryFormat::Text),
            "\nSummary:\n2 Files parsed\n1 Files OK\n1 Files Rejected\n0 Files crashed\n"
        );
    }

    #[test]
    fn text_summary_lists_crashes() {
        let mut tally = RunTally::new();
        tally.record_parsed();
        tally.record_status(&ExecutionStatus::Accepted);
        tally.record_parsed();
        tally.record_read_error();
        tally.record_parsed();
        tally.record_crash(crash("c.bin"));
        assert_eq!(
            render(&tally, SummaryFormat::Text),
            "\nSummary:\n3 Files parsed\n1 Files OK\n0 Files Rejected\n1 Files crashed\n\
             -- crashes:\n- c.bin\n"
        );
    }

    #[test]
    fn json_summary_has_all_counters() {
        let mut tally = RunTally::new();
        tally.record_parsed();
        tally.record_read_error();
        tally.record_parsed();
        tally.record_crash(crash("c.bin"));

        let value: serde_json::Value =
            serde_json::from_str(&render(&tally, SummaryFormat::Json)).unwrap();
        assert_eq!(value["parsed"], 2);
        assert_eq!(value["accepted"], 0);
        assert_eq!(value["rejected"], 0);
        assert_eq!(value["crashed"], 1);
        assert_eq!(value["read_errors"], 1);
        assert_eq!(value["crashes"][0]["path"], "c.bin");
        assert_eq!(value["crashes"][0]["description"], "boom");
    }
}
