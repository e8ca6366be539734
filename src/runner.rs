//! Concurrent run driver: one validation task per file (pair), results
//! gathered in argument order.

use crate::error::CheckError;
use crate::validate::{validate_pair, validate_single};

use std::path::PathBuf;
use tokio::task::JoinHandle;

/// Combined output of one run.
#[derive(Debug)]
pub struct RunReport {
    /// Violation lines in argument order, ready to print verbatim.
    pub lines: Vec<String>,
    /// Total reads across every input file.
    pub total_reads: u64,
}

impl RunReport {
    /// Full stdout payload: every violation line, then the grand total.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&self.total_reads.to_string());
        out.push('\n');
        out
    }
}

/// Check files as consecutive (mate1, mate2) pairs, one blocking task per
/// pair, all launched up front.
///
/// Results are collected in argument order regardless of completion order.
/// A pair whose files cannot be opened, or whose task dies outright, still
/// contributes a zero-read placeholder report instead of taking the run
/// down.
pub async fn run_paired(files: &[PathBuf]) -> Result<RunReport, CheckError> {
    if files.len() % 2 != 0 {
        return Err(CheckError::OddFileCount(files.len()));
    }
    let mut tasks = Vec::with_capacity(files.len() / 2);
    for pair in files.chunks_exact(2) {
        let (path1, path2) = (pair[0].clone(), pair[1].clone());
        let label = format!("{}, {}", path1.display(), path2.display());
        let task = tokio::task::spawn_blocking(move || match validate_pair(&path1, &path2) {
            Ok(summary) => summary.render(),
            Err(err) => {
                log::error!("{err}");
                format!(
                    "0\n{}, {}\tFailed to read fastq file\n",
                    path1.display(),
                    path2.display()
                )
            }
        });
        tasks.push((label, task));
    }
    Ok(collect(tasks).await)
}

/// Check each file on its own, one blocking task per file.
pub async fn run_single(files: &[PathBuf]) -> RunReport {
    let mut tasks = Vec::with_capacity(files.len());
    for path in files {
        let path = path.clone();
        let label = path.display().to_string();
        let task = tokio::task::spawn_blocking(move || match validate_single(&path) {
            Ok(report) => report.render(),
            Err(err) => {
                log::error!("{err}");
                format!("0\n{}\tFailed to read fastq file\n", path.display())
            }
        });
        tasks.push((label, task));
    }
    collect(tasks).await
}

/// Await each task in launch order and fold its report in. The first line
/// of every task report is its read count; the rest are violation lines.
async fn collect(tasks: Vec<(String, JoinHandle<String>)>) -> RunReport {
    let mut lines = Vec::new();
    let mut total_reads: u64 = 0;
    for (label, task) in tasks {
        let report = match task.await {
            Ok(report) => report,
            Err(err) => {
                // A dead task still yields a placeholder entry so the rest
                // of the run reports normally.
                log::error!("validation task for {label} failed: {err}");
                format!("0\n{label}\tError processing file\n")
            }
        };
        let mut report_lines = report.lines();
        match report_lines.next().and_then(|l| l.parse::<u64>().ok()) {
            Some(count) => total_reads += count,
            None => log::warn!("report for {label} is missing its read-count line"),
        }
        lines.extend(report_lines.map(str::to_owned));
    }
    RunReport { lines, total_reads }
}
