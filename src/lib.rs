//! Quality-control checker for (paired) FASTQ files.
//!
//! - Plain and `.gz` input (auto-detect).
//! - Streaming, record-by-record (no full-file buffering).
//! - Per-position base composition skew detection.
//! - Paired-mate synchronization, truncation and separator checks.
//! - Stream faults are reported, never fatal: every input yields a report.
//! - One concurrent validation task per file pair.

pub mod composition;
pub mod error;
pub mod ledger;
pub mod reader;
pub mod record;
pub mod runner;
pub mod validate;

pub use crate::composition::{CompositionTable, MAX_READ_LEN};
pub use crate::error::CheckError;
pub use crate::ledger::{Severity, ViolationLedger};
pub use crate::reader::RecordReader;
pub use crate::record::RawRecord;
pub use crate::runner::{RunReport, run_paired, run_single};
pub use crate::validate::{
    FileReport, PairSummary, validate_pair, validate_pair_readers, validate_single,
    validate_single_reader,
};
