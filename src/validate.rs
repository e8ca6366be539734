//! Lock-step validation of one FASTQ file pair (or a single file).

use crate::composition::CompositionTable;
use crate::error::CheckError;
use crate::ledger::{Severity, ViolationLedger};
use crate::reader::RecordReader;
use crate::record::RawRecord;

use std::path::Path;

const TRUNCATED: &str = "File appears to be truncated half-way through a read record";

/// Reporting state of the quality-versus-bases length check.
///
/// A mismatch is only confirmed one record late: if another record follows,
/// the quality line was genuinely the wrong length; if end of stream
/// follows, the quality line was cut off. It is reported at most once per
/// file, so `Reported` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QualityLag {
    Idle,
    Pending,
    Reported,
}

/// Read count and surviving violations for one file.
#[derive(Debug)]
pub struct FileReport {
    pub path: String,
    pub reads: u64,
    pub ledger: ViolationLedger,
}

impl FileReport {
    /// Single-file report text: read count line, then one
    /// `{path}\t{message}` line per surviving violation.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.reads.to_string());
        out.push('\n');
        self.append_message_lines(&mut out);
        out
    }

    fn append_message_lines(&self, out: &mut String) {
        for message in self.ledger.messages() {
            out.push_str(&self.path);
            out.push('\t');
            out.push_str(message);
            out.push('\n');
        }
    }
}

/// Outcome of validating one file pair.
///
/// The two reports are fully independent: each file keeps its own read
/// count, composition table and ledger, however broken its mate is.
#[derive(Debug)]
pub struct PairSummary {
    pub first: FileReport,
    pub second: FileReport,
}

impl PairSummary {
    pub fn total_reads(&self) -> u64 {
        self.first.reads + self.second.reads
    }

    /// Pair report text: combined read count line, then the first file's
    /// violation lines, then the second's.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.total_reads().to_string());
        out.push('\n');
        self.first.append_message_lines(&mut out);
        self.second.append_message_lines(&mut out);
        out
    }
}

/// Everything one mate accumulates while its stream is driven.
struct MateState {
    path: String,
    reader: RecordReader,
    reads: u64,
    table: CompositionTable,
    ledger: ViolationLedger,
    lag: QualityLag,
}

impl MateState {
    fn new(path: String, reader: RecordReader) -> Self {
        Self {
            path,
            reader,
            reads: 0,
            table: CompositionTable::new(),
            ledger: ViolationLedger::new(),
            lag: QualityLag::Idle,
        }
    }

    fn next_record(&mut self) -> RawRecord {
        self.reader.next_record(&mut self.ledger)
    }

    /// Per-record checks shared by both mates. The caller has already
    /// established that `rec.header` is present.
    fn inspect(&mut self, rec: &RawRecord) {
        if self.lag == QualityLag::Pending {
            // The mismatch spotted on the previous record is confirmed now
            // that another record followed it.
            self.ledger.record(
                Severity::Structural,
                format!(
                    "Quality string is not the same length as the base string on line {}",
                    self.reads * 4 + 3
                ),
            );
            self.lag = QualityLag::Reported;
        }
        self.reads += 1;
        if !rec.is_complete() {
            self.ledger.record(Severity::Truncation, TRUNCATED);
        }
        if let Some(bases) = &rec.bases {
            self.table.observe(bases);
        }
        if let (Some(bases), Some(quality)) = (&rec.bases, &rec.quality) {
            if bases.len() != quality.len() && self.lag == QualityLag::Idle {
                self.lag = QualityLag::Pending;
            }
        }
        if let Some(separator) = &rec.separator {
            if separator != "+" {
                self.ledger
                    .record(Severity::Structural, "Separator line is not \"+\"");
            }
        }
    }

    fn finish(mut self) -> FileReport {
        if self.lag == QualityLag::Pending {
            // A mismatch on the final record had no following record to
            // confirm it: the quality line was cut short at end of stream.
            self.ledger.record(Severity::Truncation, TRUNCATED);
        }
        self.table.evaluate(&mut self.ledger);
        FileReport {
            path: self.path,
            reads: self.reads,
            ledger: self.ledger,
        }
    }
}

/// Validate a (mate1, mate2) FASTQ file pair.
pub fn validate_pair<P: AsRef<Path>, Q: AsRef<Path>>(
    path1: P,
    path2: Q,
) -> Result<PairSummary, CheckError> {
    let path1 = path1.as_ref();
    let path2 = path2.as_ref();
    let reader1 = RecordReader::from_path(path1)?;
    let reader2 = RecordReader::from_path(path2)?;
    Ok(validate_pair_readers(
        path1.display().to_string(),
        reader1,
        path2.display().to_string(),
        reader2,
    ))
}

/// [`validate_pair`] over already-open readers; `name1`/`name2` label the
/// report lines.
pub fn validate_pair_readers(
    name1: String,
    reader1: RecordReader,
    name2: String,
    reader2: RecordReader,
) -> PairSummary {
    let mut first = MateState::new(name1, reader1);
    let mut second = MateState::new(name2, reader2);

    loop {
        // Both streams advance every cycle, never short-circuited, so each
        // file's count and ledger stay correct after the other goes quiet.
        let rec1 = first.next_record();
        let rec2 = second.next_record();
        if rec1.header.is_none() && rec2.header.is_none() {
            break;
        }
        if rec1.header.is_some() {
            first.inspect(&rec1);
            if let (Some(h1), Some(h2)) = (&rec1.header, &rec2.header) {
                // Mates carry the same header up to the trailing "/1"/"/2".
                if strip_mate_suffix(h1) != strip_mate_suffix(h2) {
                    first.ledger.record(
                        Severity::Structural,
                        format!("Header for R1 ({h1}) does not equal header for R2 ({h2})"),
                    );
                }
            }
        }
        if rec2.header.is_some() {
            second.inspect(&rec2);
        }
    }

    if first.reads < second.reads {
        first.ledger.record(
            Severity::Structural,
            format!(
                "File has fewer reads than its pair ({} versus {})",
                first.reads, second.reads
            ),
        );
    } else if second.reads < first.reads {
        second.ledger.record(
            Severity::Structural,
            format!(
                "File has fewer reads than its pair ({} versus {})",
                second.reads, first.reads
            ),
        );
    }

    PairSummary {
        first: first.finish(),
        second: second.finish(),
    }
}

/// Validate one FASTQ file on its own: the per-record and composition
/// checks without the cross-mate comparisons.
pub fn validate_single<P: AsRef<Path>>(path: P) -> Result<FileReport, CheckError> {
    let path = path.as_ref();
    let reader = RecordReader::from_path(path)?;
    Ok(validate_single_reader(path.display().to_string(), reader))
}

/// [`validate_single`] over an already-open reader.
pub fn validate_single_reader(name: String, reader: RecordReader) -> FileReport {
    let mut mate = MateState::new(name, reader);
    loop {
        let rec = mate.next_record();
        if rec.header.is_none() {
            break;
        }
        mate.inspect(&rec);
    }
    mate.finish()
}

/// Header with its trailing two-character mate suffix removed. Headers too
/// short to carry a suffix (or where the cut would split a multi-byte
/// character) compare whole.
fn strip_mate_suffix(header: &str) -> &str {
    header
        .get(..header.len().saturating_sub(2))
        .unwrap_or(header)
}
