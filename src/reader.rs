use crate::error::CheckError;
use crate::ledger::{Severity, ViolationLedger};
use crate::record::RawRecord;

use flate2::read::MultiGzDecoder;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

/// Streaming line reader over one (possibly gzipped) FASTQ file.
///
/// Faults never propagate to the caller. A failed read is classified as a
/// gzip decode fault or a generic read fault, recorded as a level-3
/// violation in the ledger the caller supplies, and from then on the reader
/// reports plain end-of-stream. End of input and a failed stream thus look
/// the same to the record loop ("no more lines"); only the latter leaves a
/// mark in the ledger. The loop relies on that distinction to keep counting
/// reads without mistaking a broken file for a short one.
pub struct RecordReader {
    rdr: Box<dyn BufRead + Send>,
    gz_stream: bool,
    failed: bool,
}

impl RecordReader {
    /// Open a file path. Auto-detect `.gz` by extension or magic bytes.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CheckError> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| CheckError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_gz = path.extension().and_then(|s| s.to_str()) == Some("gz")
            || looks_like_gzip(&f).unwrap_or(false);

        let rdr: Box<dyn BufRead + Send> = if is_gz {
            let dec = MultiGzDecoder::new(f);
            Box::new(BufReader::with_capacity(256 * 1024, dec))
        } else {
            Box::new(BufReader::with_capacity(256 * 1024, f))
        };

        Ok(Self {
            rdr,
            gz_stream: is_gz,
            failed: false,
        })
    }

    /// Wrap an arbitrary `BufRead` (stdin, in-memory fixtures).
    pub fn from_bufread<R: BufRead + Send + 'static>(reader: R) -> Self {
        Self {
            rdr: Box::new(reader),
            gz_stream: false,
            failed: false,
        }
    }

    /// Next line without its terminator, or `None` at end of stream.
    ///
    /// End of stream records nothing. A read fault records a level-3
    /// violation carrying the fault's message and latches the reader, so
    /// every later call is a quiet `None`.
    pub fn next_line(&mut self, ledger: &mut ViolationLedger) -> Option<String> {
        if self.failed {
            return None;
        }
        let mut buf = Vec::with_capacity(256);
        match self.rdr.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
                match String::from_utf8(buf) {
                    Ok(line) => Some(line),
                    Err(e) => {
                        // Bad text bytes are a read fault on any stream; a
                        // gz decoder that produced them already inflated
                        // this chunk successfully.
                        self.fail(ledger, false, &e);
                        None
                    }
                }
            }
            Err(e) => {
                let decode = is_decode_fault(&e, self.gz_stream);
                self.fail(ledger, decode, &e);
                None
            }
        }
    }

    fn fail(&mut self, ledger: &mut ViolationLedger, decode: bool, err: &dyn std::fmt::Display) {
        self.failed = true;
        let message = if decode {
            format!("Failure decoding gzip stream: \"{err}\"")
        } else {
            format!("Read failure reading fastq file: \"{err}\"")
        };
        ledger.record(Severity::StreamFault, message);
    }

    /// Read the next record's four lines as one unit.
    ///
    /// Whatever the stream cannot produce stays `None`; an absent header
    /// means the stream yielded nothing this cycle.
    pub fn next_record(&mut self, ledger: &mut ViolationLedger) -> RawRecord {
        let header = self.next_line(ledger);
        if header.is_none() {
            return RawRecord::default();
        }
        RawRecord {
            header,
            bases: self.next_line(ledger),
            separator: self.next_line(ledger),
            quality: self.next_line(ledger),
        }
    }
}

/// Whether an I/O error came from the decompression layer rather than plain
/// reading. On a gzip-wrapped stream every I/O error passes through the
/// decoder, which also turns header corruption into bare kinds like
/// `UnexpectedEof`, so the whole class is a decode fault there. On other
/// streams, flate2's signatures are recognized directly: a corrupt deflate
/// body reports `InvalidInput`, and a wrapped `DecompressError` can sit
/// anywhere in the cause chain.
fn is_decode_fault(err: &io::Error, gz_stream: bool) -> bool {
    if gz_stream {
        return true;
    }
    if err.kind() == ErrorKind::InvalidInput {
        return true;
    }
    let mut cause: Option<&(dyn Error + 'static)> =
        err.get_ref().map(|e| e as &(dyn Error + 'static));
    while let Some(e) = cause {
        if e.is::<flate2::DecompressError>() {
            return true;
        }
        cause = e.source();
    }
    false
}

fn looks_like_gzip(mut f: &File) -> io::Result<bool> {
    let mut magic = [0u8; 2];
    let pos = f.stream_position()?;
    let n = f.read(&mut magic)?;
    f.seek(SeekFrom::Start(pos))?;
    Ok(n >= 2 && magic == [0x1F, 0x8B])
}
