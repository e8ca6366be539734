use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised before any record has been streamed.
///
/// Faults hit while streaming never surface here: the reader converts them
/// into level-3 ledger entries and validation carries on.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("paired mode needs an even number of fastq files, got {0}")]
    OddFileCount(usize),
}
