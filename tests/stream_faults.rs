use fastq_check::{RecordReader, Severity, validate_single, validate_single_reader};
use std::io::{self, BufReader, Cursor, Read};
use tempfile::tempdir;

#[test]
fn invalid_utf8_in_plain_file_is_a_read_fault() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("binary.fastq");
    std::fs::write(&path, [0xFF, 0xFE, b'\n']).unwrap();

    let report = validate_single(&path).expect("open file");
    assert_eq!(report.reads, 0);
    assert_eq!(report.ledger.level(), Severity::StreamFault);
    let messages: Vec<&str> = report.ledger.messages().collect();
    assert_eq!(messages.len(), 1);
    // The file was never gzipped; bad text bytes are a plain read fault.
    assert!(
        messages[0].starts_with("Read failure reading fastq file: \""),
        "unexpected message: {}",
        messages[0]
    );
}

struct FailingStream;

impl Read for FailingStream {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("disk read failed"))
    }
}

#[test]
fn io_failure_is_a_read_fault_with_the_cause_message() {
    let reader = RecordReader::from_bufread(BufReader::new(FailingStream));
    let report = validate_single_reader("broken.fastq".to_string(), reader);

    assert_eq!(report.reads, 0);
    assert_eq!(report.ledger.level(), Severity::StreamFault);
    let messages: Vec<&str> = report.ledger.messages().collect();
    assert_eq!(
        messages,
        vec!["Read failure reading fastq file: \"disk read failed\""]
    );
}

#[test]
fn corrupt_deflate_body_behind_a_wrapped_decoder_is_a_decode_fault() {
    // Valid gzip header, then a reserved deflate block type: the decoder
    // accepts the header and fails inflating the body. Wrapping it through
    // `from_bufread` exercises classification without the gz-path hint.
    let mut bytes = vec![0x1F, 0x8B, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    bytes.extend_from_slice(&[0xFF; 16]);
    let dec = flate2::read::MultiGzDecoder::new(Cursor::new(bytes));
    let reader = RecordReader::from_bufread(BufReader::new(dec));

    let report = validate_single_reader("wrapped.fastq.gz".to_string(), reader);
    assert_eq!(report.ledger.level(), Severity::StreamFault);
    let messages: Vec<&str> = report.ledger.messages().collect();
    assert_eq!(messages.len(), 1);
    assert!(
        messages[0].starts_with("Failure decoding gzip stream: \""),
        "unexpected message: {}",
        messages[0]
    );
}
