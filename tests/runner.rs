use fastq_check::{CheckError, run_paired, run_single};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_one_record(path: &Path, header: &str, separator: &str) {
    let mut f = File::create(path).unwrap();
    writeln!(f, "{header}\nACGT\n{separator}\n!!!!").unwrap();
}

#[tokio::test]
async fn reports_come_back_in_argument_order() {
    let dir = tempdir().unwrap();
    let empty1 = dir.path().join("empty_R1.fastq");
    let empty2 = dir.path().join("empty_R2.fastq");
    File::create(&empty1).unwrap();
    File::create(&empty2).unwrap();

    let sep1 = dir.path().join("sep_R1.fastq");
    let sep2 = dir.path().join("sep_R2.fastq");
    write_one_record(&sep1, "@r1/1", "-");
    write_one_record(&sep2, "@r1/2", "-");

    let files = vec![empty1, empty2, sep1.clone(), sep2.clone()];
    let report = run_paired(&files).await.unwrap();

    assert_eq!(report.total_reads, 2);
    assert_eq!(
        report.lines,
        vec![
            format!("{}\tSeparator line is not \"+\"", sep1.display()),
            format!("{}\tSeparator line is not \"+\"", sep2.display()),
        ]
    );
    assert_eq!(
        report.render(),
        format!(
            "{}\tSeparator line is not \"+\"\n{}\tSeparator line is not \"+\"\n2\n",
            sep1.display(),
            sep2.display()
        )
    );
}

#[tokio::test]
async fn unreadable_pair_becomes_a_placeholder_report() {
    let dir = tempdir().unwrap();
    let missing1 = dir.path().join("gone_R1.fastq.gz");
    let missing2 = dir.path().join("gone_R2.fastq.gz");
    let empty1 = dir.path().join("empty_R1.fastq");
    let empty2 = dir.path().join("empty_R2.fastq");
    File::create(&empty1).unwrap();
    File::create(&empty2).unwrap();

    let files = vec![missing1.clone(), missing2.clone(), empty1, empty2];
    let report = run_paired(&files).await.unwrap();

    // The broken pair contributes zero reads and one line; the run still
    // covers the remaining pair.
    assert_eq!(report.total_reads, 0);
    assert_eq!(
        report.lines,
        vec![format!(
            "{}, {}\tFailed to read fastq file",
            missing1.display(),
            missing2.display()
        )]
    );
}

#[tokio::test]
async fn odd_file_count_is_rejected() {
    let files = vec![
        PathBuf::from("a.fastq.gz"),
        PathBuf::from("b.fastq.gz"),
        PathBuf::from("c.fastq.gz"),
    ];
    match run_paired(&files).await {
        Err(CheckError::OddFileCount(3)) => {}
        other => panic!("expected odd-count error, got {other:?}"),
    }
}

#[tokio::test]
async fn single_mode_checks_each_file_independently() {
    let dir = tempdir().unwrap();
    let empty = dir.path().join("empty.fastq");
    File::create(&empty).unwrap();
    let missing = dir.path().join("gone.fastq.gz");
    let sep = dir.path().join("sep.fastq");
    write_one_record(&sep, "@r1", "-");

    let files = vec![empty, missing.clone(), sep.clone()];
    let report = run_single(&files).await;

    assert_eq!(report.total_reads, 1);
    assert_eq!(
        report.lines,
        vec![
            format!("{}\tFailed to read fastq file", missing.display()),
            format!("{}\tSeparator line is not \"+\"", sep.display()),
        ]
    );
}
