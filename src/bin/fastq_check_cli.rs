use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use fastq_check::runner;

/// Summarize problems found in (paired) gzipped FASTQ files.
#[derive(Debug, Parser)]
#[command(name = "fastq-check", version, about)]
struct Args {
    /// Check each file on its own instead of as consecutive (mate1, mate2)
    /// pairs.
    #[arg(long)]
    single: bool,

    /// FASTQ files, plain or gzipped.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let report = if args.single {
        runner::run_single(&args.files).await
    } else {
        match runner::run_paired(&args.files).await {
            Ok(report) => report,
            Err(err) => {
                eprintln!("fastq-check: {err}");
                return ExitCode::FAILURE;
            }
        }
    };

    print!("{}", report.render());
    ExitCode::SUCCESS
}
