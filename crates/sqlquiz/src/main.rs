use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sqlquiz_grader::SuiteReport;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(name = "sqlquiz", version, about = "Grade the SQL challenge queries")]
struct Args {
    /// Schema and data script loaded into the in-memory database.
    #[clap(long, env = "SQLQUIZ_SEED", default_value = sqlquiz::DEFAULT_SEED)]
    seed: PathBuf,
    /// Directory holding the challenge query files.
    #[clap(long, env = "SQLQUIZ_CHALLENGES", default_value = sqlquiz::DEFAULT_CHALLENGES)]
    challenges: PathBuf,
    /// Log filter for internal diagnostics, written to stderr.
    #[clap(long, env = "SQLQUIZ_LOG", default_value = "off")]
    log_filter: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_filter))
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match sqlquiz::grade(&args.seed, &args.challenges, &mut out) {
        Ok(report) => match write_summary(&mut out, &report) {
            Ok(()) if report.is_success() => ExitCode::SUCCESS,
            Ok(()) => ExitCode::FAILURE,
            Err(err) => {
                error!("could not write summary: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            error!("{err:#}");
            eprintln!("sqlquiz: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn write_summary(out: &mut dyn Write, report: &SuiteReport) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{} of {} challenges correct",
        report.passed, report.total
    )?;
    out.flush()
}
