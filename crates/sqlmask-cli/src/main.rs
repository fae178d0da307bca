//! sqlmask CLI - SQL column anonymizer

use sqlmask_cli::{cli, input, output};

use anyhow::Result;
use clap::Parser;
use sqlmask_core::{anonymize, AnonymizeOptions, AnonymizeRequest};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::Args;

/// IO failure (unreadable file or stdin, closed stdout).
const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sqlmask: error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    let sql = input::read_sql(args.sql.as_deref(), args.file.as_deref())?;

    let mut request = AnonymizeRequest::new(sql.as_str()).with_dialect(args.dialect.into());
    if !args.functions.is_empty() {
        request = request.with_options(AnonymizeOptions {
            additional_functions: args.functions,
        });
    }

    let result = anonymize(&request);
    let report = output::format_report(&sql, &result, args.pretty);

    let mut stdout = io::stdout().lock();
    stdout.write_all(report.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
