//! burp-history - Burp Suite proxy history to HTML/CSV converter

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use humansize::{format_size, DECIMAL};

use burp_history::cli::Cli;
use burp_history::pipeline::{self, ConvertOptions};
use burp_history::render::OutputFormat;
use burp_history::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so stdout only carries the summary line.
#[cfg(not(tarpaulin_include))]
fn init_logging(level: tracing::Level) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let render = config.render_options(cli.format, cli.csv_delimiter, cli.title.clone());
    if cli.csv_delimiter.is_some() && render.format != OutputFormat::Csv {
        tracing::warn!("--csv-delimiter only applies to CSV output, ignoring it");
    }

    tracing::info!(
        input = %cli.file.display(),
        format = %render.format,
        "converting proxy history"
    );

    let summary = pipeline::run(&ConvertOptions {
        input: cli.file.clone(),
        render,
    })?;

    if summary.decode_errors > 0 {
        tracing::warn!(
            fields = summary.decode_errors,
            "some bodies could not be decoded and were left empty"
        );
    }

    if !cli.quiet {
        println!(
            "Wrote {} record(s) to {} ({})",
            summary.records,
            summary.output.display(),
            format_size(summary.bytes, DECIMAL)
        );
    }

    Ok(())
}
