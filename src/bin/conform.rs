// src/bin/conform.rs

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::time::FormatTime;

use conform::cli::{Cli, Commands};
use conform::commands::call::call_method;
use conform::commands::check::check_files;
use conform::commands::query::query_file;

/// A timer that outputs nothing
struct NoTimestamp;

impl FormatTime for NoTimestamp {
    fn format_time(
        &self,
        _w: &mut tracing_subscriber::fmt::format::Writer<'_>,
    ) -> std::fmt::Result {
        Ok(())
    }
}

fn main() -> ExitCode {
    // CONFORM_LOG_STYLE: "compact" (default) or "full" (timestamps and span events)
    if let Ok(filter) = EnvFilter::try_from_env("CONFORM_LOG") {
        let style = std::env::var("CONFORM_LOG_STYLE").unwrap_or_default();
        if style == "full" {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_level(true)
                .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
                .with_writer(std::io::stderr)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_level(true)
                .with_timer(NoTimestamp)
                .with_writer(std::io::stderr)
                .init();
        }
        tracing::debug!("tracing initialized");
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::Check { paths } => check_files(&paths),
        Commands::Query {
            file,
            class,
            interface,
        } => query_file(&file, &class, &interface),
        Commands::Call {
            file,
            class,
            method,
        } => call_method(&file, &class, &method),
    }
}
