use std::io::{IsTerminal, Write};

use clap::Parser;
use tracing::{debug, error};

use crate::app::{LiveDisplay, RunSettings, run_checks};
use crate::args::{OutputMode, VitalsArgs};
use crate::config::load_config_sources;
use crate::error::{AppError, AppResult};
use crate::logger::LogHold;
use crate::sinks::{DEFAULT_TERMINAL_WIDTH, RenderOptions, render};

pub(crate) fn run() -> AppResult<()> {
    let args = VitalsArgs::parse();

    let logs = crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args, logs))
}

async fn run_async(args: VitalsArgs, logs: LogHold) -> AppResult<()> {
    let sources = load_config_sources(&args.config).inspect_err(|err| {
        error!("{}", err);
    })?;

    let stdout_is_terminal = std::io::stdout().is_terminal();
    let mode = args.output_mode(stdout_is_terminal);
    let terminal_width = terminal_width();
    debug!(?mode, terminal_width, sources = sources.len(), "Starting run");

    let settings = RunSettings {
        cli_timeout: args.timeout,
        concurrency: args.concurrency,
        extra_headers: args.headers,
        live: (mode == OutputMode::Live).then_some(LiveDisplay {
            width: terminal_width,
            no_color: args.no_color,
            logs,
        }),
    };
    let reports = run_checks(&settings, sources).await?;

    let options = RenderOptions {
        verbose: args.verbose,
        no_color: args.no_color || !stdout_is_terminal || !mode.is_terminal(),
        terminal_width,
    };
    let rendered = render(mode, &reports, &options)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    let total = reports
        .iter()
        .fold(0usize, |sum, report| sum.saturating_add(report.summary.total));
    let failed = reports
        .iter()
        .fold(0usize, |sum, report| sum.saturating_add(report.summary.failed));
    if args.fail_on_error && failed > 0 {
        return Err(AppError::ChecksFailed { failed, total });
    }
    Ok(())
}

fn terminal_width() -> usize {
    crossterm::terminal::size()
        .ok()
        .map(|(columns, _rows)| usize::from(columns))
        .filter(|columns| *columns > 0)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
}
