use std::io::Write;
use std::sync::Arc;

use crossterm::style::Color;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::config::{ConfigSource, resolve_timeout};
use crate::error::AppResult;
use crate::http::{AdmissionGate, Dispatcher, HttpProbe, JobObserver, build_client};
use crate::logger::LogHold;
use crate::sinks::{TargetReport, summary_line};
use crate::ui::{ProgressBoard, ProgressTable};

use super::progress::spawn_progress_ticker;

/// Terminal geometry for live progress output. Log events are held back
/// through `logs` while a block is drawn, since any extra line on the
/// terminal shifts the rows the cursor moves to.
#[derive(Debug, Clone)]
pub(crate) struct LiveDisplay {
    pub width: usize,
    pub no_color: bool,
    pub logs: LogHold,
}

#[derive(Debug, Clone)]
pub(crate) struct RunSettings {
    pub cli_timeout: Option<u64>,
    pub concurrency: usize,
    pub extra_headers: Vec<(String, String)>,
    pub live: Option<LiveDisplay>,
}

/// Checks every target of every source and returns the reports sorted by
/// `(source, key)`.
///
/// One admission gate bounds the whole run. Without live output all targets
/// run concurrently; with it they run one after another so each owns its
/// block of terminal lines.
///
/// # Errors
///
/// Returns an error when a client cannot be built, a check task fails to
/// join, or live output cannot be written.
pub(crate) async fn run_checks(
    settings: &RunSettings,
    sources: Vec<ConfigSource>,
) -> AppResult<Vec<TargetReport>> {
    let gate = AdmissionGate::new(settings.concurrency);
    let mut reports = match &settings.live {
        Some(display) => {
            let (reports, mut out) =
                run_live(settings, sources, gate, display, std::io::stdout()).await?;
            out.flush()?;
            reports
        }
        None => run_concurrent(settings, sources, gate).await?,
    };
    reports.sort_by(|left, right| {
        left.source
            .cmp(&right.source)
            .then_with(|| left.key.cmp(&right.key))
    });
    Ok(reports)
}

fn dispatcher_for(
    settings: &RunSettings,
    source: &ConfigSource,
    gate: &AdmissionGate,
) -> AppResult<Dispatcher<HttpProbe>> {
    let timeout = resolve_timeout(&source.config.global, settings.cli_timeout);
    debug!(
        path = %source.path,
        timeout_ms = timeout.as_millis(),
        "Building client"
    );
    let client = build_client(timeout)?;
    Ok(Dispatcher::with_gate(
        Arc::new(HttpProbe::new(client)),
        gate.clone(),
    ))
}

async fn run_concurrent(
    settings: &RunSettings,
    sources: Vec<ConfigSource>,
    gate: AdmissionGate,
) -> AppResult<Vec<TargetReport>> {
    let mut tasks = Vec::new();
    for source in sources {
        let dispatcher = dispatcher_for(settings, &source, &gate)?;
        for (key, target_config) in source.config.targets {
            let target = Arc::new(target_config.to_target(&key, &settings.extra_headers));
            let dispatcher = dispatcher.clone();
            let source_path = source.path.clone();
            tasks.push(tokio::spawn(async move {
                let results = dispatcher.dispatch(Arc::clone(&target)).await;
                TargetReport::new(source_path, key, target.name.clone(), results)
            }));
        }
    }

    info!("Checking {} targets", tasks.len());
    let mut reports = Vec::with_capacity(tasks.len());
    for task in tasks {
        reports.push(task.await?);
    }
    Ok(reports)
}

pub(crate) async fn run_live<W>(
    settings: &RunSettings,
    sources: Vec<ConfigSource>,
    gate: AdmissionGate,
    display: &LiveDisplay,
    mut out: W,
) -> AppResult<(Vec<TargetReport>, W)>
where
    W: Write + Send + 'static,
{
    let mut reports = Vec::new();
    for source in sources {
        let dispatcher = dispatcher_for(settings, &source, &gate)?;
        for (key, target_config) in source.config.targets {
            let target = Arc::new(target_config.to_target(&key, &settings.extra_headers));
            writeln!(out, "\n[{}] from {}", target.name, source.path)?;
            let held = display.logs.hold();

            let board = Arc::new(ProgressBoard::new(ProgressTable::new(
                &target.jobs(),
                display.width,
                display.no_color,
            )));
            board.begin(&mut out)?;
            let (done_tx, done_rx) = oneshot::channel();
            let ticker = spawn_progress_ticker(Arc::clone(&board), out, done_rx);

            let observer: Arc<dyn JobObserver> = board;
            let results = dispatcher
                .dispatch_observed(Arc::clone(&target), Some(observer))
                .await;
            if done_tx.send(()).is_err() {
                debug!("Progress ticker stopped before completion signal");
            }
            out = ticker.await?;

            let report = TargetReport::new(source.path.clone(), key, target.name.clone(), results);
            write_summary(&mut out, &report, display.no_color)?;
            drop(held);
            reports.push(report);
        }
    }
    Ok((reports, out))
}

fn write_summary<W: Write>(out: &mut W, report: &TargetReport, no_color: bool) -> AppResult<()> {
    let line = summary_line(&report.summary);
    if no_color {
        writeln!(out, "{}", line)?;
    } else {
        let color = if report.summary.all_succeeded() {
            Color::Green
        } else {
            Color::Red
        };
        crossterm::queue!(
            out,
            crossterm::style::SetForegroundColor(color),
            crossterm::style::Print(&line),
            crossterm::style::ResetColor,
            crossterm::style::Print("\n")
        )?;
    }
    out.flush()?;
    Ok(())
}
