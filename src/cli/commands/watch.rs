//! Watch Command - Follow a scan live until it settles

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use tokio::signal;

use crate::application::polling::{PollEvent, ScanSnapshot, spawn_detail_poller};
use crate::cli::Cli;
use crate::cli::context::CliContext;
use crate::cli::exit_codes;
use crate::cli::output::OutputFormat;
use crate::domain::scan::entities::ScanStatus;

/// Arguments for the watch command
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Scan id to follow
    pub scan_id: String,
}

/// Run the watch command
pub async fn run(ctx: &CliContext, cli: &Cli, args: &WatchArgs) -> Result<i32> {
    follow_scan(ctx, cli, &args.scan_id).await
}

/// Follow a scan until it settles or the user interrupts.
///
/// Streams status changes and new log lines while polling. Once the scan
/// settles the findings and summary are rendered and the exit code reflects
/// the final status. Ctrl-C stops the local view only; the scan keeps
/// running on the backend.
pub async fn follow_scan(ctx: &CliContext, _cli: &Cli, scan_id: &str) -> Result<i32> {
    if ctx.output.format() != OutputFormat::Json {
        ctx.output.header(&format!("Watching scan {scan_id}"));
    }

    let interval = Duration::from_millis(ctx.config.poll.detail_interval_ms);
    let mut poller = spawn_detail_poller(ctx.client.clone(), scan_id.to_string(), interval);

    let mut last_status: Option<ScanStatus> = None;
    let mut last_error: Option<String> = None;
    let mut printed_logs = 0usize;
    let mut last_snapshot: Option<ScanSnapshot> = None;

    // Registered once so a signal between loop iterations is not lost
    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let settled = loop {
        tokio::select! {
            event = poller.recv() => match event {
                Some(PollEvent::Snapshot(snapshot)) => {
                    last_error = None;
                    if ctx.output.format() != OutputFormat::Json {
                        if last_status != Some(snapshot.result.status) {
                            ctx.output.print(&format!("Status: {}", snapshot.result.status));
                            last_status = Some(snapshot.result.status);
                        }
                        for line in snapshot.logs.iter().skip(printed_logs) {
                            ctx.output.print(&format!("  {line}"));
                        }
                        printed_logs = printed_logs.max(snapshot.logs.len());
                    }
                    last_snapshot = Some(snapshot);
                }
                Some(PollEvent::Error(e)) => {
                    // Polling continues; repeat the warning only when the
                    // failure changes
                    let message = e.to_string();
                    if last_error.as_deref() != Some(&message) {
                        ctx.output.warn(&format!("Fetch failed, still polling: {message}"));
                        last_error = Some(message);
                    }
                }
                Some(PollEvent::Settled(status)) => break Some(status),
                None => break None,
            },
            _ = &mut ctrl_c => {
                poller.cancel();
                ctx.output.info("Stopped watching; the scan continues on the backend");
                return Ok(exit_codes::SUCCESS);
            }
        }
    };

    poller.join().await;

    let Some(status) = settled else {
        return Ok(exit_codes::SUCCESS);
    };

    match ctx.output.format() {
        OutputFormat::Json => {
            if let Some(snapshot) = &last_snapshot {
                ctx.output.json(&snapshot.result)?;
            }
        }
        _ => {
            if let Some(snapshot) = &last_snapshot {
                render_settled(ctx, snapshot);
            }
            match status {
                ScanStatus::Failed => ctx.output.error("Scan failed"),
                _ => ctx.output.success("Scan completed"),
            }
        }
    }

    if status == ScanStatus::Failed {
        Ok(exit_codes::SCAN_FAILED)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

fn render_settled(ctx: &CliContext, snapshot: &ScanSnapshot) {
    if snapshot.result.vulnerabilities.is_empty() {
        ctx.output.print("\nNo findings reported");
        return;
    }

    ctx.output.print("");
    ctx.output.print_findings_table(&snapshot.result.vulnerabilities);
    let summary = &snapshot.summary;
    ctx.output.print(&format!(
        "\n{} findings: {} critical, {} high, {} medium, {} low, {} info",
        summary.total(),
        summary.critical,
        summary.high,
        summary.medium,
        summary.low,
        summary.info
    ));
}
