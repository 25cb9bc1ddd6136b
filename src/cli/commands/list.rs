//! List Command - Tracked scans overview

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use tokio::signal;

use crate::application::polling::{OverviewEvent, spawn_overview_poller};
use crate::cli::Cli;
use crate::cli::context::CliContext;
use crate::cli::exit_codes;
use crate::cli::output::OutputFormat;
use crate::domain::scan::entities::TrackedScan;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Keep refreshing active scans until interrupted
    #[arg(long, short)]
    pub watch: bool,
}

/// Run the list command
pub async fn run(ctx: &CliContext, cli: &Cli, args: &ListArgs) -> Result<i32> {
    if args.watch {
        return watch_list(ctx, cli).await;
    }

    let scans = ctx.history.list().await?;
    render_list(ctx, &scans)?;

    Ok(exit_codes::SUCCESS)
}

/// Re-render the tracked list as the overview poller reconciles statuses
async fn watch_list(ctx: &CliContext, _cli: &Cli) -> Result<i32> {
    let interval = Duration::from_millis(ctx.config.poll.overview_interval_ms);
    let mut poller = spawn_overview_poller(ctx.client.clone(), ctx.history.clone(), interval);

    let mut last_rendered: Option<Vec<TrackedScan>> = None;

    // Registered once so a signal between loop iterations is not lost
    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            event = poller.recv() => match event {
                Some(OverviewEvent::Refreshed(scans)) => {
                    ctx.output.verbose(&format!("Refreshed {} tracked scans", scans.len()));
                    // Only redraw when something actually changed
                    if last_rendered.as_ref() != Some(&scans) {
                        render_list(ctx, &scans)?;
                        last_rendered = Some(scans);
                    }
                }
                None => return Ok(exit_codes::SUCCESS),
            },
            _ = &mut ctrl_c => {
                poller.cancel();
                return Ok(exit_codes::SUCCESS);
            }
        }
    }
}

fn render_list(ctx: &CliContext, scans: &[TrackedScan]) -> Result<()> {
    match ctx.output.format() {
        OutputFormat::Json => ctx.output.json(&scans)?,
        _ => {
            if scans.is_empty() {
                ctx.output.print("No tracked scans");
                ctx.output.info("Start one with: scanwatch scan <target>");
            } else {
                ctx.output.print("");
                ctx.output.print_scans_table(scans);
            }
        }
    }
    Ok(())
}
