//! Background pollers for live scan views
//!
//! Two pollers cover the two live views: a detail poller follows a single
//! scan, an overview poller reconciles the whole tracked list. Both run as
//! tokio tasks behind a [`PollerHandle`] whose cancellation token doubles
//! as the liveness flag: a fetch result that lands after cancellation is
//! discarded, never emitted.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::application::errors::BackendError;
use crate::domain::scan::entities::{ScanResult, ScanStatus, ScanSummary, TrackedScan, TrackedScanPatch};
use crate::domain::scan::repositories::IScanHistoryRepository;
use crate::infrastructure::api_clients::ScanApiClient;

/// One consistent view of a scan: status, logs, and summary from the same
/// tick. Partial views are never produced.
#[derive(Debug, Clone)]
pub struct ScanSnapshot {
    pub result: ScanResult,
    pub logs: Vec<String>,
    pub summary: ScanSummary,
}

/// Events emitted by the detail poller
#[derive(Debug)]
pub enum PollEvent {
    /// A successful combined fetch
    Snapshot(ScanSnapshot),
    /// A failed tick; polling continues
    Error(BackendError),
    /// The scan reached a terminal status; no further fetches follow
    Settled(ScanStatus),
}

/// Events emitted by the overview poller
#[derive(Debug)]
pub enum OverviewEvent {
    /// The tracked list after reconciling non-terminal statuses
    Refreshed(Vec<TrackedScan>),
}

/// Handle owning a polling task
///
/// Dropping the handle closes the event channel, which stops the task on
/// its next send; `cancel` stops it promptly and discards any in-flight
/// fetch.
pub struct PollerHandle<E> {
    events: mpsc::Receiver<E>,
    cancel_token: CancellationToken,
    task: JoinHandle<()>,
}

impl<E> PollerHandle<E> {
    /// Next event, or None once the poller has stopped
    pub async fn recv(&mut self) -> Option<E> {
        self.events.recv().await
    }

    /// Stop polling; results of an in-flight fetch are discarded
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    /// Wait for the polling task to finish
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

/// Spawn a poller following a single scan.
///
/// The first fetch happens immediately, then once per `interval`. Each tick
/// joins status, logs, and summary all-or-nothing: one failing leg fails
/// the whole tick with a single [`PollEvent::Error`] and no partial update.
/// A terminal status emits the final snapshot, then [`PollEvent::Settled`],
/// and the task exits without fetching again.
pub fn spawn_detail_poller(
    client: Arc<ScanApiClient>,
    scan_id: String,
    interval: Duration,
) -> PollerHandle<PollEvent> {
    let cancel_token = CancellationToken::new();
    let token = cancel_token.clone();
    let (tx, rx) = mpsc::channel(16);

    let task = tokio::spawn(async move {
        let mut interval_timer = tokio::time::interval(interval);
        // A slow fetch delays the next tick instead of bursting to catch up
        interval_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // The first tick resolves immediately, giving the initial fetch
        loop {
            tokio::select! {
                _ = interval_timer.tick() => {
                    tokio::select! {
                        outcome = fetch_snapshot(&client, &scan_id) => {
                            // The view may have gone away while the fetch ran
                            if token.is_cancelled() {
                                return;
                            }
                            match outcome {
                                Ok(snapshot) => {
                                    let status = snapshot.result.status;
                                    if tx.send(PollEvent::Snapshot(snapshot)).await.is_err() {
                                        return;
                                    }
                                    if status.is_terminal() {
                                        tracing::debug!(scan_id = %scan_id, status = %status, "Scan settled, polling stopped");
                                        let _ = tx.send(PollEvent::Settled(status)).await;
                                        return;
                                    }
                                }
                                Err(e) => {
                                    tracing::debug!(scan_id = %scan_id, error = %e, "Poll tick failed");
                                    if tx.send(PollEvent::Error(e)).await.is_err() {
                                        return;
                                    }
                                }
                            }
                        }
                        _ = token.cancelled() => {
                            return;
                        }
                    }
                }
                _ = token.cancelled() => {
                    return;
                }
            }
        }
    });

    PollerHandle {
        events: rx,
        cancel_token,
        task,
    }
}

/// Spawn a poller reconciling the whole tracked list.
///
/// Each tick fetches current status only for non-terminal entries, writes
/// status changes back through the history port, and emits the reconciled
/// list. Per-scan fetch failures keep the last known status and never fail
/// the tick. Runs until cancelled.
pub fn spawn_overview_poller(
    client: Arc<ScanApiClient>,
    history: Arc<dyn IScanHistoryRepository>,
    interval: Duration,
) -> PollerHandle<OverviewEvent> {
    let cancel_token = CancellationToken::new();
    let token = cancel_token.clone();
    let (tx, rx) = mpsc::channel(16);

    let task = tokio::spawn(async move {
        let mut interval_timer = tokio::time::interval(interval);
        interval_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval_timer.tick() => {
                    tokio::select! {
                        scans = refresh_tracked(&client, history.as_ref()) => {
                            if token.is_cancelled() {
                                return;
                            }
                            if tx.send(OverviewEvent::Refreshed(scans)).await.is_err() {
                                return;
                            }
                        }
                        _ = token.cancelled() => {
                            return;
                        }
                    }
                }
                _ = token.cancelled() => {
                    return;
                }
            }
        }
    });

    PollerHandle {
        events: rx,
        cancel_token,
        task,
    }
}

async fn fetch_snapshot(
    client: &ScanApiClient,
    scan_id: &str,
) -> Result<ScanSnapshot, BackendError> {
    let (result, logs, summary) = tokio::try_join!(
        client.get_scan(scan_id),
        client.get_logs(scan_id),
        client.get_summary(scan_id),
    )?;

    Ok(ScanSnapshot {
        result,
        logs,
        summary,
    })
}

async fn refresh_tracked(
    client: &ScanApiClient,
    history: &dyn IScanHistoryRepository,
) -> Vec<TrackedScan> {
    let mut scans = match history.list().await {
        Ok(scans) => scans,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load tracked scans");
            return Vec::new();
        }
    };

    for scan in scans.iter_mut().filter(|s| !s.status.is_terminal()) {
        match client.get_scan(&scan.id).await {
            Ok(result) => {
                if result.status != scan.status {
                    scan.status = result.status;
                    if let Err(e) = history
                        .update(&scan.id, TrackedScanPatch::status(result.status))
                        .await
                    {
                        tracing::warn!(scan_id = %scan.id, error = %e, "Failed to persist status change");
                    }
                }
            }
            Err(e) => {
                tracing::debug!(scan_id = %scan.id, error = %e, "Status refresh failed, keeping last known status");
            }
        }
    }

    scans
}
