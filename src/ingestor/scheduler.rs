use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tracing::{error, info};

use super::IngestorService;
use crate::errors::{AppResult, SourceResult};
use crate::models::RefreshStatus;

pub type ShutdownSender = broadcast::Sender<()>;
pub type ShutdownReceiver = broadcast::Receiver<()>;

pub fn create_shutdown_channel() -> (ShutdownSender, ShutdownReceiver) {
    broadcast::channel(1)
}

/// Read side of the refresh schedule, shared with the web layer
#[derive(Clone)]
pub struct ScheduleHandle {
    status: Arc<RwLock<RefreshStatus>>,
}

impl ScheduleHandle {
    fn new(interval: Duration) -> Self {
        let next_run_at = Utc::now() + to_chrono(interval);
        Self {
            status: Arc::new(RwLock::new(RefreshStatus {
                interval_hours: interval.as_secs() / 3600,
                next_run_at,
                last_success_at: None,
                last_error: None,
                last_entry_count: None,
            })),
        }
    }

    pub async fn next_run(&self) -> DateTime<Utc> {
        self.status.read().await.next_run_at
    }

    pub async fn status(&self) -> RefreshStatus {
        self.status.read().await.clone()
    }

    async fn time_until_next_run(&self) -> Duration {
        let next = self.next_run().await;
        (next - Utc::now()).to_std().unwrap_or(Duration::ZERO)
    }
}

fn to_chrono(interval: Duration) -> chrono::Duration {
    chrono::Duration::from_std(interval).unwrap_or_else(|_| chrono::Duration::weeks(52))
}

/// Drives refresh cycles on a fixed delay
///
/// The next run is scheduled `interval` after the previous cycle finished,
/// whether it succeeded or not, so a slow download pushes later runs back
/// instead of stacking them up.
pub struct SchedulerService {
    ingestor: IngestorService,
    interval: Duration,
    handle: ScheduleHandle,
}

impl SchedulerService {
    pub fn new(ingestor: IngestorService, interval: Duration) -> Self {
        Self {
            ingestor,
            interval,
            handle: ScheduleHandle::new(interval),
        }
    }

    pub fn handle(&self) -> ScheduleHandle {
        self.handle.clone()
    }

    /// Run the first cycle before anything is served
    ///
    /// Failure here is fatal to startup: there would be nothing to serve.
    pub async fn initial_refresh(&self) -> AppResult<usize> {
        info!("Performing initial update of mappings");
        let count = self.run_cycle().await?;
        info!("Initial mapping update complete: {} mappings", count);
        Ok(count)
    }

    /// One fetch, parse and replace pass, recorded in the schedule
    pub async fn run_cycle(&self) -> SourceResult<usize> {
        let result = self.ingestor.refresh_mappings().await;
        let finished_at = Utc::now();

        let mut status = self.handle.status.write().await;
        match &result {
            Ok(count) => {
                status.last_success_at = Some(finished_at);
                status.last_entry_count = Some(*count);
                status.last_error = None;
            }
            Err(e) => {
                status.last_error = Some(e.to_string());
            }
        }
        status.next_run_at = finished_at + to_chrono(self.interval);
        info!(
            "Next mapping refresh scheduled for {}",
            status.next_run_at.format("%Y-%m-%d %H:%M:%S UTC")
        );

        result
    }

    /// Background loop; returns once a shutdown signal arrives
    pub async fn start(self, mut shutdown_rx: ShutdownReceiver) {
        info!(
            "Starting scheduler service (interval: {}s)",
            self.interval.as_secs()
        );

        loop {
            let wait = self.handle.time_until_next_run().await;

            tokio::select! {
                _ = tokio::time::sleep(wait) => {
                    if let Err(e) = self.run_cycle().await {
                        error!("Scheduled mapping refresh failed, keeping previous table: {}", e);
                    }
                }
                _ = shutdown_rx.recv() => {
                    info!("Scheduler service shutting down");
                    break;
                }
            }
        }
    }
}
