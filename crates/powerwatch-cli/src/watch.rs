//! `watch` mode: cycles on a cron schedule, never overlapping.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::LiveMonitor;

/// Run cycles on `schedule` until Ctrl-C or SIGTERM.
///
/// A tick that fires while the previous cycle (including its recovery wait)
/// is still running is skipped.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the schedule expression is invalid or the
/// scheduler cannot be started or stopped.
pub async fn run(monitor: LiveMonitor, schedule: &str) -> Result<(), JobSchedulerError> {
    let monitor = Arc::new(monitor);
    let running = Arc::new(Mutex::new(()));

    let mut scheduler = JobScheduler::new().await?;
    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let monitor = Arc::clone(&monitor);
        let running = Arc::clone(&running);

        Box::pin(async move {
            let Ok(_guard) = running.try_lock() else {
                tracing::warn!("previous cycle still running; skipping tick");
                return;
            };
            match monitor.run_cycle().await {
                Ok(outcome) => tracing::info!(outcome = ?outcome, "scheduler: cycle complete"),
                Err(e) => tracing::error!(error = %e, "scheduler: cycle failed"),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    tracing::info!(schedule, "watching for outages");

    shutdown_signal().await;
    scheduler.shutdown().await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, stopping scheduler");
}
