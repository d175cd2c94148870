//! Cron scheduler for periodic booking maintenance.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use artshub_core::config::booking::BookingConfig;
use artshub_core::error::AppError;
use artshub_database::repositories::booking::BookingRepository;

use crate::tasks::{CompletionSweepTask, PendingExpiryTask};

/// Cron-based scheduler for the booking maintenance sweeps
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Pending-payment expiry sweep
    expiry: Arc<PendingExpiryTask>,
    /// Completion sweep
    completion: Arc<CompletionSweepTask>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(
        booking_repo: Arc<BookingRepository>,
        config: BookingConfig,
    ) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        let expiry = Arc::new(PendingExpiryTask::new(Arc::clone(&booking_repo), config));
        let completion = Arc::new(CompletionSweepTask::new(booking_repo));

        Ok(Self {
            scheduler,
            expiry,
            completion,
        })
    }

    /// Register all default scheduled tasks
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        self.register_pending_expiry().await?;
        self.register_completion_sweep().await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Pending-payment expiry, every 5 minutes
    async fn register_pending_expiry(&self) -> Result<(), AppError> {
        let task = Arc::clone(&self.expiry);
        let job = CronJob::new_async("0 */5 * * * *", move |_uuid, _lock| {
            let task = Arc::clone(&task);
            Box::pin(async move {
                if let Err(e) = task.run().await {
                    tracing::error!("Pending expiry sweep failed: {}", e);
                }
            })
        })
        .map_err(|e| {
            AppError::internal(format!("Failed to create pending_expiry schedule: {}", e))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add pending_expiry schedule: {}", e))
        })?;

        tracing::info!("Registered: pending_expiry (every 5min)");
        Ok(())
    }

    /// Completion sweep, every 15 minutes
    async fn register_completion_sweep(&self) -> Result<(), AppError> {
        let task = Arc::clone(&self.completion);
        let job = CronJob::new_async("0 */15 * * * *", move |_uuid, _lock| {
            let task = Arc::clone(&task);
            Box::pin(async move {
                if let Err(e) = task.run().await {
                    tracing::error!("Completion sweep failed: {}", e);
                }
            })
        })
        .map_err(|e| {
            AppError::internal(format!("Failed to create completion_sweep schedule: {}", e))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add completion_sweep schedule: {}", e))
        })?;

        tracing::info!("Registered: completion_sweep (every 15min)");
        Ok(())
    }
}
