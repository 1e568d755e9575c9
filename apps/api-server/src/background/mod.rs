//! Background jobs.

mod scheduler;

use std::sync::Arc;

use almanac_core::services::WeatherResolver;
use tokio_cron_scheduler::JobSchedulerError;

pub use scheduler::{Scheduler, SchedulerConfig};

/// Start the scheduler with the stale weather purge registered.
pub async fn start(
    config: SchedulerConfig,
    weather: Arc<WeatherResolver>,
) -> Result<Scheduler, JobSchedulerError> {
    let scheduler = Scheduler::new(config.clone()).await?;

    scheduler
        .add_cron(&config.weather_purge_cron, move || {
            let weather = weather.clone();
            async move {
                match weather.purge_stale().await {
                    Ok(removed) => tracing::debug!(removed, "Weather purge finished"),
                    Err(e) => tracing::error!(error = %e, "Weather purge failed"),
                }
            }
        })
        .await?;

    scheduler.start().await?;
    Ok(scheduler)
}
