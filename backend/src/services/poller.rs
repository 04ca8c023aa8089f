//! Background tasks that refresh the published readings.
//!
//! One task per reading kind, each the only writer of its snapshot. A tick reads
//! the wall clock once and publishes a complete reading; a failed tick is logged
//! and the previous reading stays in place.

use std::time::Duration;

use chrono::{DateTime, Utc};
use meeus_core::CalendarReform;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use super::error::ServiceResult;
use super::readings::{calendar_reading, sidereal_reading};
use super::snapshot::{snapshot_channel, SnapshotReader, SnapshotWriter};
use crate::models::{CalendarReading, ObserverLocation, SiderealReading};

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// What the pollers compute and how often.
#[derive(Debug, Clone, PartialEq)]
pub struct PollerSettings {
    pub location: ObserverLocation,
    pub reform: CalendarReform,
    pub sidereal_interval: Duration,
    pub calendar_interval: Duration,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            location: ObserverLocation::default(),
            reform: CalendarReform::default(),
            sidereal_interval: Duration::from_secs(1),
            calendar_interval: Duration::from_secs(60),
        }
    }
}

/// Read access to the latest readings, shared with the HTTP layer.
#[derive(Clone)]
pub struct Readings {
    pub sidereal: SnapshotReader<SiderealReading>,
    pub calendar: SnapshotReader<CalendarReading>,
}

/// Owns the running poller tasks.
pub struct PollerHandle {
    shutdown: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl PollerHandle {
    /// Signal every poller to stop and wait for them to finish.
    pub async fn shutdown(self) {
        // Receivers may already be gone if a task panicked.
        let _ = self.shutdown.send(true);
        for task in self.tasks {
            if let Err(e) = task.await {
                warn!(error = %e, "Poller task ended abnormally");
            }
        }
        info!("All pollers stopped");
    }
}

/// Start the sidereal and calendar pollers on the current tokio runtime.
pub fn spawn_pollers(settings: PollerSettings) -> (Readings, PollerHandle) {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (sidereal_writer, sidereal) = snapshot_channel();
    let (calendar_writer, calendar) = snapshot_channel();

    let PollerSettings {
        location,
        reform,
        sidereal_interval,
        calendar_interval,
    } = settings;

    info!(
        location = %location.name,
        longitude = location.longitude,
        %reform,
        "Starting pollers"
    );

    let sidereal_task = tokio::spawn(run_poller(
        "sidereal",
        sidereal_interval,
        sidereal_writer,
        shutdown_rx.clone(),
        move |now| sidereal_reading(now, &location, reform),
    ));

    let calendar_task = tokio::spawn(run_poller(
        "calendar",
        calendar_interval,
        calendar_writer,
        shutdown_rx,
        move |now| calendar_reading(now, reform),
    ));

    (
        Readings { sidereal, calendar },
        PollerHandle {
            shutdown: shutdown_tx,
            tasks: vec![sidereal_task, calendar_task],
        },
    )
}

async fn run_poller<T, F>(
    name: &'static str,
    period: Duration,
    writer: SnapshotWriter<T>,
    mut shutdown: watch::Receiver<bool>,
    compute: F,
) where
    F: Fn(DateTime<Utc>) -> ServiceResult<T>,
{
    let period = period.max(MIN_PERIOD);
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    debug!(poller = name, period_ms = period.as_millis() as u64, "Poller running");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match compute(Utc::now()) {
                    Ok(reading) => {
                        writer.publish(reading);
                    }
                    Err(e) => {
                        error!(poller = name, error = %e, "Failed to refresh reading");
                    }
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    debug!(poller = name, "Poller stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_settings() -> PollerSettings {
        PollerSettings {
            sidereal_interval: Duration::from_millis(10),
            calendar_interval: Duration::from_millis(10),
            ..PollerSettings::default()
        }
    }

    async fn wait_until<F: Fn() -> bool>(ready: F) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while !ready() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("condition not met in time");
    }

    #[tokio::test]
    async fn test_pollers_publish_first_reading() {
        let (readings, handle) = spawn_pollers(fast_settings());

        wait_until(|| readings.sidereal.is_ready() && readings.calendar.is_ready()).await;

        let sidereal = readings.sidereal.latest().unwrap();
        assert!((0.0..360.0).contains(&sidereal.gmst_degrees));
        assert_eq!(sidereal.location_name, "Greenwich");
        let calendar = readings.calendar.latest().unwrap();
        assert!((1..=366).contains(&calendar.day_of_year));

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_sidereal_reading_advances() {
        let (readings, handle) = spawn_pollers(fast_settings());

        wait_until(|| readings.sidereal.is_ready()).await;
        let first = readings.sidereal.latest().unwrap();
        wait_until(|| {
            readings
                .sidereal
                .latest()
                .map(|r| r.computed_at > first.computed_at)
                .unwrap_or(false)
        })
        .await;

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_last_reading_kept_after_shutdown() {
        let (readings, handle) = spawn_pollers(fast_settings());
        wait_until(|| readings.sidereal.is_ready()).await;

        handle.shutdown().await;
        let frozen = readings.sidereal.latest().unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(std::sync::Arc::ptr_eq(
            &frozen,
            &readings.sidereal.latest().unwrap()
        ));
    }
}
