//! The background sensor poll loop.

use crate::sensors::{AirQualitySensor, EnvironmentalSensor, SensorResult};
use crate::telemetry::data::SensorRecord;
use crate::telemetry::store::SensorStore;
use std::time::Duration;
use tokio::time;
use tracing::{debug, warn};

/// Polls the environmental and air-quality sensors on a fixed interval and
/// replaces the [`SensorStore`] snapshot after each successful cycle.
///
/// A cycle is all-or-nothing: the environmental read, the compensation call,
/// and the air-quality read must all succeed before the store is touched.
/// Any fault is logged and the previous snapshot stays in place — stale but
/// internally consistent data beats a partial update. There are no retries
/// within a cycle; the next interval tick simply tries again.
pub struct SensorPoller {
    environmental: Box<dyn EnvironmentalSensor>,
    air_quality: Box<dyn AirQualitySensor>,
    store: SensorStore,
    interval: Duration,
    warmup: Duration,
}

impl SensorPoller {
    /// Create a poller with the default 15 s interval and 2 s warm-up.
    pub fn new(
        environmental: Box<dyn EnvironmentalSensor>,
        air_quality: Box<dyn AirQualitySensor>,
        store: SensorStore,
    ) -> Self {
        Self {
            environmental,
            air_quality,
            store,
            interval: Duration::from_secs(crate::DEFAULT_POLL_INTERVAL_SECS),
            warmup: Duration::from_secs(crate::SENSOR_WARMUP_SECS),
        }
    }

    /// Set the interval between poll cycles.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the warm-up delay before the first cycle.
    pub fn with_warmup(mut self, warmup: Duration) -> Self {
        self.warmup = warmup;
        self
    }

    /// Run the poll loop forever. Spawn this on its own task.
    pub async fn run(mut self) {
        time::sleep(self.warmup).await;

        loop {
            match self.poll_cycle().await {
                Ok(record) => debug!(?record, "sensor snapshot updated"),
                Err(err) => warn!(%err, "sensor poll cycle failed, keeping previous snapshot"),
            }
            time::sleep(self.interval).await;
        }
    }

    /// Run a single poll cycle: environmental read, compensation, air-quality
    /// read, then an atomic whole-record replace.
    ///
    /// On error the store has not been touched.
    pub async fn poll_cycle(&mut self) -> SensorResult<SensorRecord> {
        let env = self.environmental.read().await?;
        self.air_quality
            .compensate(env.temperature_c, env.humidity_pct)
            .await?;
        let air = self.air_quality.read().await?;

        let record = SensorRecord::from_cycle(env, air);
        self.store.replace(record.clone()).await;
        Ok(record)
    }
}
