//! Data structures for sensor telemetry.
//!
//! The serialized form of [`SensorRecord`] is the `/api/sensors` wire format
//! consumed by the panel page, so the JSON field names follow the devices
//! (`bme280`, `ens160`) rather than the Rust types.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// One reading from the environmental sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvReading {
    /// Ambient temperature in degrees Celsius
    pub temperature_c: f64,
    /// Relative humidity in percent
    pub humidity_pct: f64,
    /// Barometric pressure, rounded to whole hectopascals
    pub pressure_hpa: u32,
}

/// One reading from the air-quality sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReading {
    /// Air quality index
    pub aqi: u8,
    /// Total volatile organic compounds in parts per billion
    pub tvoc_ppb: u16,
    /// Equivalent CO2 concentration in parts per million
    pub eco2_ppm: u16,
}

/// The most recent combined sensor snapshot.
///
/// All three fields are replaced together from a single successful poll
/// cycle; a record never mixes readings from two different cycles. Before the
/// first successful cycle every field is `None` and serializes as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    /// Environmental reading, `None` until the first successful poll
    pub bme280: Option<EnvReading>,
    /// Air-quality reading, `None` until the first successful poll
    pub ens160: Option<AirQualityReading>,
    /// Unix timestamp (seconds) of the poll cycle that produced this record
    pub ts: Option<f64>,
}

impl SensorRecord {
    /// Build a record from one poll cycle's readings, stamped with the
    /// current time.
    pub fn from_cycle(env: EnvReading, air: AirQualityReading) -> Self {
        Self {
            bme280: Some(env),
            ens160: Some(air),
            ts: Some(unix_time()),
        }
    }
}

/// Current unix time in seconds, as a float.
pub fn unix_time() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}
