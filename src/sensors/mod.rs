//! Sensor driver interfaces.
//!
//! The physical drivers live outside this crate (the robot's hardware stack
//! wires real I2C drivers for the BME280 and ENS160); the daemon only needs
//! the narrow read/compensate surface below. [`sim`] provides in-process
//! implementations for headless development and CI.

pub mod sim;

use crate::telemetry::data::{AirQualityReading, EnvReading};
use async_trait::async_trait;

/// A specialized `Result` type for sensor driver operations.
pub type SensorResult<T> = std::result::Result<T, SensorError>;

/// Faults a sensor driver can raise.
///
/// All of these are recovered locally by the poll loop: the cycle is logged
/// and skipped, and the previous snapshot stays in place.
#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    /// Bus or device I/O failed (timeout, NAK, transfer error)
    #[error("sensor I/O error: {0}")]
    Io(String),

    /// The device answered, but the payload did not decode
    #[error("sensor decode error: {0}")]
    Decode(String),
}

impl SensorError {
    /// Create a new sensor I/O error
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Create a new sensor decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

/// Environmental sensor: temperature, humidity, pressure.
#[async_trait]
pub trait EnvironmentalSensor: Send {
    /// Take one reading from the device.
    async fn read(&mut self) -> SensorResult<EnvReading>;
}

/// Air-quality sensor: AQI, TVOC, eCO2.
///
/// The device needs the current temperature and humidity for accurate
/// readings, so the poll loop feeds it each cycle's environmental values
/// before reading.
#[async_trait]
pub trait AirQualitySensor: Send {
    /// Feed the device the temperature/humidity compensation values.
    async fn compensate(&mut self, temperature_c: f64, humidity_pct: f64) -> SensorResult<()>;

    /// Take one reading from the device.
    async fn read(&mut self) -> SensorResult<AirQualityReading>;
}
