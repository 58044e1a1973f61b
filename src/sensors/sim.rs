//! Simulated sensor drivers for headless development and CI.
//!
//! Both stubs always succeed and produce plausible, slowly drifting values,
//! so the full daemon can run on a workstation with no I2C bus attached.

use crate::sensors::{AirQualitySensor, EnvironmentalSensor, SensorResult};
use crate::telemetry::data::{AirQualityReading, EnvReading};
use async_trait::async_trait;

/// Simulated BME280: values drift sinusoidally around room conditions.
#[derive(Debug, Default)]
pub struct SimBme280 {
    cycle: u64,
}

impl SimBme280 {
    /// Create a new simulated environmental sensor.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EnvironmentalSensor for SimBme280 {
    async fn read(&mut self) -> SensorResult<EnvReading> {
        let phase = self.cycle as f64 / 20.0;
        self.cycle += 1;

        // Round the way the real driver wrapper does: one decimal for
        // temperature and humidity, whole hPa for pressure.
        let temperature_c = round1(22.5 + 1.5 * phase.sin());
        let humidity_pct = round1(41.0 + 5.0 * (phase / 3.0).cos());
        let pressure_hpa = (1013.0 + 2.0 * (phase / 7.0).sin()).round() as u32;

        Ok(EnvReading {
            temperature_c,
            humidity_pct,
            pressure_hpa,
        })
    }
}

/// Simulated ENS160: records the last compensation values and derives its
/// readings from them, like the real device does.
#[derive(Debug)]
pub struct SimEns160 {
    cycle: u64,
    temperature_c: f64,
    humidity_pct: f64,
}

impl SimEns160 {
    /// Create a new simulated air-quality sensor.
    pub fn new() -> Self {
        Self {
            cycle: 0,
            temperature_c: 25.0,
            humidity_pct: 50.0,
        }
    }

    /// The compensation values last fed to the device.
    pub fn compensation(&self) -> (f64, f64) {
        (self.temperature_c, self.humidity_pct)
    }
}

#[async_trait]
impl AirQualitySensor for SimEns160 {
    async fn compensate(&mut self, temperature_c: f64, humidity_pct: f64) -> SensorResult<()> {
        self.temperature_c = temperature_c;
        self.humidity_pct = humidity_pct;
        Ok(())
    }

    async fn read(&mut self) -> SensorResult<AirQualityReading> {
        let phase = self.cycle as f64 / 10.0;
        self.cycle += 1;

        // Warmer and more humid air nudges the simulated VOC load upward.
        let load = (self.temperature_c - 20.0).max(0.0) + (self.humidity_pct - 40.0).max(0.0) / 10.0;
        let tvoc_ppb = (80.0 + 15.0 * load + 30.0 * phase.sin()).max(0.0) as u16;
        let eco2_ppm = 420 + tvoc_ppb / 4;
        let aqi = match tvoc_ppb {
            0..=120 => 1,
            121..=300 => 2,
            _ => 3,
        };

        Ok(AirQualityReading {
            aqi,
            tvoc_ppb,
            eco2_ppm,
        })
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
