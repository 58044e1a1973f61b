//! # Robot Panel - Raspberry Pi robot telemetry daemon
//!
//! A small always-on daemon for a Raspberry Pi robot: one background loop
//! polls the environmental sensors (BME280 + ENS160) into a shared snapshot,
//! the camera encoder pushes JPEG frames into a shared frame buffer, and a
//! web panel serves both — a JSON snapshot at `/api/sensors` and a live
//! MJPEG stream at `/stream.mjpg`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use robot_panel::{
//!     start_web_server, AppState, FrameBuffer, SensorPoller, SensorStore,
//!     SimBme280, SimEns160, WebConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SensorStore::new();
//!     let frames = Arc::new(FrameBuffer::new());
//!
//!     let poller = SensorPoller::new(
//!         Box::new(SimBme280::new()),
//!         Box::new(SimEns160::new()),
//!         store.clone(),
//!     );
//!     tokio::spawn(poller.run());
//!
//!     let config = WebConfig::default();
//!     start_web_server(config, AppState::new(store, frames)).await?;
//!     Ok(())
//! }
//! ```
//!
//! Hardware builds implement [`EnvironmentalSensor`] and [`AirQualitySensor`]
//! for the real I2C drivers and call [`FrameBuffer::publish`] from the camera
//! encoder callback; the simulated drivers exist so the daemon runs headless.

pub mod camera;
pub mod error;
pub mod sensors;
pub mod telemetry;
pub mod web;

// Re-export public API
pub use camera::{Frame, FrameBuffer, SimCameraFeed};
pub use error::{PanelError, Result};
pub use sensors::{
    sim::{SimBme280, SimEns160},
    AirQualitySensor, EnvironmentalSensor, SensorError,
};
pub use telemetry::{
    data::{AirQualityReading, EnvReading, SensorRecord},
    poller::SensorPoller,
    store::SensorStore,
};
pub use web::{handlers::AppState, start_web_server, WebConfig};

/// The default web panel port
pub const DEFAULT_PANEL_PORT: u16 = 7123;

/// The default sensor poll interval in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;

/// Delay before the first poll cycle, letting the sensors stabilize after
/// power-on
pub const SENSOR_WARMUP_SECS: u64 = 2;
