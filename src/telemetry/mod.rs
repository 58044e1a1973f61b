//! Sensor telemetry: the shared snapshot cell and the background poll loop.

pub mod data;
pub mod poller;
pub mod store;

pub use data::{AirQualityReading, EnvReading, SensorRecord};
pub use poller::SensorPoller;
pub use store::SensorStore;
