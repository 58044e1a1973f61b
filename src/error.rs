//! Error handling for the robot panel daemon.

/// A specialized `Result` type for panel operations.
pub type Result<T> = std::result::Result<T, PanelError>;

/// The main error type for the panel daemon.
///
/// Sensor faults are handled inside the poll loop (see
/// [`crate::sensors::SensorError`]) and never surface here; this type covers
/// the daemon's own lifecycle — binding the listener, bad configuration, and
/// server I/O.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Web server error
    #[error("Web server error: {0}")]
    WebServer(String),
}

impl PanelError {
    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new web server error
    pub fn web_server_error(msg: impl Into<String>) -> Self {
        Self::WebServer(msg.into())
    }
}
