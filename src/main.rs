//! Robot Panel - robot telemetry daemon binary.
//!
//! Wires the sensor poll loop, the camera feed and the web panel together.
//! This binary runs the simulated drivers so it works on any machine; the
//! robot's hardware build implements the sensor traits for the real I2C
//! devices and feeds the frame buffer from the camera encoder instead.

use clap::Parser;
use robot_panel::{
    start_web_server, AppState, FrameBuffer, SensorPoller, SensorStore, SimBme280, SimCameraFeed,
    SimEns160, WebConfig, DEFAULT_PANEL_PORT, DEFAULT_POLL_INTERVAL_SECS,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "robot_panel")]
#[command(about = "Robot Panel - Raspberry Pi robot telemetry panel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    long_about = "Telemetry daemon for a Raspberry Pi robot: environmental sensor polling, \
                  live MJPEG camera stream and a web panel"
)]
struct Cli {
    /// Web server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Web server port
    #[arg(short, long, default_value_t = DEFAULT_PANEL_PORT)]
    port: u16,

    /// Sensor poll interval in seconds
    #[arg(short, long, default_value_t = DEFAULT_POLL_INTERVAL_SECS)]
    interval: u64,

    /// Disable CORS headers
    #[arg(long)]
    no_cors: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;
    print_banner();

    let store = SensorStore::new();
    let frames = Arc::new(FrameBuffer::new());

    let poller = SensorPoller::new(
        Box::new(SimBme280::new()),
        Box::new(SimEns160::new()),
        store.clone(),
    )
    .with_interval(Duration::from_secs(cli.interval));
    tokio::spawn(poller.run());
    info!("Sensor poll loop started ({}s interval)", cli.interval);

    let feed = SimCameraFeed::new();
    tokio::spawn(feed.run(frames.clone()));
    info!("Camera feed started");

    let config = WebConfig::new(&cli.host, cli.port).with_cors(!cli.no_cors);
    start_web_server(config, AppState::new(store, frames)).await?;

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn print_banner() {
    println!("Robot Panel - Raspberry Pi robot telemetry");
    println!("   Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        use clap::Parser;

        let cli = Cli::try_parse_from(["robot_panel", "--port", "9090"]).unwrap();
        assert_eq!(cli.port, 9090);
    }

    #[test]
    fn test_default_values() {
        use clap::Parser;

        let cli = Cli::try_parse_from(["robot_panel"]).unwrap();
        assert_eq!(cli.port, DEFAULT_PANEL_PORT);
        assert_eq!(cli.interval, DEFAULT_POLL_INTERVAL_SECS);
        assert_eq!(cli.host, "0.0.0.0");
        assert!(!cli.no_cors);
    }
}
