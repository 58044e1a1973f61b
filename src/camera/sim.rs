//! Synthetic camera feed.
//!
//! Renders a moving grayscale test pattern and publishes it as JPEG at a
//! fixed frame rate, standing in for the hardware encoder pipeline so the
//! panel works on machines without a camera.

use crate::camera::buffer::FrameBuffer;
use bytes::Bytes;
use image::GrayImage;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time;
use tracing::{debug, warn};

const FPS_LOG_INTERVAL: Duration = Duration::from_secs(5);

/// Test-pattern frame producer.
pub struct SimCameraFeed {
    width: u32,
    height: u32,
    quality: u8,
    frame_rate: u32,
}

impl SimCameraFeed {
    /// Create a feed with the reference camera geometry: 640x480 at 24 fps.
    pub fn new() -> Self {
        Self {
            width: 640,
            height: 480,
            quality: 80,
            frame_rate: 24,
        }
    }

    /// Set the frame size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the frame rate in frames per second.
    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate.max(1);
        self
    }

    /// Render and publish frames forever. Spawn this on its own task.
    pub async fn run(self, buffer: Arc<FrameBuffer>) {
        let period_ms = (1000 / u64::from(self.frame_rate)).max(1);
        let mut ticker = time::interval(Duration::from_millis(period_ms));
        let mut tick: u64 = 0;
        let mut frames_since_log: u32 = 0;
        let mut last_log = Instant::now();

        loop {
            ticker.tick().await;
            match self.render(tick) {
                Some(jpeg) => buffer.publish(jpeg),
                None => warn!("failed to encode synthetic frame"),
            }
            tick += 1;

            frames_since_log += 1;
            let elapsed = last_log.elapsed();
            if elapsed >= FPS_LOG_INTERVAL {
                let fps = f64::from(frames_since_log) / elapsed.as_secs_f64();
                debug!("camera feed rate ~ {:.1} fps", fps);
                frames_since_log = 0;
                last_log = Instant::now();
            }
        }
    }

    /// Render one frame of the pattern: a diagonal gradient with a vertical
    /// bar sweeping left to right.
    pub fn render(&self, tick: u64) -> Option<Bytes> {
        let bar_x = (tick * 4 % u64::from(self.width)) as u32;
        let phase = (tick % 224) as u32;

        let img = GrayImage::from_fn(self.width, self.height, |x, y| {
            if x.abs_diff(bar_x) < 8 {
                image::Luma([255u8])
            } else {
                image::Luma([((x + y + phase) % 224) as u8])
            }
        });

        let mut jpeg_bytes = Vec::new();
        let mut encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg_bytes, self.quality);
        encoder.encode_image(&img).ok()?;

        Some(Bytes::from(jpeg_bytes))
    }
}

impl Default for SimCameraFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_produces_well_formed_jpeg() {
        let feed = SimCameraFeed::new().with_size(64, 48);
        let jpeg = feed.render(0).expect("encoding must succeed");
        // JPEG magic bytes
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn consecutive_frames_differ() {
        let feed = SimCameraFeed::new().with_size(64, 48);
        let a = feed.render(0).unwrap();
        let b = feed.render(10).unwrap();
        assert_ne!(a, b, "the pattern must move between ticks");
    }

    #[tokio::test]
    async fn run_publishes_into_the_buffer() {
        let buffer = Arc::new(FrameBuffer::new());
        let feed = SimCameraFeed::new().with_size(32, 24).with_frame_rate(100);
        let task = tokio::spawn(feed.run(buffer.clone()));

        let frame = buffer.next_frame(0).await;
        assert!(frame.generation >= 1);
        assert_eq!(&frame.bytes[0..2], &[0xFF, 0xD8]);

        task.abort();
    }
}
