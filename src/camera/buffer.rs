//! The shared latest-frame cell with wake-on-publish signaling.

use bytes::Bytes;
use tokio::sync::watch;

/// One encoded camera frame together with its freshness counter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// JPEG-encoded image data
    pub bytes: Bytes,
    /// Monotonically increasing counter; bumped exactly once per publish.
    /// Generation 0 means "no frame produced yet".
    pub generation: u64,
}

/// Process-wide cell holding the most recently encoded camera frame.
///
/// Exactly one producer (the camera encoder) overwrites the frame at the
/// camera's native rate; any number of stream handlers wait on it. Only the
/// latest frame is retained — a reader that falls behind misses intermediate
/// frames and jumps straight to the newest one. The producer never blocks on
/// reader speed.
///
/// Internally this is a `tokio::sync::watch` channel: a publish replaces the
/// value and wakes every waiter in one step, and waiters re-check the
/// generation on wake, so there is no missed-wakeup window between "check"
/// and "sleep".
#[derive(Debug)]
pub struct FrameBuffer {
    latest: watch::Sender<Frame>,
}

impl FrameBuffer {
    /// Create an empty buffer (generation 0, no frame).
    pub fn new() -> Self {
        let (latest, _) = watch::channel(Frame::default());
        Self { latest }
    }

    /// Replace the buffered frame and wake every waiting reader.
    ///
    /// Safe to call from any thread; never waits on readers.
    pub fn publish(&self, bytes: Bytes) {
        self.latest.send_modify(|frame| {
            frame.bytes = bytes;
            frame.generation += 1;
        });
    }

    /// Suspend until the buffer holds a frame newer than `last_seen`, then
    /// return it.
    ///
    /// Passing the generation of the previously returned frame yields a
    /// frame-by-frame stream that skips ahead whenever the producer outruns
    /// the caller; passing 0 waits for the first frame ever published.
    pub async fn next_frame(&self, last_seen: u64) -> Frame {
        let mut rx = self.latest.subscribe();
        let frame = rx
            .wait_for(|frame| frame.generation > last_seen)
            .await
            // The sender lives inside self, which the caller borrows for the
            // duration of this future, so the channel cannot close.
            .expect("frame buffer channel closed");
        frame.clone()
    }

    /// The generation of the most recently published frame.
    pub fn generation(&self) -> u64 {
        self.latest.borrow().generation
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
