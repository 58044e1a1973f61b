//! Camera frame plumbing: the shared latest-frame buffer and a synthetic
//! feed for hardware-less operation.

pub mod buffer;
pub mod sim;

pub use buffer::{Frame, FrameBuffer};
pub use sim::SimCameraFeed;
