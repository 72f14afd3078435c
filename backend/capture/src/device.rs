//! Capture device seam and the scoped stream guard.
//!
//! The pipeline never talks to platform video APIs directly. The host
//! injects a [`CaptureDevice`]; headless hosts inject one that reports
//! unavailable so the camera affordance is simply not offered.

use anyhow::Result;
use async_trait::async_trait;

/// Whether the device should prefer bandwidth over fidelity. Handheld
/// hosts report `Constrained`, which selects JPEG for the frame encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceProfile {
    Standard,
    Constrained,
}

/// One raw frame, tightly packed RGB8 rows.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

/// A live video stream. `stop` must be idempotent: the guard calls it on
/// every exit path and a host may additionally stop on its own.
#[async_trait]
pub trait VideoStream: Send {
    /// Wait for the stream to report its native resolution.
    async fn resolution(&mut self) -> Result<(u32, u32)>;

    /// Grab one frame at the native resolution.
    async fn grab_frame(&mut self) -> Result<Frame>;

    /// Release the device, stopping all tracks.
    fn stop(&mut self);
}

/// A video capture device the host may or may not have.
#[async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Capability probe; when false the camera affordance is not offered.
    fn is_available(&self) -> bool;

    fn profile(&self) -> DeviceProfile;

    /// Open a live stream. Denial or absence is an acquisition failure.
    async fn open(&self) -> Result<Box<dyn VideoStream>>;
}

/// Guaranteed-release wrapper around an open stream. Whatever exit path
/// the camera acquisition takes, dropping the guard stops the stream, so
/// the device is never left open.
pub struct StreamGuard {
    stream: Box<dyn VideoStream>,
}

impl StreamGuard {
    pub fn new(stream: Box<dyn VideoStream>) -> Self {
        Self { stream }
    }

    pub fn stream(&mut self) -> &mut dyn VideoStream {
        self.stream.as_mut()
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.stream.stop();
    }
}
