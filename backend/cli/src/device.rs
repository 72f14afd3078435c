//! Capture device binding for the terminal host.

use anyhow::bail;
use async_trait::async_trait;

use snaptext_capture::{CaptureDevice, DeviceProfile, VideoStream};

/// A terminal host has no sanctioned video backend, so the capability
/// probe reports unavailable and the camera affordance is not offered.
/// Handheld hosts inject their own device implementation instead.
pub struct HostCamera;

#[async_trait]
impl CaptureDevice for HostCamera {
    fn is_available(&self) -> bool {
        false
    }

    fn profile(&self) -> DeviceProfile {
        DeviceProfile::Standard
    }

    async fn open(&self) -> anyhow::Result<Box<dyn VideoStream>> {
        bail!("no capture device available on this host")
    }
}
