//! Camera acquisition: one frame from a live stream, encoded for transport.

use std::io::Cursor;

use snaptext_core::{CaptureError, ImageFormat, ImagePayload};
use tracing::{debug, info};

use crate::device::{CaptureDevice, DeviceProfile, Frame, StreamGuard};

/// JPEG quality factor for constrained (handheld) devices.
const JPEG_QUALITY: u8 = 85;

/// Capture one frame from the device and encode it as an image payload.
///
/// The stream is wrapped in a [`StreamGuard`] immediately after opening,
/// so it is stopped on success, on every error return, and on panic
/// unwind alike.
pub async fn acquire_from_camera(device: &dyn CaptureDevice) -> Result<ImagePayload, CaptureError> {
    if !device.is_available() {
        return Err(CaptureError::Acquisition(
            "no capture device available on this host".into(),
        ));
    }

    let stream = device
        .open()
        .await
        .map_err(|err| CaptureError::Acquisition(format!("camera access denied: {err:#}")))?;
    let mut guard = StreamGuard::new(stream);

    let (width, height) = guard
        .stream()
        .resolution()
        .await
        .map_err(|err| CaptureError::Acquisition(format!("stream reported no resolution: {err:#}")))?;
    debug!(width, height, "Capture stream ready");

    let frame = guard
        .stream()
        .grab_frame()
        .await
        .map_err(|err| CaptureError::Acquisition(format!("frame grab failed: {err:#}")))?;

    let format = match device.profile() {
        DeviceProfile::Constrained => ImageFormat::Jpeg,
        DeviceProfile::Standard => ImageFormat::Png,
    };
    let payload = encode_frame(&frame, format)?;
    info!(bytes = payload.len(), format = ?payload.format(), "Captured camera frame");
    Ok(payload)
    // guard drops here, releasing the device
}

/// Rasterise a raw RGB frame into the transport encoding.
pub fn encode_frame(frame: &Frame, format: ImageFormat) -> Result<ImagePayload, CaptureError> {
    let raster = image::RgbImage::from_raw(frame.width, frame.height, frame.rgb.clone())
        .ok_or_else(|| {
            CaptureError::Acquisition(format!(
                "frame buffer does not match {}x{} RGB dimensions",
                frame.width, frame.height
            ))
        })?;

    let mut out = Cursor::new(Vec::new());
    match format {
        ImageFormat::Png => raster
            .write_to(&mut out, image::ImageFormat::Png)
            .map_err(|err| CaptureError::Acquisition(format!("PNG encode failed: {err}")))?,
        ImageFormat::Jpeg => {
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
            raster
                .write_with_encoder(encoder)
                .map_err(|err| CaptureError::Acquisition(format!("JPEG encode failed: {err}")))?;
        }
    }
    Ok(ImagePayload::new(out.into_inner(), format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::device::VideoStream;

    fn test_frame() -> Frame {
        Frame {
            width: 2,
            height: 2,
            rgb: vec![255; 12],
        }
    }

    /// Scripted stream that counts `stop` calls and can fail at either
    /// await point.
    struct ScriptedStream {
        stops: Arc<AtomicUsize>,
        fail_resolution: bool,
        fail_grab: bool,
    }

    #[async_trait]
    impl VideoStream for ScriptedStream {
        async fn resolution(&mut self) -> Result<(u32, u32)> {
            if self.fail_resolution {
                bail!("stream ended before reporting resolution");
            }
            Ok((2, 2))
        }

        async fn grab_frame(&mut self) -> Result<Frame> {
            if self.fail_grab {
                bail!("device wedged");
            }
            Ok(test_frame())
        }

        fn stop(&mut self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct ScriptedDevice {
        available: bool,
        profile: DeviceProfile,
        deny_open: bool,
        fail_resolution: bool,
        fail_grab: bool,
        stops: Arc<AtomicUsize>,
    }

    impl ScriptedDevice {
        fn working() -> Self {
            Self {
                available: true,
                profile: DeviceProfile::Standard,
                deny_open: false,
                fail_resolution: false,
                fail_grab: false,
                stops: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl CaptureDevice for ScriptedDevice {
        fn is_available(&self) -> bool {
            self.available
        }

        fn profile(&self) -> DeviceProfile {
            self.profile
        }

        async fn open(&self) -> Result<Box<dyn VideoStream>> {
            if self.deny_open {
                bail!("permission denied");
            }
            Ok(Box::new(ScriptedStream {
                stops: self.stops.clone(),
                fail_resolution: self.fail_resolution,
                fail_grab: self.fail_grab,
            }))
        }
    }

    #[tokio::test]
    async fn success_path_stops_the_stream_once() {
        let device = ScriptedDevice::working();
        let stops = device.stops.clone();

        let payload = acquire_from_camera(&device).await.unwrap();
        assert!(!payload.is_empty());
        assert_eq!(payload.format(), ImageFormat::Png);
        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn constrained_profile_encodes_jpeg() {
        let device = ScriptedDevice {
            profile: DeviceProfile::Constrained,
            ..ScriptedDevice::working()
        };
        let payload = acquire_from_camera(&device).await.unwrap();
        assert_eq!(payload.format(), ImageFormat::Jpeg);
    }

    #[tokio::test]
    async fn resolution_failure_still_stops_the_stream() {
        let device = ScriptedDevice {
            fail_resolution: true,
            ..ScriptedDevice::working()
        };
        let stops = device.stops.clone();

        let err = acquire_from_camera(&device).await.unwrap_err();
        assert!(matches!(err, CaptureError::Acquisition(_)));
        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn grab_failure_still_stops_the_stream() {
        let device = ScriptedDevice {
            fail_grab: true,
            ..ScriptedDevice::working()
        };
        let stops = device.stops.clone();

        let err = acquire_from_camera(&device).await.unwrap_err();
        assert!(matches!(err, CaptureError::Acquisition(_)));
        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn denied_open_is_an_acquisition_error() {
        let device = ScriptedDevice {
            deny_open: true,
            ..ScriptedDevice::working()
        };
        let err = acquire_from_camera(&device).await.unwrap_err();
        assert!(matches!(err, CaptureError::Acquisition(_)));
        // Nothing was opened, so nothing to stop.
        assert_eq!(device.stops.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unavailable_device_short_circuits() {
        let device = ScriptedDevice {
            available: false,
            ..ScriptedDevice::working()
        };
        let err = acquire_from_camera(&device).await.unwrap_err();
        assert!(matches!(err, CaptureError::Acquisition(_)));
    }

    #[test]
    fn encode_frame_produces_output_in_the_requested_format() {
        let payload = encode_frame(&test_frame(), ImageFormat::Png).unwrap();
        assert!(!payload.is_empty());
        assert_eq!(payload.format(), ImageFormat::Png);

        let payload = encode_frame(&test_frame(), ImageFormat::Jpeg).unwrap();
        assert!(!payload.is_empty());
        assert_eq!(payload.format(), ImageFormat::Jpeg);
    }

    #[test]
    fn encode_frame_rejects_mismatched_buffer() {
        let bad = Frame {
            width: 4,
            height: 4,
            rgb: vec![0; 3],
        };
        assert!(encode_frame(&bad, ImageFormat::Png).is_err());
    }
}
