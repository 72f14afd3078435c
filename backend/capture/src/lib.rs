//! `snaptext-capture` — image acquisition for the capture pipeline.
//!
//! Two acquisition variants produce the same thing: one base64-encodable
//! [`ImagePayload`] per session. The camera variant holds the only scoped
//! resource in the system and releases it on every exit path; the file
//! variant holds nothing.

pub mod camera;
pub mod device;
pub mod file;
pub mod mime;

use std::path::PathBuf;

use snaptext_core::{CaptureError, ImagePayload};
use tracing::debug;

pub use camera::acquire_from_camera;
pub use device::{CaptureDevice, DeviceProfile, Frame, StreamGuard, VideoStream};
pub use file::acquire_from_file;

/// The two acquisition affordances. No subclassing: a session resolves
/// whichever variant the user picked into one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionSource {
    Camera,
    File(PathBuf),
}

/// One modal acquisition session.
///
/// `resolve` consumes the session, so at most one payload can ever come
/// out of it and the acquisition surface is gone before the caller can
/// dispatch extraction. Dropping an unresolved session abandons the run
/// with no side effects.
pub struct AcquisitionSession<'a> {
    device: &'a dyn CaptureDevice,
}

impl<'a> AcquisitionSession<'a> {
    pub fn new(device: &'a dyn CaptureDevice) -> Self {
        Self { device }
    }

    /// Whether the camera affordance should be offered at all. The file
    /// affordance always is.
    pub fn offers_camera(&self) -> bool {
        self.device.is_available()
    }

    /// Resolve the chosen affordance into exactly one payload.
    pub async fn resolve(self, source: AcquisitionSource) -> Result<ImagePayload, CaptureError> {
        debug!(?source, "Resolving acquisition session");
        match source {
            AcquisitionSource::Camera => acquire_from_camera(self.device).await,
            AcquisitionSource::File(path) => acquire_from_file(&path).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use async_trait::async_trait;

    struct NoCamera;

    #[async_trait]
    impl CaptureDevice for NoCamera {
        fn is_available(&self) -> bool {
            false
        }
        fn profile(&self) -> DeviceProfile {
            DeviceProfile::Standard
        }
        async fn open(&self) -> anyhow::Result<Box<dyn VideoStream>> {
            bail!("no capture device")
        }
    }

    #[tokio::test]
    async fn camera_source_without_device_fails_before_extraction() {
        let device = NoCamera;
        let session = AcquisitionSession::new(&device);
        assert!(!session.offers_camera());

        let err = session.resolve(AcquisitionSource::Camera).await.unwrap_err();
        assert!(matches!(err, CaptureError::Acquisition(_)));
    }

    #[tokio::test]
    async fn file_source_resolves_through_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.png");
        std::fs::write(&path, [9u8, 8, 7]).unwrap();

        let device = NoCamera;
        let session = AcquisitionSession::new(&device);
        let payload = session.resolve(AcquisitionSource::File(path)).await.unwrap();
        assert_eq!(payload.len(), 3);
    }

    #[test]
    fn abandoning_a_session_has_no_side_effects() {
        let device = NoCamera;
        let session = AcquisitionSession::new(&device);
        drop(session);
    }
}
