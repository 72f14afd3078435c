//! Extraction client: precondition check, one request, no retry.

use std::sync::Arc;
use std::time::Instant;

use snaptext_config::Settings;
use snaptext_core::{CaptureError, ImagePayload, VisionProvider, VisionRequest};
use tracing::debug;

/// Fixed instruction sent alongside every image.
pub const EXTRACT_INSTRUCTION: &str =
    "Extract all text from the following image. Provide only the extracted text.";

/// Cap on the completion length; dense documents fit comfortably.
const MAX_TOKENS: u32 = 4096;

pub struct ExtractionClient {
    provider: Arc<dyn VisionProvider>,
}

impl ExtractionClient {
    pub fn new(provider: Arc<dyn VisionProvider>) -> Self {
        Self { provider }
    }

    /// Extract text from one payload. The payload is taken by value: it
    /// is consumed by this single attempt whether or not it succeeds.
    ///
    /// An empty api key fails synchronously, before any request is built
    /// or dispatched.
    pub async fn extract(
        &self,
        payload: ImagePayload,
        settings: &Settings,
    ) -> Result<String, CaptureError> {
        if settings.api_key.is_empty() {
            return Err(CaptureError::Configuration(
                "API key is not set; add it to the settings file and re-run".into(),
            ));
        }

        let request = VisionRequest {
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            instruction: EXTRACT_INSTRUCTION.to_string(),
            image_data_uri: payload.data_uri(),
            max_tokens: MAX_TOKENS,
        };
        drop(payload); // consumed: one acquisition event, one attempt

        let started = Instant::now();
        let text = self
            .provider
            .extract_text(&request)
            .await
            .map_err(|err| CaptureError::Transport(format!("{err:#}")))?;

        debug!(
            provider = self.provider.name(),
            latency_ms = started.elapsed().as_millis() as u64,
            chars = text.len(),
            "Vision extraction complete"
        );
        Ok(text)
    }
}
