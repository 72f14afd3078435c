//! `snaptext-pipeline` — the capture → encode → request → persist run.
//!
//! One [`Pipeline`] is constructed with its collaborators injected and
//! lives for the host session; each user trigger is an independent run
//! through the state machine. Every failure is recovered here: the host
//! sees a transient notice and a log entry, never a propagated error.

pub mod sink;

#[cfg(test)]
mod testutil;

use std::path::PathBuf;
use std::sync::Arc;

use snaptext_capture::{AcquisitionSession, AcquisitionSource, CaptureDevice};
use snaptext_config::Settings;
use snaptext_core::{CaptureError, DocumentStore, Notifier, VisionProvider};
use snaptext_vision::ExtractionClient;
use tracing::{error, info, warn};

pub use sink::{SinkPolicy, APPEND_SEPARATOR};

/// Per-run pipeline states. `Error` is terminal and reachable from any
/// non-idle state; there is no automatic restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    AwaitingAcquisition,
    Extracting,
    Persisting,
    Done,
    Error,
}

/// The capture pipeline with all collaborators injected.
pub struct Pipeline {
    store: Arc<dyn DocumentStore>,
    notifier: Arc<dyn Notifier>,
    device: Arc<dyn CaptureDevice>,
    client: ExtractionClient,
    policy: SinkPolicy,
    storage_root: PathBuf,
    settings: Option<Settings>,
}

impl Pipeline {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        notifier: Arc<dyn Notifier>,
        device: Arc<dyn CaptureDevice>,
        provider: Arc<dyn VisionProvider>,
        policy: SinkPolicy,
        storage_root: PathBuf,
    ) -> Self {
        Self {
            store,
            notifier,
            device,
            client: ExtractionClient::new(provider),
            policy,
            storage_root,
            settings: None,
        }
    }

    /// Load the settings record once at startup. Fail-soft: a missing or
    /// malformed settings file yields the built-in defaults.
    pub async fn init(&mut self) {
        self.settings = Some(snaptext_config::load(&self.storage_root).await);
    }

    /// Release the loaded settings. The pipeline holds no other state
    /// across runs.
    pub fn dispose(&mut self) {
        self.settings = None;
    }

    /// Whether the camera affordance should be offered for a session.
    pub fn offers_camera(&self) -> bool {
        self.device.is_available()
    }

    /// One full run: acquire, extract, persist. Returns the terminal
    /// state so a host can derive an exit code; errors never propagate.
    pub async fn run(&self, source: AcquisitionSource) -> RunState {
        let Some(settings) = self.settings.as_ref() else {
            warn!("Pipeline run before init; settings not loaded");
            self.notifier.notify("Capture pipeline is not initialised");
            return RunState::Error;
        };

        let mut state = RunState::AwaitingAcquisition;
        let session = AcquisitionSession::new(self.device.as_ref());
        let payload = match session.resolve(source).await {
            Ok(payload) => payload,
            Err(err) => return self.fail(state, err),
        };
        // The session is consumed above: the acquisition surface is
        // closed before extraction is ever dispatched.

        state = RunState::Extracting;
        self.notifier.notify("Extracting text from image...");
        let extracted = match self.client.extract(payload, settings).await {
            Ok(text) => text,
            Err(err) => return self.fail(state, err),
        };

        state = RunState::Persisting;
        let doc = match sink::persist(self.store.as_ref(), self.policy, &extracted).await {
            Ok(doc) => doc,
            Err(err) => return self.fail(state, err),
        };

        match self.policy {
            SinkPolicy::Append => self
                .notifier
                .notify("Text extracted and appended to the active document"),
            SinkPolicy::NewDocument => self.notifier.notify(&format!("Text extracted to {doc}")),
        }
        info!(doc = %doc, "Pipeline run complete");
        RunState::Done
    }

    fn fail(&self, state: RunState, err: CaptureError) -> RunState {
        error!(state = ?state, error = %err, "Pipeline run failed");
        self.notifier.notify(&err.notice());
        RunState::Error
    }
}
