use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;

use snaptext_core::{VisionProvider, VisionRequest};

/// A mock vision provider that returns canned responses and counts how
/// many requests actually reached it.
pub struct MockVision {
    fixed_response: Option<String>,
    fail_with: Option<String>,
    calls: AtomicUsize,
}

impl MockVision {
    pub fn new() -> Self {
        Self {
            fixed_response: None,
            fail_with: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }

    /// Number of extraction requests dispatched to this provider.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockVision {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisionProvider for MockVision {
    fn name(&self) -> &str {
        "mock"
    }

    async fn extract_text(&self, _request: &VisionRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail_with {
            anyhow::bail!("{message}");
        }
        Ok(self.fixed_response.clone().unwrap_or_default())
    }
}
