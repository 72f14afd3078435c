use anyhow::Result;
use async_trait::async_trait;

use crate::document::DocRef;

/// The four document-store operations the pipeline depends on. The host
/// (an Obsidian-style vault, a plain directory, an in-memory test store)
/// implements these; the core never touches storage any other way.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Full current content of an existing document.
    async fn read(&self, doc: &DocRef) -> Result<String>;

    /// Overwrite an existing document with new content.
    async fn modify(&self, doc: &DocRef, content: &str) -> Result<()>;

    /// Create a new document at a store-relative path. Fails if the path
    /// is already taken.
    async fn create(&self, path: &str, content: &str) -> Result<DocRef>;

    /// The document the host currently considers focused, if any.
    async fn active_document(&self) -> Option<DocRef>;
}

/// Fire-and-forget transient user notices. No return value is consumed.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// One extraction request to a vision provider.
#[derive(Clone)]
pub struct VisionRequest {
    pub api_key: String,
    pub model: String,
    pub instruction: String,
    pub image_data_uri: String,
    pub max_tokens: u32,
}

// Manual Debug: the api key must never reach the log.
impl std::fmt::Debug for VisionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionRequest")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("model", &self.model)
            .field("instruction", &self.instruction)
            .field("image_bytes_b64", &self.image_data_uri.len())
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// Trait for remote vision-capable completion providers.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Provider name (e.g., "openai", "mock").
    fn name(&self) -> &str;

    /// Send one completion request carrying the instruction and the image,
    /// returning the extracted text. Empty string when the model returned
    /// nothing.
    async fn extract_text(&self, request: &VisionRequest) -> Result<String>;
}
