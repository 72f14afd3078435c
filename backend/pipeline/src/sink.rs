//! Result sink: where the extracted text lands.

use chrono::{DateTime, SecondsFormat, Utc};
use snaptext_core::{CaptureError, DocRef, DocumentStore};
use tracing::{debug, warn};

/// Separator between existing content and an appended extraction.
pub const APPEND_SEPARATOR: &str = "\n\n---\n\n";

/// Bounded probe for a free timestamp name on same-instant re-runs.
const CREATE_ATTEMPTS: usize = 3;

/// The two mutually exclusive persistence policies. A deployment picks
/// one explicitly; nothing here is hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkPolicy {
    /// Append to the host's active document, separator in between.
    /// Plain read-modify-write: concurrent external edits between the
    /// read and the write are lost (last writer wins).
    Append,
    /// Create a fresh timestamp-named document holding only the text.
    NewDocument,
}

/// Persist extracted text under the chosen policy, resolving the target
/// document exactly once, immediately before the write.
pub async fn persist(
    store: &dyn DocumentStore,
    policy: SinkPolicy,
    extracted: &str,
) -> Result<DocRef, CaptureError> {
    match policy {
        SinkPolicy::Append => append_to_active(store, extracted).await,
        SinkPolicy::NewDocument => create_timestamped(store, extracted).await,
    }
}

async fn append_to_active(store: &dyn DocumentStore, extracted: &str) -> Result<DocRef, CaptureError> {
    let Some(doc) = store.active_document().await else {
        return Err(CaptureError::Persistence(
            "no active document; open a document first".into(),
        ));
    };

    let current = store
        .read(&doc)
        .await
        .map_err(|err| CaptureError::Persistence(format!("could not read {doc}: {err:#}")))?;

    let combined = format!("{current}{APPEND_SEPARATOR}{extracted}");
    store
        .modify(&doc, &combined)
        .await
        .map_err(|err| CaptureError::Persistence(format!("could not write {doc}: {err:#}")))?;

    debug!(doc = %doc, added = extracted.len(), "Appended extraction to active document");
    Ok(doc)
}

async fn create_timestamped(store: &dyn DocumentStore, extracted: &str) -> Result<DocRef, CaptureError> {
    create_unique(store, &document_name(Utc::now()), extracted).await
}

/// Create `base`, probing `-2`, `-3`, … suffixes when the name is taken
/// (two runs inside the timestamp resolution).
async fn create_unique(
    store: &dyn DocumentStore,
    base: &str,
    content: &str,
) -> Result<DocRef, CaptureError> {
    let stem = base.strip_suffix(".md").unwrap_or(base);
    let mut last_err = None;
    for attempt in 0..CREATE_ATTEMPTS {
        let name = if attempt == 0 {
            base.to_string()
        } else {
            format!("{stem}-{}.md", attempt + 1)
        };
        match store.create(&name, content).await {
            Ok(doc) => {
                debug!(doc = %doc, "Created extraction document");
                return Ok(doc);
            }
            Err(err) => {
                warn!(name = %name, error = %format!("{err:#}"), "Could not create document");
                last_err = Some(err);
            }
        }
    }
    Err(CaptureError::Persistence(match last_err {
        Some(err) => format!("could not create a document for the extraction: {err:#}"),
        None => "could not create a document for the extraction".to_string(),
    }))
}

/// Timestamp-derived document name; colons and periods are replaced so
/// the name is filesystem-safe on every platform.
fn document_name(now: DateTime<Utc>) -> String {
    let stamp = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("extracted-{stamp}.md")
}
