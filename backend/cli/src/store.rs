//! Filesystem-backed document store: documents are files under a vault
//! root, addressed by vault-relative paths.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tokio::fs;

use snaptext_core::{DocRef, DocumentStore};

pub struct FsStore {
    root: PathBuf,
    active: Option<String>,
}

impl FsStore {
    /// `active` is the vault-relative path of the document to treat as
    /// the host's active document, if any.
    pub fn new(root: PathBuf, active: Option<String>) -> Self {
        Self { root, active }
    }

    fn full_path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }
}

#[async_trait]
impl DocumentStore for FsStore {
    async fn read(&self, doc: &DocRef) -> Result<String> {
        let path = self.full_path(doc.path());
        fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read document: {}", path.display()))
    }

    async fn modify(&self, doc: &DocRef, content: &str) -> Result<()> {
        let path = self.full_path(doc.path());
        fs::write(&path, content.as_bytes())
            .await
            .with_context(|| format!("Failed to write document: {}", path.display()))
    }

    async fn create(&self, rel: &str, content: &str) -> Result<DocRef> {
        let path = self.full_path(rel);
        if fs::metadata(&path).await.is_ok() {
            bail!("document already exists: {rel}");
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create document directory: {}", parent.display()))?;
        }
        fs::write(&path, content.as_bytes())
            .await
            .with_context(|| format!("Failed to create document: {}", path.display()))?;
        Ok(DocRef::new(rel))
    }

    async fn active_document(&self) -> Option<DocRef> {
        self.active.as_deref().map(DocRef::new)
    }
}
