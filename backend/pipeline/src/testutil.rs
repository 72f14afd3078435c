//! In-memory collaborators for pipeline and sink tests.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use snaptext_core::{DocRef, DocumentStore, Notifier};

pub(crate) struct MemStore {
    docs: Mutex<HashMap<String, String>>,
    active: Option<String>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            docs: Mutex::new(HashMap::new()),
            active: None,
        }
    }

    pub fn with_active(name: &str, content: &str) -> Self {
        Self {
            docs: Mutex::new(HashMap::from([(name.to_string(), content.to_string())])),
            active: Some(name.to_string()),
        }
    }

    pub fn content(&self, name: &str) -> Option<String> {
        self.docs.lock().unwrap().get(name).cloned()
    }

    pub fn doc_names(&self) -> Vec<String> {
        self.docs.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl DocumentStore for MemStore {
    async fn read(&self, doc: &DocRef) -> Result<String> {
        match self.docs.lock().unwrap().get(doc.path()) {
            Some(content) => Ok(content.clone()),
            None => bail!("no such document: {doc}"),
        }
    }

    async fn modify(&self, doc: &DocRef, content: &str) -> Result<()> {
        let mut docs = self.docs.lock().unwrap();
        if !docs.contains_key(doc.path()) {
            bail!("no such document: {doc}");
        }
        docs.insert(doc.path().to_string(), content.to_string());
        Ok(())
    }

    async fn create(&self, path: &str, content: &str) -> Result<DocRef> {
        let mut docs = self.docs.lock().unwrap();
        if docs.contains_key(path) {
            bail!("document already exists: {path}");
        }
        docs.insert(path.to_string(), content.to_string());
        Ok(DocRef::new(path))
    }

    async fn active_document(&self) -> Option<DocRef> {
        self.active.as_deref().map(DocRef::new)
    }
}

pub(crate) struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
