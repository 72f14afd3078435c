/// Reference to a document in the host's store, identified by its
/// host-assigned path. Resolved at most once per pipeline run,
/// immediately before the write.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocRef {
    path: String,
}

impl DocRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Display for DocRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}
