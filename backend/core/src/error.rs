use thiserror::Error;

/// Top-level error type for a snaptext pipeline run.
///
/// Every variant is terminal to the run: the orchestrator recovers all of
/// them at its boundary and surfaces a notice plus a log entry. Nothing
/// here is returned to the host as a programmatic contract.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("acquisition error: {0}")]
    Acquisition(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CaptureError {
    /// User-facing summary for the transient notice. The full detail
    /// stays in the log.
    pub fn notice(&self) -> String {
        match self {
            Self::Configuration(msg) => format!("Configuration problem: {msg}"),
            Self::Acquisition(msg) => format!("Could not acquire an image: {msg}"),
            Self::Transport(msg) => format!("Error extracting text: {msg}"),
            Self::Persistence(msg) => format!("Could not save extracted text: {msg}"),
            Self::Other(err) => format!("Unexpected error: {err}"),
        }
    }
}
