pub mod document;
pub mod error;
pub mod payload;
pub mod traits;

pub use document::DocRef;
pub use error::CaptureError;
pub use payload::{ImageFormat, ImagePayload};
pub use traits::{DocumentStore, Notifier, VisionProvider, VisionRequest};
