//! `snaptext-vision` — sends one image to a vision-capable model and
//! returns the extracted text.

pub mod client;
pub mod providers;

pub use client::{ExtractionClient, EXTRACT_INSTRUCTION};
pub use providers::mock::MockVision;
pub use providers::openai::OpenAiVision;
