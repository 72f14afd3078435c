//! `snaptext-config` — settings document management.
//!
//! The settings live in a single human-edited JSON file inside the host's
//! storage root. The loader never fails outward: a missing file is
//! bootstrapped with defaults, a malformed one falls back to defaults with
//! a warning. The pipeline never writes settings back.

pub mod io;
pub mod schema;

pub use io::{load, settings_path, storage_dir, SETTINGS_FILE_NAME};
pub use schema::{Settings, DEFAULT_MODEL};
