//! This module is separated into its own crate to enable simple dynamic linking for `obd-rs`, and should not be used directly.

/// `use obd_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export obd_types for convenience
pub use obd_types;

// Re-export the main entry points at crate root
pub use obd_types::file::{FormatError, Node, ObdError, ObdFile, ObjectReader, ValidationError};
pub use obd_types::settings::Settings;
