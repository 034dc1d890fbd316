//! File format support for `obd-rs`.

mod error;
mod parse_config;

pub mod obd;
pub mod tree;

pub use error::{FormatError, ObdError, RangeError, ValidationError};
pub use parse_config::{ReadConfig, UnknownProperties};

pub use obd::{File as ObdFile, ObjectReader};
pub use tree::{Node, TreeReader, TreeWriter};
