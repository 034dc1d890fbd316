//! Forces `obd_internal` to be built as a dynamic library when the `dynamic_linking`
//! feature of `obd-rs` is enabled. Not meant to be used directly.

#![allow(unused_imports)]
pub use obd_internal::*;
