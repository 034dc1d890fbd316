#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `obd-rs` reads and writes object-data containers for tile-based game
//! clients, assembles their sprites into sheets and replays their animations.
//!
pub use obd_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use obd_dylib;
