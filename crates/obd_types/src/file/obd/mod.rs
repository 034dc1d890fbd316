//! Object-data container support.
//!
//! This module reads and writes object-data containers: node trees holding
//! item, outfit, effect and missile definitions with their frame groups and,
//! from version 3 on, their sprite payloads.
//!
//! # File Structure
//!
//! ```text
//! header      u32 LE signature (opaque)
//! root        FE <version>
//!   object      FE <category>  0x10 id  [unknown properties...]
//!     group       FE <group type>  0x20 size  0x21 layers  0x22 patterns
//!                                  0x23 frames  [0x24 animation]  0x25 sprite IDs...
//!       sprite      FE 30  0x31 id  0x32 pixels...          (version 3)
//!     FF
//!   FF
//! FF
//! ```
//!
//! Properties use the node-tree property encoding (tag, u16 length, data).
//! Sprite IDs and sprite pixels longer than one property are split across
//! repeated properties with the same tag.
//!
//! # Examples
//!
//! ```no_run
//! use obd_types::file::ReadConfig;
//! use obd_types::file::obd::{File, FrameGroupType, ObjectReader, Passthrough};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Everything or the first error
//! let file = File::open("things.obd")?;
//! for object in &file.objects {
//!     println!("{} {}", object.category, object.id);
//! }
//!
//! // Object by object, skipping invalid ones
//! let stream = std::fs::File::open("things.obd")?;
//! let reader = ObjectReader::with_config(stream, ReadConfig::lenient(), &Passthrough)?;
//! for object in reader {
//!     match object {
//!         Ok(object) => println!("{}", object.id),
//!         Err(e) if e.is_format() => return Err(e.into()),
//!         Err(e) => eprintln!("skipped: {e}"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod codec;
pub mod constants;
mod decoder;
mod duration;
mod encoder;
mod file;
mod frame_group;
mod iterator;
mod object;
mod sprite;
mod types;


pub use codec::{Passthrough, SpriteCodec};
pub use duration::FrameDuration;
pub use file::{File, FormatVersion};
pub use frame_group::FrameGroup;
pub use iterator::ObjectReader;
pub use object::{ObjectDefinition, RawProperty};
pub use sprite::{SPRITE_BYTES, SpriteData, SpriteSource, SpriteStore};
pub use types::{AnimationMode, FrameGroupType, GroupMap, ObjectCategory, StartFrame};
