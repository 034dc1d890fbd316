//! Prelude module for `obd_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```
//! use obd_types::prelude::*;
//!
//! let group = FrameGroup::new(2, 2, 1, 1, 1, 1, 1);
//! let atlas = assemble(&group, &vec![SpriteData::blank(0); group.sprite_count()]).unwrap();
//! assert_eq!(atlas.width(), 64);
//! ```

// Errors and configuration
#[doc(inline)]
pub use crate::file::{FormatError, ObdError, RangeError, ReadConfig, UnknownProperties, ValidationError};
#[doc(inline)]
pub use crate::settings::Settings;

// Node tree
#[doc(inline)]
pub use crate::file::tree::{Node, NodeData, Property, TreeReader, TreeWriter};

// Object model
#[doc(inline)]
pub use crate::file::obd::{
	AnimationMode, File as ObdFile, FormatVersion, FrameDuration, FrameGroup, FrameGroupType,
	GroupMap, ObjectCategory, ObjectDefinition, ObjectReader, Passthrough, RawProperty,
	SpriteCodec, SpriteData, SpriteSource, SpriteStore, StartFrame,
};

// Sprite sheets
#[doc(inline)]
pub use crate::sheet::{
	Bitmap, Color, Extents, OutfitPalette, PixelBuffer, SheetLayout, SpriteCoord, assemble,
	assemble_into, colorize_outfit, split,
};

// Animation
#[doc(inline)]
pub use crate::animation::{
	Animator, Clock, FrameRequest, ManualClock, RandomSource, RngSource, SequenceSource,
	SystemClock,
};
