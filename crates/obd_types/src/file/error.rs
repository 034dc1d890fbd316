//! Error types for container parsing, validation and index arithmetic.

use thiserror::Error;

use crate::file::obd::{FrameGroupType, ObjectCategory};

/// Malformed, truncated or unbalanced binary input.
///
/// A format error always aborts the decode that produced it. Nothing decoded
/// before the error is returned to the caller.
#[derive(Debug, Error)]
pub enum FormatError {
	/// A byte other than the expected sentinel was found
	#[error("Unexpected byte 0x{actual:02X} at offset {offset}, expected 0x{expected:02X}")]
	UnexpectedByte {
		/// Stream offset of the byte
		offset: u64,
		/// Expected sentinel value
		expected: u8,
		/// Byte actually read
		actual: u8,
	},

	/// The current node has no child node to descend into
	#[error("Node at offset {offset} has no children")]
	NoChildren {
		/// Stream offset of the parent node
		offset: u64,
	},

	/// An operation needed a current node but none was opened yet
	#[error("No node is open (call open_root first)")]
	NoCurrentNode,

	/// The stream ended before the node was closed
	#[error("Stream truncated at offset {offset} while reading a node")]
	Truncated {
		/// Offset where the stream ended
		offset: u64,
	},

	/// A tagged property declared more bytes than the node payload holds
	#[error("Property 0x{tag:02X} declares {declared} bytes, only {available} available")]
	TruncatedProperty {
		/// Property tag
		tag: u8,
		/// Declared payload length
		declared: usize,
		/// Bytes left in the node payload
		available: usize,
	},

	/// A scalar read ran past the end of a node payload
	#[error("Node payload too short: needed {needed} bytes at position {position}, payload is {len} bytes")]
	PayloadTooShort {
		/// Bytes requested
		needed: usize,
		/// Read position inside the payload
		position: usize,
		/// Total payload length
		len: usize,
	},

	/// Nesting exceeded the configured maximum depth
	#[error("Node nesting exceeds maximum depth of {max_depth}")]
	TooDeep {
		/// Configured maximum depth
		max_depth: usize,
	},

	/// A property payload does not fit the 16-bit length field
	#[error("Property 0x{tag:02X} payload of {len} bytes exceeds the 65535 byte limit")]
	PropertyTooLarge {
		/// Property tag
		tag: u8,
		/// Payload length
		len: usize,
	},

	/// `end_node` called without an open node
	#[error("end_node called with no open node")]
	UnbalancedWrite,

	/// Underlying stream error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Semantically invalid field values.
///
/// A validation error is fatal to the node being decoded; callers iterating
/// several objects may continue with the next sibling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
	/// Frame duration with minimum above maximum
	#[error("Invalid frame duration: minimum {minimum} ms > maximum {maximum} ms")]
	InvalidDuration {
		/// Minimum duration in milliseconds
		minimum: u32,
		/// Maximum duration in milliseconds
		maximum: u32,
	},

	/// A frame group extent is zero
	#[error("Frame group {field} must be at least 1")]
	ZeroExtent {
		/// Name of the offending field
		field: &'static str,
	},

	/// Duration table length does not match the frame count
	#[error("Frame group declares {frames} frames but has {durations} durations")]
	DurationCount {
		/// Frame count
		frames: u8,
		/// Number of durations present
		durations: usize,
	},

	/// Sprite table length does not match the product of all extents
	#[error("Sprite table has {actual} entries, expected {expected}")]
	SpriteTableLength {
		/// Product of all extents
		expected: usize,
		/// Entries present
		actual: usize,
	},

	/// A declared frame group has no matching sprite group
	#[error("Frame group {0} has no sprite group")]
	MissingSpriteGroup(FrameGroupType),

	/// A frame group was addressed that the object does not declare
	#[error("Object has no {0} frame group")]
	MissingFrameGroup(FrameGroupType),

	/// A sprite ID could not be found in the sprite store
	#[error("Sprite {0} not found")]
	UnresolvedSprite(u32),

	/// Unknown object category tag
	#[error("Unknown object category 0x{0:02X}")]
	UnknownCategory(u8),

	/// Unknown frame group type tag
	#[error("Unknown frame group type 0x{0:02X}")]
	UnknownGroupType(u8),

	/// Unknown container format version
	#[error("Unknown format version {0}")]
	UnknownVersion(u8),

	/// Unknown animation mode byte
	#[error("Unknown animation mode {0}")]
	UnknownAnimationMode(u8),

	/// A required property is absent
	#[error("Missing required property 0x{tag:02X} in {context}")]
	MissingProperty {
		/// Property tag
		tag: u8,
		/// Node description
		context: &'static str,
	},

	/// A property payload has the wrong size
	#[error("Property 0x{tag:02X} has {actual} bytes, expected {expected}")]
	PropertyLength {
		/// Property tag
		tag: u8,
		/// Expected payload size
		expected: usize,
		/// Actual payload size
		actual: usize,
	},

	/// An unrecognized property was found while unknown properties are rejected
	#[error("Unknown property 0x{tag:02X} in {context}")]
	UnknownProperty {
		/// Property tag
		tag: u8,
		/// Node description
		context: &'static str,
	},

	/// The same frame group appears twice on one object
	#[error("Duplicate frame group {0}")]
	DuplicateGroup(FrameGroupType),

	/// The format version cannot store this frame group
	#[error("Format version {version} does not support the {group} frame group")]
	GroupNotSupported {
		/// Format version
		version: u8,
		/// Group type
		group: FrameGroupType,
	},

	/// Only outfits may carry a walking group
	#[error("{category} objects cannot have a {group} frame group")]
	GroupNotAllowed {
		/// Object category
		category: ObjectCategory,
		/// Group type
		group: FrameGroupType,
	},

	/// Outfit recoloring needs a grayscale and a blend layer
	#[error("Outfit recoloring needs at least 2 layers, group has {0}")]
	NotEnoughLayers(u8),

	/// A bitmap has the wrong dimensions for the frame group
	#[error("Bitmap is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
	BitmapSize {
		/// Expected width in pixels
		expected_width: u32,
		/// Expected height in pixels
		expected_height: u32,
		/// Actual width in pixels
		actual_width: u32,
		/// Actual height in pixels
		actual_height: u32,
	},

	/// The atlas for a frame group does not fit 32-bit pixel dimensions
	#[error("Atlas of {width}x{height} pixels is too large")]
	SheetTooLarge {
		/// Atlas width in pixels
		width: u64,
		/// Atlas height in pixels
		height: u64,
	},

	/// A sprite payload has the wrong number of bytes
	#[error("Sprite {id} has {len} pixel bytes, expected 0 or {expected}")]
	SpritePixels {
		/// Sprite ID
		id: u32,
		/// Expected byte length
		expected: usize,
		/// Actual byte length
		len: usize,
	},
}

/// Index coordinate outside its declared extent.
///
/// Only raised by the checked index helpers. The sheet assembler wraps frames
/// instead of failing.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{axis} coordinate {value} out of range (extent {extent})")]
pub struct RangeError {
	/// Axis name
	pub axis: &'static str,
	/// Requested coordinate
	pub value: usize,
	/// Declared extent of the axis
	pub extent: usize,
}

/// Unified error type for every operation in this crate.
#[derive(Debug, Error)]
pub enum ObdError {
	/// Malformed binary input
	#[error(transparent)]
	Format(#[from] FormatError),

	/// Invalid field values
	#[error(transparent)]
	Validation(#[from] ValidationError),

	/// Index outside its declared range
	#[error(transparent)]
	Range(#[from] RangeError),

	/// Sprite payload codec failure
	#[error("Sprite codec error: {0}")]
	Codec(String),

	/// Settings could not be loaded
	#[error(transparent)]
	Config(#[from] config::ConfigError),

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl ObdError {
	/// Returns true if this error came from malformed input and ends any
	/// further reading of the same stream.
	pub fn is_format(&self) -> bool {
		matches!(self, Self::Format(_) | Self::Io(_))
	}
}
