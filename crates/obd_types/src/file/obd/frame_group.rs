//! Frame groups: one animation cycle of an object.

use serde::{Deserialize, Serialize};

use crate::file::{RangeError, ValidationError};
use crate::sheet::{Extents, SheetLayout, SpriteCoord};

use super::{AnimationMode, FrameDuration, StartFrame};

/// One animation cycle of an object (idle pose, walking cycle).
///
/// Extents are counts and must be at least 1. The sprite table is flat and
/// indexed through [`Extents::sprite_index`].
///
/// # Examples
///
/// ```
/// use obd_types::file::obd::{FrameDuration, FrameGroup};
///
/// let mut group = FrameGroup::new(2, 2, 1, 4, 1, 1, 3);
/// assert_eq!(group.sprite_count(), 2 * 2 * 4 * 3);
/// assert_eq!(group.durations.len(), 3);
///
/// group.durations[1] = FrameDuration::new(100, 150).unwrap();
/// assert!(group.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameGroup {
	/// Width in tiles (1-255)
	pub width: u8,
	/// Height in tiles (1-255)
	pub height: u8,
	/// Exact pixel size used for drawing offsets
	pub exact_size: u16,
	/// Layer count
	pub layers: u8,
	/// Pattern X extent
	pub pattern_x: u8,
	/// Pattern Y extent (outfit addon rows)
	pub pattern_y: u8,
	/// Pattern Z extent
	pub pattern_z: u8,
	/// Frame count
	pub frames: u8,
	/// Timing mode
	pub mode: AnimationMode,
	/// 0 loops forever, negative ping-pongs, positive plays that many times
	pub loop_count: i32,
	/// Start frame of asynchronous animations
	pub start_frame: StartFrame,
	/// One duration per frame
	pub durations: Vec<FrameDuration>,
	/// Flat sprite ID table
	pub sprite_ids: Vec<u32>,
}

impl FrameGroup {
	/// Creates a frame group with a zeroed sprite table and zero durations.
	///
	/// The exact size defaults to the larger tile dimension times 32.
	pub fn new(
		width: u8,
		height: u8,
		layers: u8,
		pattern_x: u8,
		pattern_y: u8,
		pattern_z: u8,
		frames: u8,
	) -> Self {
		let mut group = Self {
			width,
			height,
			exact_size: u16::from(width.max(height)) * 32,
			layers,
			pattern_x,
			pattern_y,
			pattern_z,
			frames,
			mode: AnimationMode::default(),
			loop_count: 0,
			start_frame: StartFrame::default(),
			durations: vec![FrameDuration::default(); usize::from(frames)],
			sprite_ids: Vec::new(),
		};
		group.sprite_ids = vec![0; group.sprite_count()];
		group
	}

	/// Returns the extents of every axis.
	pub fn extents(&self) -> Extents {
		Extents {
			width: usize::from(self.width),
			height: usize::from(self.height),
			layers: usize::from(self.layers),
			pattern_x: usize::from(self.pattern_x),
			pattern_y: usize::from(self.pattern_y),
			pattern_z: usize::from(self.pattern_z),
			frames: usize::from(self.frames),
		}
	}

	/// Returns the atlas geometry of this group.
	pub fn layout(&self) -> SheetLayout {
		self.extents().layout()
	}

	/// Number of entries the sprite table must have.
	pub fn sprite_count(&self) -> usize {
		self.extents().sprite_count()
	}

	/// Returns true if the group has more than one frame.
	pub fn is_animated(&self) -> bool {
		self.frames > 1
	}

	/// Returns true if the group ping-pongs.
	pub fn is_ping_pong(&self) -> bool {
		self.loop_count < 0
	}

	/// Sprite ID at a tile coordinate; the frame wraps.
	///
	/// Returns `None` if the table is shorter than the extents require.
	pub fn sprite_id(&self, coord: SpriteCoord) -> Option<u32> {
		self.sprite_ids.get(self.extents().sprite_index(coord)).copied()
	}

	/// Sprite ID at a tile coordinate, rejecting out-of-range coordinates.
	pub fn checked_sprite_id(&self, coord: SpriteCoord) -> Result<u32, RangeError> {
		let index = self.extents().checked_sprite_index(coord)?;
		self.sprite_ids.get(index).copied().ok_or(RangeError {
			axis: "sprite table",
			value: index,
			extent: self.sprite_ids.len(),
		})
	}

	/// Checks extents, durations and sprite table length.
	pub fn validate(&self) -> Result<(), ValidationError> {
		let extents = [
			("width", self.width),
			("height", self.height),
			("layers", self.layers),
			("pattern_x", self.pattern_x),
			("pattern_y", self.pattern_y),
			("pattern_z", self.pattern_z),
			("frames", self.frames),
		];
		for (field, value) in extents {
			if value == 0 {
				return Err(ValidationError::ZeroExtent {
					field,
				});
			}
		}

		if self.durations.len() != usize::from(self.frames) {
			return Err(ValidationError::DurationCount {
				frames: self.frames,
				durations: self.durations.len(),
			});
		}
		for duration in &self.durations {
			if duration.minimum() > duration.maximum() {
				return Err(ValidationError::InvalidDuration {
					minimum: duration.minimum(),
					maximum: duration.maximum(),
				});
			}
		}

		let expected = self.sprite_count();
		if self.sprite_ids.len() != expected {
			return Err(ValidationError::SpriteTableLength {
				expected,
				actual: self.sprite_ids.len(),
			});
		}
		Ok(())
	}
}
