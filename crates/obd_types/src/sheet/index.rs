//! Sprite table and atlas index arithmetic.
//!
//! Both indices use the same nested row-major order, outermost axis first:
//!
//! ```text
//! frame -> pattern_z -> pattern_y -> pattern_x -> layer [-> height -> width]
//! ```
//!
//! The frame coordinate is taken modulo the frame count, so callers may pass
//! a frame from a longer animation (mount compositing does) and get a wrapped
//! index instead of an error. Any other layout is incompatible with existing
//! sprite sheets.

use serde::{Deserialize, Serialize};

use crate::file::{RangeError, ValidationError};

/// Pixel size of one square sprite tile.
pub const SPRITE_SIZE: u32 = 32;

/// Extents of a frame group along every axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extents {
	/// Width in tiles
	pub width: usize,
	/// Height in tiles
	pub height: usize,
	/// Layer count
	pub layers: usize,
	/// Pattern X extent
	pub pattern_x: usize,
	/// Pattern Y extent
	pub pattern_y: usize,
	/// Pattern Z extent
	pub pattern_z: usize,
	/// Frame count
	pub frames: usize,
}

/// Coordinate of one sprite tile inside a frame group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpriteCoord {
	/// Tile column inside the cell
	pub width: usize,
	/// Tile row inside the cell
	pub height: usize,
	/// Layer
	pub layer: usize,
	/// Pattern X
	pub pattern_x: usize,
	/// Pattern Y
	pub pattern_y: usize,
	/// Pattern Z
	pub pattern_z: usize,
	/// Frame (wrapped by the frame count)
	pub frame: usize,
}

impl Extents {
	/// Number of entries in the flat sprite table.
	pub fn sprite_count(&self) -> usize {
		self.texture_count() * self.width * self.height
	}

	/// Number of atlas cells.
	pub fn texture_count(&self) -> usize {
		self.frames * self.pattern_z * self.pattern_y * self.pattern_x * self.layers
	}

	/// Atlas cell index of `(layer, px, py, pz, frame)`.
	///
	/// `((((frame mod F)·Pz + pz)·Py + py)·Px + px)·L + layer`
	#[inline]
	pub fn texture_index(
		&self,
		layer: usize,
		pattern_x: usize,
		pattern_y: usize,
		pattern_z: usize,
		frame: usize,
	) -> usize {
		let frame = frame % self.frames.max(1);
		(((frame * self.pattern_z + pattern_z) * self.pattern_y + pattern_y) * self.pattern_x
			+ pattern_x)
			* self.layers
			+ layer
	}

	/// Flat sprite table index of a tile.
	///
	/// `(((((frame mod F)·Pz + pz)·Py + py)·Px + px)·L + l)·H + h)·W + w`
	#[inline]
	pub fn sprite_index(&self, coord: SpriteCoord) -> usize {
		let texture = self.texture_index(
			coord.layer,
			coord.pattern_x,
			coord.pattern_y,
			coord.pattern_z,
			coord.frame,
		);
		(texture * self.height + coord.height) * self.width + coord.width
	}

	/// Like [`sprite_index`](Self::sprite_index) but rejects coordinates
	/// outside their extent. The frame still wraps.
	pub fn checked_sprite_index(&self, coord: SpriteCoord) -> Result<usize, RangeError> {
		let axes = [
			("width", coord.width, self.width),
			("height", coord.height, self.height),
			("layer", coord.layer, self.layers),
			("pattern_x", coord.pattern_x, self.pattern_x),
			("pattern_y", coord.pattern_y, self.pattern_y),
			("pattern_z", coord.pattern_z, self.pattern_z),
		];
		for (axis, value, extent) in axes {
			if value >= extent {
				return Err(RangeError {
					axis,
					value,
					extent,
				});
			}
		}
		Ok(self.sprite_index(coord))
	}

	/// Atlas geometry for these extents.
	pub fn layout(&self) -> SheetLayout {
		SheetLayout::new(*self)
	}
}

/// Pixel geometry of the atlas built for one frame group.
///
/// Cells are laid out `Pz·Px·L` per row and `F·Py` rows high; cell `i` sits
/// at column `i mod columns`, row `i div columns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetLayout {
	extents: Extents,
	columns: usize,
	rows: usize,
}

impl SheetLayout {
	/// Computes the layout for `extents`.
	pub fn new(extents: Extents) -> Self {
		Self {
			extents,
			columns: extents.pattern_z * extents.pattern_x * extents.layers,
			rows: extents.frames * extents.pattern_y,
		}
	}

	/// Returns the extents this layout was built from.
	pub fn extents(&self) -> Extents {
		self.extents
	}

	/// Number of cell columns.
	pub fn columns(&self) -> usize {
		self.columns
	}

	/// Number of cell rows.
	pub fn rows(&self) -> usize {
		self.rows
	}

	/// Cell width in pixels.
	pub fn cell_width(&self) -> u32 {
		self.extents.width as u32 * SPRITE_SIZE
	}

	/// Cell height in pixels.
	pub fn cell_height(&self) -> u32 {
		self.extents.height as u32 * SPRITE_SIZE
	}

	/// Atlas width in pixels, saturating at `u32::MAX`.
	///
	/// See [`checked_size`](Self::checked_size) for atlases that may not fit.
	pub fn width(&self) -> u32 {
		u32::try_from(self.wide_width()).unwrap_or(u32::MAX)
	}

	/// Atlas height in pixels, saturating at `u32::MAX`.
	pub fn height(&self) -> u32 {
		u32::try_from(self.wide_height()).unwrap_or(u32::MAX)
	}

	/// Atlas width and height in pixels.
	///
	/// # Errors
	///
	/// Returns [`ValidationError::SheetTooLarge`] if either dimension exceeds
	/// `u32::MAX`.
	pub fn checked_size(&self) -> Result<(u32, u32), ValidationError> {
		let (width, height) = (self.wide_width(), self.wide_height());
		match (u32::try_from(width), u32::try_from(height)) {
			(Ok(w), Ok(h)) => Ok((w, h)),
			_ => Err(ValidationError::SheetTooLarge {
				width,
				height,
			}),
		}
	}

	fn wide_width(&self) -> u64 {
		self.columns as u64 * u64::from(self.cell_width())
	}

	fn wide_height(&self) -> u64 {
		self.rows as u64 * u64::from(self.cell_height())
	}

	/// Top-left pixel of atlas cell `texture_index`.
	pub fn cell_origin(&self, texture_index: usize) -> (u32, u32) {
		let columns = self.columns.max(1);
		let x = (texture_index % columns) as u32 * self.cell_width();
		let y = (texture_index / columns) as u32 * self.cell_height();
		(x, y)
	}

	/// Pixel offset of tile `(w, h)` inside its cell.
	///
	/// Tiles are stored bottom-right first: tile `(0, 0)` occupies the
	/// bottom-right corner of the cell.
	pub fn tile_offset(&self, w: usize, h: usize) -> (u32, u32) {
		let x = (self.extents.width - w - 1) as u32 * SPRITE_SIZE;
		let y = (self.extents.height - h - 1) as u32 * SPRITE_SIZE;
		(x, y)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn extents(w: usize, h: usize, l: usize, px: usize, py: usize, pz: usize, f: usize) -> Extents {
		Extents {
			width: w,
			height: h,
			layers: l,
			pattern_x: px,
			pattern_y: py,
			pattern_z: pz,
			frames: f,
		}
	}

	#[test]
	fn test_two_wide_enumerates_without_collision() {
		let e = extents(2, 1, 1, 1, 1, 1, 1);
		let indices: Vec<_> = (0..2)
			.map(|w| {
				e.sprite_index(SpriteCoord {
					width: w,
					..Default::default()
				})
			})
			.collect();
		assert_eq!(indices, [0, 1]);
	}

	#[test]
	fn test_full_enumeration_is_a_permutation() {
		let e = extents(2, 2, 2, 4, 3, 2, 3);
		let mut seen = vec![false; e.sprite_count()];
		for frame in 0..e.frames {
			for pattern_z in 0..e.pattern_z {
				for pattern_y in 0..e.pattern_y {
					for pattern_x in 0..e.pattern_x {
						for layer in 0..e.layers {
							for height in 0..e.height {
								for width in 0..e.width {
									let index = e.sprite_index(SpriteCoord {
										width,
										height,
										layer,
										pattern_x,
										pattern_y,
										pattern_z,
										frame,
									});
									assert!(!seen[index], "collision at {index}");
									seen[index] = true;
								}
							}
						}
					}
				}
			}
		}
		assert!(seen.iter().all(|&hit| hit));
	}

	#[test]
	fn test_known_offsets() {
		let e = extents(2, 2, 2, 4, 1, 1, 2);
		// frame 1, px 3, layer 1, h 1, w 0
		let coord = SpriteCoord {
			width: 0,
			height: 1,
			layer: 1,
			pattern_x: 3,
			pattern_y: 0,
			pattern_z: 0,
			frame: 1,
		};
		assert_eq!(e.texture_index(1, 3, 0, 0, 1), ((4 + 3) * 2) + 1);
		assert_eq!(e.sprite_index(coord), (15 * 2 + 1) * 2);
	}

	#[test]
	fn test_frame_wraps() {
		let e = extents(1, 1, 2, 1, 1, 1, 3);
		assert_eq!(e.texture_index(1, 0, 0, 0, 4), e.texture_index(1, 0, 0, 0, 1));
		let wrapped = SpriteCoord {
			frame: 7,
			..Default::default()
		};
		let plain = SpriteCoord {
			frame: 1,
			..Default::default()
		};
		assert_eq!(e.sprite_index(wrapped), e.sprite_index(plain));
		assert_eq!(e.checked_sprite_index(wrapped), Ok(e.sprite_index(plain)));
	}

	#[test]
	fn test_checked_rejects_out_of_range() {
		let e = extents(1, 1, 1, 2, 1, 1, 1);
		let coord = SpriteCoord {
			pattern_x: 2,
			..Default::default()
		};
		assert_eq!(
			e.checked_sprite_index(coord),
			Err(RangeError {
				axis: "pattern_x",
				value: 2,
				extent: 2
			})
		);
	}

	#[test]
	fn test_layout_geometry() {
		let layout = extents(2, 1, 2, 4, 3, 1, 2).layout();
		assert_eq!(layout.columns(), 8);
		assert_eq!(layout.rows(), 6);
		assert_eq!(layout.width(), 8 * 64);
		assert_eq!(layout.height(), 6 * 32);
		assert_eq!(layout.cell_origin(9), (64, 32));
		assert_eq!(layout.tile_offset(0, 0), (32, 0));
		assert_eq!(layout.tile_offset(1, 0), (0, 0));
		assert_eq!(layout.checked_size(), Ok((8 * 64, 6 * 32)));
	}

	#[test]
	fn test_oversized_layout() {
		let layout = extents(255, 1, 255, 255, 1, 255, 1).layout();
		let width = 255u64 * 255 * 255 * 255 * 32;
		assert_eq!(
			layout.checked_size(),
			Err(ValidationError::SheetTooLarge {
				width,
				height: 32
			})
		);
		assert_eq!(layout.width(), u32::MAX);
		assert_eq!(layout.height(), 32);
	}
}
