//! Atlas assembly and splitting.

use log::debug;

use crate::file::ValidationError;
use crate::file::obd::{FrameGroup, SpriteData};

use super::{Bitmap, Extents, PixelBuffer, SPRITE_SIZE, SheetLayout, SpriteCoord};

/// Composes the tiles of a frame group into a new atlas.
///
/// `sprites` is in sprite table order (see [`Extents::sprite_index`]).
///
/// # Errors
///
/// Returns [`ValidationError::SpriteTableLength`] if `sprites` is shorter
/// than the group's sprite table, or [`ValidationError::SheetTooLarge`] if
/// the atlas does not fit 32-bit dimensions.
///
/// # Examples
///
/// ```
/// use obd_types::file::obd::{FrameGroup, SpriteData};
/// use obd_types::sheet::{PixelBuffer, assemble};
///
/// let group = FrameGroup::new(2, 1, 1, 3, 1, 1, 2);
/// let sprites = vec![SpriteData::blank(0); group.sprite_count()];
/// let atlas = assemble(&group, &sprites).unwrap();
/// assert_eq!((atlas.width(), atlas.height()), (3 * 64, 2 * 32));
/// ```
pub fn assemble(group: &FrameGroup, sprites: &[SpriteData]) -> Result<Bitmap, ValidationError> {
	let (width, height) = group.layout().checked_size()?;
	let mut bitmap = Bitmap::new(width, height);
	assemble_into(group, sprites, &mut bitmap)?;
	Ok(bitmap)
}

/// Composes the tiles of a frame group into an existing buffer.
///
/// Every pixel of every cell is written; blank sprites clear their tile.
///
/// # Errors
///
/// Fails if `sprites` is shorter than the sprite table or `target` does not
/// have the atlas dimensions.
pub fn assemble_into<B: PixelBuffer + ?Sized>(
	group: &FrameGroup,
	sprites: &[SpriteData],
	target: &mut B,
) -> Result<(), ValidationError> {
	let extents = group.extents();
	let layout = extents.layout();
	if sprites.len() < extents.sprite_count() {
		return Err(ValidationError::SpriteTableLength {
			expected: extents.sprite_count(),
			actual: sprites.len(),
		});
	}
	check_size(&layout, target)?;
	debug!(
		"assembling {}x{} atlas ({} cells)",
		layout.width(),
		layout.height(),
		extents.texture_count()
	);

	for_each_tile(&extents, |coord, x, y| {
		let sprite = &sprites[extents.sprite_index(coord)];
		for py in 0..SPRITE_SIZE {
			for px in 0..SPRITE_SIZE {
				target.set_pixel(x + px, y + py, sprite.pixel(px, py));
			}
		}
	});
	Ok(())
}

/// Cuts an atlas back into tiles, in sprite table order.
///
/// Tile IDs are taken from the group's sprite table. Fully transparent tiles
/// come back with an empty payload.
///
/// # Errors
///
/// Fails if the group's sprite table does not match its extents or `sheet`
/// does not have the atlas dimensions.
pub fn split<B: PixelBuffer + ?Sized>(group: &FrameGroup, sheet: &B) -> Result<Vec<SpriteData>, ValidationError> {
	let extents = group.extents();
	let layout = extents.layout();
	if group.sprite_ids.len() != extents.sprite_count() {
		return Err(ValidationError::SpriteTableLength {
			expected: extents.sprite_count(),
			actual: group.sprite_ids.len(),
		});
	}
	check_size(&layout, sheet)?;

	let mut sprites = vec![SpriteData::default(); extents.sprite_count()];
	for_each_tile(&extents, |coord, x, y| {
		let index = extents.sprite_index(coord);
		sprites[index] = SpriteData::from_buffer(group.sprite_ids[index], sheet, x, y);
	});
	Ok(sprites)
}

pub(super) fn check_size<B: PixelBuffer + ?Sized>(layout: &SheetLayout, buffer: &B) -> Result<(), ValidationError> {
	let (width, height) = layout.checked_size()?;
	if buffer.width() != width || buffer.height() != height {
		return Err(ValidationError::BitmapSize {
			expected_width: width,
			expected_height: height,
			actual_width: buffer.width(),
			actual_height: buffer.height(),
		});
	}
	Ok(())
}

/// Visits every tile in f, pz, py, px, l, h, w order with the pixel position
/// of its top-left corner in the atlas.
fn for_each_tile(extents: &Extents, mut visit: impl FnMut(SpriteCoord, u32, u32)) {
	let layout = extents.layout();
	for frame in 0..extents.frames {
		for pattern_z in 0..extents.pattern_z {
			for pattern_y in 0..extents.pattern_y {
				for pattern_x in 0..extents.pattern_x {
					for layer in 0..extents.layers {
						let texture = extents.texture_index(layer, pattern_x, pattern_y, pattern_z, frame);
						let (cell_x, cell_y) = layout.cell_origin(texture);
						for height in 0..extents.height {
							for width in 0..extents.width {
								let (x, y) = layout.tile_offset(width, height);
								let coord = SpriteCoord {
									width,
									height,
									layer,
									pattern_x,
									pattern_y,
									pattern_z,
									frame,
								};
								visit(coord, cell_x + x, cell_y + y);
							}
						}
					}
				}
			}
		}
	}
}
