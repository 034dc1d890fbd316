//! Outfit recoloring.
//!
//! Outfit atlases carry two layers per cell: layer 0 is a grayscale
//! template and layer 1 a blend mask whose pure colors mark the body parts.
//! Pattern-y rows beyond the first are addons, drawn over the base outfit
//! only when their bit is set.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::file::ValidationError;
use crate::file::obd::FrameGroup;

use super::assembler::check_size;
use super::{Bitmap, Color, Extents, PixelBuffer};

/// The four tint colors applied to an outfit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OutfitPalette {
	/// Applied where the blend mask is yellow
	pub head: Color,
	/// Applied where the blend mask is red
	pub body: Color,
	/// Applied where the blend mask is green
	pub legs: Color,
	/// Applied where the blend mask is blue
	pub feet: Color,
}

impl OutfitPalette {
	/// Creates a palette from four colors.
	pub fn new(head: Color, body: Color, legs: Color, feet: Color) -> Self {
		Self {
			head,
			body,
			legs,
			feet,
		}
	}

	/// Creates a palette from compact outfit color bytes.
	///
	/// See [`Color::from_hsi`].
	pub fn from_hsi(head: u8, body: u8, legs: u8, feet: u8) -> Self {
		Self::new(Color::from_hsi(head), Color::from_hsi(body), Color::from_hsi(legs), Color::from_hsi(feet))
	}

	/// Picks the tint for one blend mask pixel.
	///
	/// Returns `None` for mask colors that do not name a body part.
	pub fn tint(&self, mask: Color) -> Option<Color> {
		match (mask.r > 0, mask.g > 0, mask.b > 0) {
			(true, true, false) => Some(self.head),
			(true, false, false) => Some(self.body),
			(false, true, false) => Some(self.legs),
			(false, false, true) => Some(self.feet),
			_ => None,
		}
	}
}

/// Extents of the atlas produced by [`colorize_outfit`]: one layer and one
/// pattern-y row, everything else unchanged.
pub fn outfit_extents(group: &FrameGroup) -> Extents {
	Extents {
		layers: 1,
		pattern_y: 1,
		..group.extents()
	}
}

/// Tints an assembled outfit atlas.
///
/// For every (frame, pattern z, pattern x) cell, the base row and each addon
/// row whose bit is set in `addons` (bit 0 for pattern-y row 1) are tinted
/// and drawn over each other in row order.
///
/// Per pixel: where the template or the mask is fully transparent the
/// template pixel is drawn unchanged; where the mask names a body part the
/// template is multiplied by that part's tint, keeping the template's alpha;
/// any other mask color leaves the output pixel untouched. The base row is
/// written as is, including the color channels of transparent pixels; addon
/// rows are composited source-over.
///
/// # Errors
///
/// Fails if the group has fewer than two layers or `sheet` does not have
/// the group's atlas dimensions.
pub fn colorize_outfit<B: PixelBuffer + ?Sized>(
	group: &FrameGroup,
	sheet: &B,
	palette: &OutfitPalette,
	addons: u8,
) -> Result<Bitmap, ValidationError> {
	if group.layers < 2 {
		return Err(ValidationError::NotEnoughLayers(group.layers));
	}
	let extents = group.extents();
	let layout = extents.layout();
	check_size(&layout, sheet)?;

	let out_extents = outfit_extents(group);
	let out_layout = out_extents.layout();
	let (out_width, out_height) = out_layout.checked_size()?;
	let mut output = Bitmap::new(out_width, out_height);
	debug!(
		"colorizing outfit {}x{} -> {}x{}, addons {addons:#04b}",
		layout.width(),
		layout.height(),
		out_layout.width(),
		out_layout.height()
	);

	let (cell_width, cell_height) = (layout.cell_width(), layout.cell_height());
	let mut template = Bitmap::new(cell_width, cell_height);
	let mut mask = Bitmap::new(cell_width, cell_height);

	for frame in 0..extents.frames {
		for pattern_z in 0..extents.pattern_z {
			for pattern_x in 0..extents.pattern_x {
				let out_index = out_extents.texture_index(0, pattern_x, 0, pattern_z, frame);
				let (out_x, out_y) = out_layout.cell_origin(out_index);

				for pattern_y in (0..extents.pattern_y).filter(|&row| addon_active(addons, row)) {
					let (gray_x, gray_y) =
						layout.cell_origin(extents.texture_index(0, pattern_x, pattern_y, pattern_z, frame));
					let (mask_x, mask_y) =
						layout.cell_origin(extents.texture_index(1, pattern_x, pattern_y, pattern_z, frame));
					template.copy_from(sheet, gray_x, gray_y, cell_width, cell_height, 0, 0);
					mask.copy_from(sheet, mask_x, mask_y, cell_width, cell_height, 0, 0);

					for y in 0..cell_height {
						for x in 0..cell_width {
							let gray = template.get_pixel(x, y);
							let blend = mask.get_pixel(x, y);
							let color = if gray.is_transparent() || blend.is_transparent() {
								gray
							} else if let Some(tint) = palette.tint(blend) {
								gray.multiply(tint)
							} else {
								continue;
							};

							let (px, py) = (out_x + x, out_y + y);
							if pattern_y == 0 {
								output.set_pixel(px, py, color);
							} else {
								output.set_pixel(px, py, color.over(output.get_pixel(px, py)));
							}
						}
					}
				}
			}
		}
	}
	Ok(output)
}

/// Row 0 is always drawn; row `n` needs addon bit `n - 1`.
fn addon_active(addons: u8, row: usize) -> bool {
	match row {
		0 => true,
		1..=8 => addons & (1 << (row - 1)) != 0,
		_ => false,
	}
}
