//! Sprite-sheet assembly.
//!
//! A frame group's tiles are laid out in one atlas: one cell per
//! (frame, pattern, layer) combination, each cell `width × height` tiles of
//! 32 × 32 pixels.
//!
//! Cells are numbered by [`Extents::texture_index`] and placed row-major,
//! `pattern_z · pattern_x · layers` cells per row and `frames · pattern_y`
//! rows.
//!
//! Inside a cell, tile `(0, 0)` is the bottom-right one.

mod assembler;
mod bitmap;
mod color;
mod index;
mod outfit;

pub use assembler::{assemble, assemble_into, split};
pub use bitmap::{Bitmap, PixelBuffer};
pub use color::{Color, HSI_COLOR_COUNT, HSI_HUE_STEPS, HSI_ROWS};
pub use index::{Extents, SPRITE_SIZE, SheetLayout, SpriteCoord};
pub use outfit::{OutfitPalette, colorize_outfit, outfit_extents};
