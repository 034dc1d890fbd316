//! Sprite tiles and lookup by ID.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::file::ValidationError;
use crate::sheet::{Color, PixelBuffer, SPRITE_SIZE};

/// Byte length of a full sprite payload (32 × 32 RGBA)
pub const SPRITE_BYTES: usize = (SPRITE_SIZE * SPRITE_SIZE * 4) as usize;

/// One 32 × 32 sprite tile.
///
/// Sprite 0 and any sprite with an empty payload are fully transparent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SpriteData {
	/// Sprite ID
	pub id: u32,
	pixels: Vec<u8>,
}

impl SpriteData {
	/// Creates a sprite from raw RGBA bytes.
	///
	/// # Errors
	///
	/// Returns [`ValidationError::SpritePixels`] unless the payload is empty or
	/// exactly [`SPRITE_BYTES`] long.
	pub fn new(id: u32, pixels: Vec<u8>) -> Result<Self, ValidationError> {
		if !pixels.is_empty() && pixels.len() != SPRITE_BYTES {
			return Err(ValidationError::SpritePixels {
				id,
				expected: SPRITE_BYTES,
				len: pixels.len(),
			});
		}
		Ok(Self {
			id,
			pixels,
		})
	}

	/// Creates a transparent sprite.
	pub fn blank(id: u32) -> Self {
		Self {
			id,
			pixels: Vec::new(),
		}
	}

	/// Reads a sprite from a 32 × 32 block of a pixel buffer.
	///
	/// A block that is fully transparent yields an empty payload.
	pub fn from_buffer<B: PixelBuffer + ?Sized>(id: u32, buffer: &B, x: u32, y: u32) -> Self {
		let mut pixels = Vec::with_capacity(SPRITE_BYTES);
		let mut opaque = false;
		for py in 0..SPRITE_SIZE {
			for px in 0..SPRITE_SIZE {
				let color = buffer.get_pixel(x + px, y + py);
				opaque |= !color.is_transparent();
				pixels.extend_from_slice(&color.to_array());
			}
		}
		if !opaque {
			pixels.clear();
		}
		Self {
			id,
			pixels,
		}
	}

	/// Returns the raw RGBA payload (empty for a blank sprite).
	pub fn pixels(&self) -> &[u8] {
		&self.pixels
	}

	/// Returns true if every pixel is transparent.
	pub fn is_blank(&self) -> bool {
		self.pixels.chunks_exact(4).all(|pixel| pixel[3] == 0)
	}

	/// Reads one pixel; coordinates are in `0..32`.
	#[inline]
	pub fn pixel(&self, x: u32, y: u32) -> Color {
		if self.pixels.is_empty() {
			return Color::transparent();
		}
		let offset = ((y * SPRITE_SIZE + x) * 4) as usize;
		Color::from_array([
			self.pixels[offset],
			self.pixels[offset + 1],
			self.pixels[offset + 2],
			self.pixels[offset + 3],
		])
	}
}

/// Lookup of shared sprites by ID.
pub trait SpriteSource {
	/// Returns the sprite with the given ID, if known.
	fn sprite(&self, id: u32) -> Option<&SpriteData>;
}

/// In-memory [`SpriteSource`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpriteStore {
	sprites: HashMap<u32, SpriteData>,
}

impl SpriteStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds or replaces a sprite, returning the previous one.
	pub fn insert(&mut self, sprite: SpriteData) -> Option<SpriteData> {
		self.sprites.insert(sprite.id, sprite)
	}

	/// Returns the number of stored sprites.
	pub fn len(&self) -> usize {
		self.sprites.len()
	}

	/// Returns true if the store is empty.
	pub fn is_empty(&self) -> bool {
		self.sprites.is_empty()
	}
}

impl SpriteSource for SpriteStore {
	fn sprite(&self, id: u32) -> Option<&SpriteData> {
		self.sprites.get(&id)
	}
}

impl Extend<SpriteData> for SpriteStore {
	fn extend<T: IntoIterator<Item = SpriteData>>(&mut self, iter: T) {
		for sprite in iter {
			self.insert(sprite);
		}
	}
}

impl FromIterator<SpriteData> for SpriteStore {
	fn from_iter<T: IntoIterator<Item = SpriteData>>(iter: T) -> Self {
		let mut store = Self::new();
		store.extend(iter);
		store
	}
}
