//! Integration tests for `obd-rs`

mod animation;
mod containers;
mod sheets;

use obd_rs::prelude::*;

/// A 32 × 32 sprite filled with one color.
pub(crate) fn solid(id: u32, color: Color) -> SpriteData {
	let pixels = color.to_array().repeat(32 * 32);
	SpriteData::new(id, pixels).unwrap()
}

/// A sprite whose pixels are derived from `seed`, including sentinel bytes.
pub(crate) fn patterned(id: u32, seed: u8) -> SpriteData {
	let pixels = (0..4096u32).map(|i| (i as u8).wrapping_add(seed) | 0x01).collect();
	SpriteData::new(id, pixels).unwrap()
}
