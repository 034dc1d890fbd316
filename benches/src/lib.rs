//! Benchmark helper utilities for obd-rs
//!
//! This module provides generators for synthetic containers and sprite tables
//! shared by the benchmark suite.

use obd_types::file::obd::{
	AnimationMode, File, FormatVersion, FrameDuration, FrameGroup, FrameGroupType, ObjectCategory,
	ObjectDefinition, SPRITE_BYTES, SpriteData,
};

/// Builds a 4096-byte sprite whose pixels depend on `seed`.
///
/// The pattern includes sentinel bytes so that encoding exercises escaping.
pub fn generate_sprite(id: u32, seed: u8) -> SpriteData {
	let pixels = (0..SPRITE_BYTES).map(|i| (i as u8).wrapping_mul(seed | 1).wrapping_add(seed)).collect();
	// 4096 bytes is always a valid sprite
	SpriteData::new(id, pixels).unwrap_or_else(|_| SpriteData::blank(id))
}

/// Builds a walking outfit with `frames` animation frames and 4 directions.
pub fn generate_outfit(id: u32, frames: u8) -> ObjectDefinition {
	let mut group = FrameGroup::new(1, 1, 2, 4, 1, 1, frames);
	group.mode = AnimationMode::Synchronous;
	group.durations = vec![FrameDuration::fixed(150); usize::from(frames)];

	let sprites = (0..group.sprite_count())
		.map(|i| generate_sprite(id * 1000 + i as u32 + 1, i as u8))
		.collect();

	let mut object = ObjectDefinition::new(id, ObjectCategory::Outfit)
		.with_group(FrameGroupType::Default, FrameGroup::new(1, 1, 1, 1, 1, 1, 1))
		.with_group(FrameGroupType::Walking, group);
	// Tile counts match the extents built above
	let _ = object.attach_sprites(FrameGroupType::Default, vec![SpriteData::blank(0)]);
	let _ = object.attach_sprites(FrameGroupType::Walking, sprites);
	object
}

/// Generates an encoded container holding `objects` walking outfits.
///
/// Version 3 containers carry their sprites inline; version 2 containers
/// only reference them.
pub fn generate_test_container(objects: u32, version: FormatVersion) -> Vec<u8> {
	let mut file = File::new(version);
	file.objects = (1..=objects).map(|id| generate_outfit(id, 8)).collect();
	file.to_bytes().unwrap_or_default()
}

/// Common benchmark sizes for synthetic containers
pub mod sizes {
	/// Handful of objects
	pub const SMALL: u32 = 16;
	/// Typical catalog slice
	pub const MEDIUM: u32 = 128;
	/// Whole catalog
	pub const LARGE: u32 = 1024;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generate_test_container() {
		let data = generate_test_container(2, FormatVersion::V3);
		assert_eq!(&data[..4], &0x0044_424Fu32.to_le_bytes());

		let file = File::from_bytes(&data).unwrap();
		assert_eq!(file.len(), 2);
		let outfit = file.get(ObjectCategory::Outfit, 2).unwrap();
		let sprites = outfit.sprite_group(FrameGroupType::Walking).unwrap();
		assert_eq!(sprites.len(), 64);
		assert_eq!(sprites[5], generate_sprite(2005 + 1, 5));
	}

	#[test]
	fn test_sizes_constants() {
		assert!(sizes::SMALL < sizes::MEDIUM);
		assert!(sizes::MEDIUM < sizes::LARGE);
	}
}
