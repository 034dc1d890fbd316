//! Encoding of object, frame group and sprite nodes.

use std::collections::HashSet;
use std::io::Write;

use crate::file::tree::TreeWriter;
use crate::file::{ObdError, ValidationError};

use super::constants::{
	ANIMATION_HEADER_SIZE, DURATION_SIZE, PIXEL_BYTES_PER_PROPERTY, PROP_ANIMATION, PROP_FRAMES,
	PROP_ID, PROP_LAYERS, PROP_PATTERNS, PROP_SIZE, PROP_SPRITE_ID, PROP_SPRITE_IDS,
	PROP_SPRITE_PIXELS, SPRITE_IDS_PER_PROPERTY, SPRITE_NODE,
};
use super::{FormatVersion, FrameGroup, ObjectDefinition, SpriteCodec, SpriteData};

/// Writes one object node with its frame groups.
pub(super) fn write_object<W: Write>(
	writer: &mut TreeWriter<W>,
	object: &ObjectDefinition,
	version: FormatVersion,
	codec: &dyn SpriteCodec,
) -> Result<(), ObdError> {
	object.validate()?;
	for (group_type, _) in object.frame_groups.iter() {
		if !version.supports(group_type) {
			return Err(ValidationError::GroupNotSupported {
				version: version.to_u8(),
				group: group_type,
			}
			.into());
		}
	}

	writer.begin_node(object.category.to_u8())?;
	writer.write_property(PROP_ID, &object.id.to_le_bytes())?;
	for property in &object.properties {
		writer.write_property(property.tag, &property.data)?;
	}

	for (group_type, group) in object.frame_groups.iter() {
		writer.begin_node(group_type.to_u8())?;
		write_frame_group(writer, group)?;
		if version.has_inline_sprites() {
			for sprite in unique_sprites(object.sprite_group(group_type)?) {
				write_sprite(writer, sprite, codec)?;
			}
		}
		writer.end_node()?;
	}

	writer.end_node()?;
	Ok(())
}

fn write_frame_group<W: Write>(writer: &mut TreeWriter<W>, group: &FrameGroup) -> Result<(), ObdError> {
	let [exact_lo, exact_hi] = group.exact_size.to_le_bytes();
	writer.write_property(PROP_SIZE, &[group.width, group.height, exact_lo, exact_hi])?;
	writer.write_property(PROP_LAYERS, &[group.layers])?;
	writer.write_property(PROP_PATTERNS, &[group.pattern_x, group.pattern_y, group.pattern_z])?;
	writer.write_property(PROP_FRAMES, &[group.frames])?;

	if group.is_animated() {
		let mut data = Vec::with_capacity(ANIMATION_HEADER_SIZE + group.durations.len() * DURATION_SIZE);
		data.push(group.mode.to_u8());
		data.extend_from_slice(&group.loop_count.to_le_bytes());
		data.extend_from_slice(&group.start_frame.to_i32().to_le_bytes());
		for duration in &group.durations {
			data.extend_from_slice(&duration.minimum().to_le_bytes());
			data.extend_from_slice(&duration.maximum().to_le_bytes());
		}
		writer.write_property(PROP_ANIMATION, &data)?;
	}

	for chunk in group.sprite_ids.chunks(SPRITE_IDS_PER_PROPERTY) {
		let data: Vec<u8> = chunk.iter().flat_map(|id| id.to_le_bytes()).collect();
		writer.write_property(PROP_SPRITE_IDS, &data)?;
	}
	Ok(())
}

fn write_sprite<W: Write>(
	writer: &mut TreeWriter<W>,
	sprite: &SpriteData,
	codec: &dyn SpriteCodec,
) -> Result<(), ObdError> {
	writer.begin_node(SPRITE_NODE)?;
	writer.write_property(PROP_SPRITE_ID, &sprite.id.to_le_bytes())?;
	if !sprite.pixels().is_empty() {
		let compressed = codec.compress(sprite.pixels())?;
		for chunk in compressed.chunks(PIXEL_BYTES_PER_PROPERTY) {
			writer.write_property(PROP_SPRITE_PIXELS, chunk)?;
		}
	}
	writer.end_node()?;
	Ok(())
}

/// Each non-zero sprite ID once, in first-use order.
fn unique_sprites(sprites: &[SpriteData]) -> impl Iterator<Item = &SpriteData> {
	let mut seen = HashSet::new();
	sprites.iter().filter(move |sprite| sprite.id != 0 && seen.insert(sprite.id))
}
