//! Decoding of object, frame group and sprite nodes.
//!
//! Every function here starts with the tree cursor on the node it decodes
//! and leaves it there, so the caller can move on to the next sibling.

use std::io::{Read, Seek};

use log::{trace, warn};

use crate::file::tree::{NodeData, Property, TreeReader};
use crate::file::{ObdError, ReadConfig, UnknownProperties, ValidationError};

use super::constants::{
	ANIMATION_HEADER_SIZE, DURATION_SIZE, PROP_ANIMATION, PROP_FRAMES, PROP_ID, PROP_LAYERS,
	PROP_PATTERNS, PROP_SIZE, PROP_SPRITE_ID, PROP_SPRITE_IDS, PROP_SPRITE_PIXELS, SPRITE_NODE,
};
use super::object::resolve_table;
use super::{
	AnimationMode, FormatVersion, FrameDuration, FrameGroup, FrameGroupType, ObjectCategory,
	ObjectDefinition, RawProperty, SpriteCodec, SpriteData, SpriteStore, StartFrame,
};

/// Decoding options shared by every node of one container.
pub(super) struct DecodeContext<'a> {
	pub version: FormatVersion,
	pub config: ReadConfig,
	pub codec: &'a dyn SpriteCodec,
}

/// Decodes the object node the cursor is on, including its frame groups.
pub(super) fn read_object<R: Read + Seek>(
	reader: &mut TreeReader<R>,
	node: NodeData,
	ctx: &DecodeContext<'_>,
) -> Result<ObjectDefinition, ObdError> {
	let category = ObjectCategory::from_u8(node.node_type())?;

	let mut id = None;
	let mut properties = Vec::new();
	for property in node.properties() {
		let property = property?;
		match property.tag {
			PROP_ID => id = Some(u32_property(&property)?),
			tag => match ctx.config.unknown_properties {
				UnknownProperties::Preserve => properties.push(RawProperty {
					tag,
					data: property.data.to_vec(),
				}),
				UnknownProperties::Skip => {
					warn!("skipping unknown object property 0x{tag:02X} at offset {}", node.offset());
				}
				UnknownProperties::Reject => {
					return Err(ValidationError::UnknownProperty {
						tag,
						context: "object",
					}
					.into());
				}
			},
		}
	}
	let id = id.ok_or(ValidationError::MissingProperty {
		tag: PROP_ID,
		context: "object",
	})?;
	trace!("object {id} ({category}) at offset {}", node.offset());

	let mut object = ObjectDefinition::new(id, category);
	object.properties = properties;

	let Some(mut child) = reader.try_open_child()? else {
		object.validate()?;
		return Ok(object);
	};
	loop {
		let group_type = FrameGroupType::from_u8(child.node_type())?;
		if !ctx.version.supports(group_type) {
			return Err(ValidationError::GroupNotSupported {
				version: ctx.version.to_u8(),
				group: group_type,
			}
			.into());
		}
		if object.frame_groups.contains(group_type) {
			return Err(ValidationError::DuplicateGroup(group_type).into());
		}

		let group = read_frame_group(&child, ctx)?;
		if ctx.version.has_inline_sprites() {
			let store = read_sprites(reader, ctx)?;
			object.sprites.insert(group_type, resolve_table(&group.sprite_ids, &store)?);
		}
		object.frame_groups.insert(group_type, group);

		match reader.advance_sibling()? {
			Some(next) => child = next,
			None => break,
		}
	}
	reader.leave();

	object.validate()?;
	Ok(object)
}

/// Decodes a frame group node's properties.
fn read_frame_group(node: &NodeData, ctx: &DecodeContext<'_>) -> Result<FrameGroup, ObdError> {
	let mut size = None;
	let mut layers = None;
	let mut patterns = None;
	let mut frames = None;
	let mut animation = None;
	let mut sprite_ids = Vec::new();

	for property in node.properties() {
		let property = property?;
		match property.tag {
			PROP_SIZE => {
				let [width, height, exact_lo, exact_hi] = fixed_property::<4>(&property)?;
				size = Some((width, height, u16::from_le_bytes([exact_lo, exact_hi])));
			}
			PROP_LAYERS => layers = Some(u8_property(&property)?),
			PROP_PATTERNS => patterns = Some(fixed_property::<3>(&property)?),
			PROP_FRAMES => frames = Some(u8_property(&property)?),
			PROP_ANIMATION => animation = Some(property.data),
			PROP_SPRITE_IDS => {
				if property.data.len() % 4 != 0 {
					return Err(ValidationError::PropertyLength {
						tag: PROP_SPRITE_IDS,
						expected: property.data.len() / 4 * 4,
						actual: property.data.len(),
					}
					.into());
				}
				sprite_ids.extend(
					property
						.data
						.chunks_exact(4)
						.map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])),
				);
			}
			tag => reject_or_skip(tag, "frame group", ctx)?,
		}
	}

	let missing = |tag| ValidationError::MissingProperty {
		tag,
		context: "frame group",
	};
	let (width, height, exact_size) = size.ok_or_else(|| missing(PROP_SIZE))?;
	let layers = layers.ok_or_else(|| missing(PROP_LAYERS))?;
	let [pattern_x, pattern_y, pattern_z] = patterns.ok_or_else(|| missing(PROP_PATTERNS))?;
	let frames = frames.ok_or_else(|| missing(PROP_FRAMES))?;

	let mut group = FrameGroup::new(width, height, layers, pattern_x, pattern_y, pattern_z, frames);
	group.exact_size = exact_size;
	group.sprite_ids = sprite_ids;

	match animation {
		Some(data) => read_animation(&mut group, data)?,
		None if frames > 1 => return Err(missing(PROP_ANIMATION).into()),
		None => {}
	}

	group.validate()?;
	Ok(group)
}

fn read_animation(group: &mut FrameGroup, data: &[u8]) -> Result<(), ObdError> {
	let expected = ANIMATION_HEADER_SIZE + usize::from(group.frames) * DURATION_SIZE;
	if data.len() != expected {
		return Err(ValidationError::PropertyLength {
			tag: PROP_ANIMATION,
			expected,
			actual: data.len(),
		}
		.into());
	}

	let mut payload = NodeData::new(PROP_ANIMATION, 0, data.to_vec());
	group.mode = AnimationMode::from_u8(payload.read_u8()?)?;
	group.loop_count = payload.read_i32()?;
	group.start_frame = StartFrame::from_i32(payload.read_i32()?);
	group.durations = (0..group.frames)
		.map(|_| -> Result<FrameDuration, ObdError> {
			let minimum = payload.read_u32()?;
			let maximum = payload.read_u32()?;
			Ok(FrameDuration::new(minimum, maximum)?)
		})
		.collect::<Result<_, _>>()?;
	Ok(())
}

/// Reads the inline sprite nodes below the current frame group.
fn read_sprites<R: Read + Seek>(
	reader: &mut TreeReader<R>,
	ctx: &DecodeContext<'_>,
) -> Result<SpriteStore, ObdError> {
	let mut store = SpriteStore::new();
	let Some(mut child) = reader.try_open_child()? else {
		return Ok(store);
	};
	loop {
		if child.node_type() == SPRITE_NODE {
			let sprite = read_sprite(&child, ctx)?;
			trace!("inline sprite {} ({} bytes)", sprite.id, sprite.pixels().len());
			store.insert(sprite);
		} else {
			warn!("skipping node type 0x{:02X} inside frame group", child.node_type());
		}

		match reader.advance_sibling()? {
			Some(next) => child = next,
			None => break,
		}
	}
	reader.leave();
	Ok(store)
}

fn read_sprite(node: &NodeData, ctx: &DecodeContext<'_>) -> Result<SpriteData, ObdError> {
	let mut id = None;
	let mut compressed = Vec::new();
	for property in node.properties() {
		let property = property?;
		match property.tag {
			PROP_SPRITE_ID => id = Some(u32_property(&property)?),
			PROP_SPRITE_PIXELS => compressed.extend_from_slice(property.data),
			tag => reject_or_skip(tag, "sprite", ctx)?,
		}
	}
	let id = id.ok_or(ValidationError::MissingProperty {
		tag: PROP_SPRITE_ID,
		context: "sprite",
	})?;

	let pixels = if compressed.is_empty() {
		Vec::new()
	} else {
		ctx.codec.decompress(&compressed)?
	};
	Ok(SpriteData::new(id, pixels)?)
}

/// Unknown properties below the object level cannot be preserved.
fn reject_or_skip(tag: u8, context: &'static str, ctx: &DecodeContext<'_>) -> Result<(), ValidationError> {
	if ctx.config.unknown_properties == UnknownProperties::Reject {
		return Err(ValidationError::UnknownProperty {
			tag,
			context,
		});
	}
	warn!("skipping unknown {context} property 0x{tag:02X}");
	Ok(())
}

fn fixed_property<const N: usize>(property: &Property<'_>) -> Result<[u8; N], ValidationError> {
	property.data.try_into().map_err(|_| ValidationError::PropertyLength {
		tag: property.tag,
		expected: N,
		actual: property.data.len(),
	})
}

fn u8_property(property: &Property<'_>) -> Result<u8, ValidationError> {
	fixed_property::<1>(property).map(|[value]| value)
}

fn u32_property(property: &Property<'_>) -> Result<u32, ValidationError> {
	fixed_property::<4>(property).map(u32::from_le_bytes)
}
