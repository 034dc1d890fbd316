//! Object definitions.

use serde::{Deserialize, Serialize};

use crate::file::ValidationError;

use super::{FrameGroup, FrameGroupType, GroupMap, ObjectCategory, SpriteData, SpriteSource};

/// An object property the decoder did not recognize, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawProperty {
	/// Property tag
	pub tag: u8,
	/// Unescaped payload
	pub data: Vec<u8>,
}

/// One game object: an item, outfit, effect or missile.
///
/// Holds up to one frame group per [`FrameGroupType`] and a parallel sprite
/// group with the resolved tiles of each frame group. Sprite tiles are
/// values, so cloning an object never aliases another object's tiles.
///
/// # Examples
///
/// ```
/// use obd_types::file::obd::{FrameGroup, FrameGroupType, ObjectCategory, ObjectDefinition};
///
/// let object = ObjectDefinition::new(100, ObjectCategory::Outfit)
///     .with_group(FrameGroupType::Default, FrameGroup::new(1, 1, 2, 4, 1, 1, 1))
///     .with_group(FrameGroupType::Walking, FrameGroup::new(1, 1, 2, 4, 1, 1, 8));
/// assert!(object.validate().is_ok());
/// assert_eq!(object.frame_groups.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDefinition {
	/// Object ID
	pub id: u32,
	/// Category
	pub category: ObjectCategory,
	/// Frame groups by type
	pub frame_groups: GroupMap<FrameGroup>,
	/// Resolved sprite tiles by group type, in sprite table order
	pub sprites: GroupMap<Vec<SpriteData>>,
	/// Unrecognized properties, written back on encode
	pub properties: Vec<RawProperty>,
}

impl ObjectDefinition {
	/// Creates an object without frame groups.
	pub fn new(id: u32, category: ObjectCategory) -> Self {
		Self {
			id,
			category,
			frame_groups: GroupMap::new(),
			sprites: GroupMap::new(),
			properties: Vec::new(),
		}
	}

	/// Sets a frame group and returns `self` for chaining.
	pub fn with_group(mut self, group_type: FrameGroupType, group: FrameGroup) -> Self {
		self.frame_groups.insert(group_type, group);
		self
	}

	/// Returns the frame group of the given type.
	pub fn frame_group(&self, group_type: FrameGroupType) -> Option<&FrameGroup> {
		self.frame_groups.get(group_type)
	}

	/// Returns the resolved tiles of a declared frame group.
	///
	/// # Errors
	///
	/// Returns [`ValidationError::MissingSpriteGroup`] if the group is declared
	/// but its tiles were never resolved or attached, and
	/// [`ValidationError::MissingFrameGroup`] if the group is not declared.
	pub fn sprite_group(&self, group_type: FrameGroupType) -> Result<&[SpriteData], ValidationError> {
		if !self.frame_groups.contains(group_type) {
			return Err(ValidationError::MissingFrameGroup(group_type));
		}
		self.sprites
			.get(group_type)
			.map(Vec::as_slice)
			.ok_or(ValidationError::MissingSpriteGroup(group_type))
	}

	/// Replaces the tiles of a frame group and rewrites its sprite table from
	/// the tile IDs.
	///
	/// # Errors
	///
	/// Fails if the group is not declared or the tile count does not match
	/// the group's extents.
	pub fn attach_sprites(
		&mut self,
		group_type: FrameGroupType,
		sprites: Vec<SpriteData>,
	) -> Result<(), ValidationError> {
		let group = self
			.frame_groups
			.get_mut(group_type)
			.ok_or(ValidationError::MissingFrameGroup(group_type))?;
		let expected = group.sprite_count();
		if sprites.len() != expected {
			return Err(ValidationError::SpriteTableLength {
				expected,
				actual: sprites.len(),
			});
		}
		group.sprite_ids = sprites.iter().map(|sprite| sprite.id).collect();
		self.sprites.insert(group_type, sprites);
		Ok(())
	}

	/// Looks up every sprite ID of every frame group in `source`.
	///
	/// Sprite 0 resolves to a blank tile without a lookup.
	///
	/// # Errors
	///
	/// Returns [`ValidationError::UnresolvedSprite`] for the first ID the
	/// source does not know. No sprite group is changed in that case.
	pub fn resolve_sprites<S: SpriteSource + ?Sized>(&mut self, source: &S) -> Result<(), ValidationError> {
		let mut resolved = GroupMap::new();
		for (group_type, group) in self.frame_groups.iter() {
			resolved.insert(group_type, resolve_table(&group.sprite_ids, source)?);
		}
		self.sprites = resolved;
		Ok(())
	}

	/// Checks every frame group and the category rules.
	///
	/// Only outfits may have a walking group. Sprite groups that are present
	/// must match their frame group's sprite table.
	pub fn validate(&self) -> Result<(), ValidationError> {
		for (group_type, group) in self.frame_groups.iter() {
			if group_type == FrameGroupType::Walking && self.category != ObjectCategory::Outfit {
				return Err(ValidationError::GroupNotAllowed {
					category: self.category,
					group: group_type,
				});
			}
			group.validate()?;

			if let Some(sprites) = self.sprites.get(group_type)
				&& sprites.len() != group.sprite_ids.len()
			{
				return Err(ValidationError::SpriteTableLength {
					expected: group.sprite_ids.len(),
					actual: sprites.len(),
				});
			}
		}

		for (group_type, _) in self.sprites.iter() {
			if !self.frame_groups.contains(group_type) {
				return Err(ValidationError::MissingFrameGroup(group_type));
			}
		}
		Ok(())
	}
}

pub(super) fn resolve_table<S: SpriteSource + ?Sized>(
	ids: &[u32],
	source: &S,
) -> Result<Vec<SpriteData>, ValidationError> {
	ids.iter()
		.map(|&id| match id {
			0 => Ok(SpriteData::blank(0)),
			_ => source.sprite(id).cloned().ok_or(ValidationError::UnresolvedSprite(id)),
		})
		.collect()
}
