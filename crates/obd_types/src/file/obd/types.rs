//! Small enums and the group-keyed map shared by the object model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::file::ValidationError;

use super::FrameDuration;

/// Object category, stored as the object node's type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ObjectCategory {
	/// Ground tiles, containers, equipment and other map items
	Item = 1,
	/// Creature and player outfits
	Outfit = 2,
	/// Magic effects
	Effect = 3,
	/// Projectiles
	Missile = 4,
}

impl ObjectCategory {
	/// All categories in tag order.
	pub const ALL: [Self; 4] = [Self::Item, Self::Outfit, Self::Effect, Self::Missile];

	/// Converts a tag byte to a category.
	pub fn from_u8(value: u8) -> Result<Self, ValidationError> {
		match value {
			1 => Ok(Self::Item),
			2 => Ok(Self::Outfit),
			3 => Ok(Self::Effect),
			4 => Ok(Self::Missile),
			_ => Err(ValidationError::UnknownCategory(value)),
		}
	}

	/// Converts the category to its tag byte.
	pub fn to_u8(self) -> u8 {
		self as u8
	}

	/// Nominal per-frame duration for freshly created animations of this
	/// category, in milliseconds.
	///
	/// [`FrameDuration::for_category`] does not apply these values; see its
	/// documentation.
	pub fn nominal_frame_duration(self) -> FrameDuration {
		match self {
			Self::Item => FrameDuration::fixed(500),
			Self::Outfit => FrameDuration::fixed(300),
			Self::Effect | Self::Missile => FrameDuration::fixed(100),
		}
	}
}

impl fmt::Display for ObjectCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Item => write!(f, "Item"),
			Self::Outfit => write!(f, "Outfit"),
			Self::Effect => write!(f, "Effect"),
			Self::Missile => write!(f, "Missile"),
		}
	}
}

/// Frame group type, stored as the frame group node's type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum FrameGroupType {
	/// Idle pose (every object has one)
	Default = 0,
	/// Walking cycle (outfits only)
	Walking = 1,
}

impl FrameGroupType {
	/// Both group types in slot order.
	pub const ALL: [Self; 2] = [Self::Default, Self::Walking];

	/// Converts a tag byte to a group type.
	pub fn from_u8(value: u8) -> Result<Self, ValidationError> {
		match value {
			0 => Ok(Self::Default),
			1 => Ok(Self::Walking),
			_ => Err(ValidationError::UnknownGroupType(value)),
		}
	}

	/// Converts the group type to its tag byte.
	pub fn to_u8(self) -> u8 {
		self as u8
	}

	#[inline]
	const fn slot(self) -> usize {
		self as usize
	}
}

impl fmt::Display for FrameGroupType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Default => write!(f, "Default"),
			Self::Walking => write!(f, "Walking"),
		}
	}
}

/// Animation timing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum AnimationMode {
	/// Each instance runs from its own start time
	#[default]
	Asynchronous = 0,
	/// All instances are phase-locked to the clock
	Synchronous = 1,
}

impl AnimationMode {
	/// Converts a byte to an animation mode.
	pub fn from_u8(value: u8) -> Result<Self, ValidationError> {
		match value {
			0 => Ok(Self::Asynchronous),
			1 => Ok(Self::Synchronous),
			_ => Err(ValidationError::UnknownAnimationMode(value)),
		}
	}

	/// Converts the mode to a byte.
	pub fn to_u8(self) -> u8 {
		self as u8
	}
}

/// Start frame selector of an asynchronous animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StartFrame {
	/// Uniformly random frame per instance
	#[default]
	Random,
	/// Always start at this frame
	Fixed(u8),
}

impl StartFrame {
	/// Decodes the stored value: negative means random.
	pub fn from_i32(value: i32) -> Self {
		match u8::try_from(value) {
			Ok(frame) => Self::Fixed(frame),
			Err(_) if value < 0 => Self::Random,
			Err(_) => Self::Fixed(u8::MAX),
		}
	}

	/// Encodes the selector: random is `-1`.
	pub fn to_i32(self) -> i32 {
		match self {
			Self::Random => -1,
			Self::Fixed(frame) => i32::from(frame),
		}
	}
}

/// Fixed two-slot map keyed by [`FrameGroupType`].
///
/// # Examples
///
/// ```
/// use obd_types::file::obd::{FrameGroupType, GroupMap};
///
/// let mut map = GroupMap::new();
/// map.insert(FrameGroupType::Walking, "walk");
/// assert_eq!(map.get(FrameGroupType::Walking), Some(&"walk"));
/// assert_eq!(map.get(FrameGroupType::Default), None);
/// assert_eq!(map.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMap<T> {
	slots: [Option<T>; 2],
}

impl<T> GroupMap<T> {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self {
			slots: [None, None],
		}
	}

	/// Returns the value stored for `group`.
	pub fn get(&self, group: FrameGroupType) -> Option<&T> {
		self.slots[group.slot()].as_ref()
	}

	/// Returns the value stored for `group` mutably.
	pub fn get_mut(&mut self, group: FrameGroupType) -> Option<&mut T> {
		self.slots[group.slot()].as_mut()
	}

	/// Stores a value, returning the previous one.
	pub fn insert(&mut self, group: FrameGroupType, value: T) -> Option<T> {
		self.slots[group.slot()].replace(value)
	}

	/// Removes and returns the value stored for `group`.
	pub fn remove(&mut self, group: FrameGroupType) -> Option<T> {
		self.slots[group.slot()].take()
	}

	/// Returns true if a value is stored for `group`.
	pub fn contains(&self, group: FrameGroupType) -> bool {
		self.slots[group.slot()].is_some()
	}

	/// Returns the number of occupied slots.
	pub fn len(&self) -> usize {
		self.slots.iter().filter(|slot| slot.is_some()).count()
	}

	/// Returns true if no slot is occupied.
	pub fn is_empty(&self) -> bool {
		self.slots.iter().all(Option::is_none)
	}

	/// Iterates over occupied slots in group order.
	pub fn iter(&self) -> impl Iterator<Item = (FrameGroupType, &T)> {
		FrameGroupType::ALL.into_iter().filter_map(|group| self.get(group).map(|value| (group, value)))
	}
}

impl<T> Default for GroupMap<T> {
	fn default() -> Self {
		Self::new()
	}
}
