//! The object-data container file.

use std::fmt;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::file::tree::TreeWriter;
use crate::file::{ObdError, ReadConfig, ValidationError};

use super::constants::DEFAULT_SIGNATURE;
use super::encoder::write_object;
use super::{FrameGroupType, ObjectCategory, ObjectDefinition, ObjectReader, Passthrough, SpriteCodec};

/// Container format version, stored as the root node's type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum FormatVersion {
	/// Default group only, sprites referenced by ID
	V1 = 1,
	/// Default and walking groups, sprites referenced by ID
	V2 = 2,
	/// Default and walking groups with inline sprite payloads
	#[default]
	V3 = 3,
}

impl FormatVersion {
	/// Converts a root node type to a version.
	pub fn from_u8(value: u8) -> Result<Self, ValidationError> {
		match value {
			1 => Ok(Self::V1),
			2 => Ok(Self::V2),
			3 => Ok(Self::V3),
			_ => Err(ValidationError::UnknownVersion(value)),
		}
	}

	/// Converts the version to its root node type.
	pub fn to_u8(self) -> u8 {
		self as u8
	}

	/// Returns true if this version can store frame groups of `group` type.
	pub fn supports(self, group: FrameGroupType) -> bool {
		group == FrameGroupType::Default || self >= Self::V2
	}

	/// Returns true if sprite payloads are stored inside the container.
	pub fn has_inline_sprites(self) -> bool {
		self == Self::V3
	}
}

impl fmt::Display for FormatVersion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.to_u8())
	}
}

/// An object-data container: a signature, a format version and a list of
/// object definitions.
///
/// # Examples
///
/// ```
/// use obd_types::file::obd::{File, FormatVersion, FrameGroup, FrameGroupType, ObjectCategory, ObjectDefinition};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut file = File::new(FormatVersion::V2);
/// file.objects.push(
///     ObjectDefinition::new(100, ObjectCategory::Item)
///         .with_group(FrameGroupType::Default, FrameGroup::new(1, 1, 1, 1, 1, 1, 1)),
/// );
///
/// let bytes = file.to_bytes()?;
/// let decoded = File::from_bytes(&bytes)?;
/// assert_eq!(decoded, file);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
	/// Opaque file signature (first 4 header bytes, little-endian)
	pub signature: u32,
	/// Format version
	pub version: FormatVersion,
	/// Objects in file order
	pub objects: Vec<ObjectDefinition>,
}

impl File {
	/// Creates an empty container with the default signature.
	pub fn new(version: FormatVersion) -> Self {
		Self {
			signature: DEFAULT_SIGNATURE,
			version,
			objects: Vec::new(),
		}
	}

	/// Opens a container file.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, ObdError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Decodes a container with the default configuration and the
	/// [`Passthrough`] codec.
	pub fn from_bytes(data: &[u8]) -> Result<Self, ObdError> {
		Self::from_bytes_with(data, ReadConfig::default(), &Passthrough)
	}

	/// Decodes a container.
	///
	/// # Arguments
	/// * `data` - Header and node stream
	/// * `config` - Read limits and unknown property policy
	/// * `codec` - Codec for inline sprite payloads
	///
	/// # Errors
	///
	/// Returns the first error of any object. Use [`ObjectReader`] to skip
	/// objects that fail validation instead.
	pub fn from_bytes_with(data: &[u8], config: ReadConfig, codec: &dyn SpriteCodec) -> Result<Self, ObdError> {
		Self::from_reader_with(Cursor::new(data), config, codec)
	}

	/// Decodes a container from a seekable stream.
	pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self, ObdError> {
		Self::from_reader_with(reader, ReadConfig::default(), &Passthrough)
	}

	/// Decodes a container from a seekable stream with custom options.
	pub fn from_reader_with<R: Read + Seek>(
		reader: R,
		config: ReadConfig,
		codec: &dyn SpriteCodec,
	) -> Result<Self, ObdError> {
		let reader = ObjectReader::with_config(reader, config, codec)?;
		let signature = reader.signature();
		let version = reader.version();
		let objects = reader.collect::<Result<Vec<_>, _>>()?;
		debug!("decoded {} objects", objects.len());

		Ok(Self {
			signature,
			version,
			objects,
		})
	}

	/// Encodes the container with the [`Passthrough`] codec.
	pub fn to_bytes(&self) -> Result<Vec<u8>, ObdError> {
		self.write_to(Vec::new(), &Passthrough)
	}

	/// Saves the container to a file.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ObdError> {
		let bytes = self.to_bytes()?;
		std::fs::write(path, bytes)?;
		Ok(())
	}

	/// Encodes the container into `writer` and returns it.
	///
	/// # Errors
	///
	/// Fails before writing an object that does not validate or that uses a
	/// frame group this version cannot store. Version 3 needs the sprite
	/// group of every frame group.
	pub fn write_to<W: Write>(&self, writer: W, codec: &dyn SpriteCodec) -> Result<W, ObdError> {
		let mut writer = TreeWriter::new(writer);
		writer.write_header(&self.signature.to_le_bytes())?;
		writer.begin_node(self.version.to_u8())?;
		for object in &self.objects {
			write_object(&mut writer, object, self.version, codec)?;
		}
		writer.end_node()?;
		Ok(writer.finish()?)
	}

	/// Returns the object with the given ID and category.
	pub fn get(&self, category: ObjectCategory, id: u32) -> Option<&ObjectDefinition> {
		self.objects.iter().find(|object| object.category == category && object.id == id)
	}

	/// Iterates over the objects of one category.
	pub fn iter_category(&self, category: ObjectCategory) -> impl Iterator<Item = &ObjectDefinition> {
		self.objects.iter().filter(move |object| object.category == category)
	}

	/// Returns the number of objects.
	pub fn len(&self) -> usize {
		self.objects.len()
	}

	/// Returns true if the container holds no objects.
	pub fn is_empty(&self) -> bool {
		self.objects.is_empty()
	}
}

impl Default for File {
	fn default() -> Self {
		Self::new(FormatVersion::default())
	}
}
