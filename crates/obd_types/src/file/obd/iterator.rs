//! Streaming object iteration.

use std::io::{Read, Seek};

use log::{debug, warn};

use crate::file::tree::{NodeData, TreeReader};
use crate::file::{FormatError, ObdError, ReadConfig};

use super::decoder::{DecodeContext, read_object};
use super::{FormatVersion, ObjectDefinition, Passthrough, SpriteCodec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
	/// Root opened, no object visited yet
	Start,
	/// Cursor on the last object returned
	Reading,
	/// Last object visited or a format error occurred
	Done,
}

/// Reads objects one at a time from a container stream.
///
/// Yields one `Result` per object node. An object that fails validation is
/// reported and the iterator moves on to the next object; a format error is
/// reported once and ends the iteration, since the stream position can no
/// longer be trusted.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
///
/// use obd_types::file::obd::{File, FormatVersion, ObjectCategory, ObjectDefinition, ObjectReader};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut file = File::new(FormatVersion::V2);
/// file.objects.push(ObjectDefinition::new(100, ObjectCategory::Item));
/// file.objects.push(ObjectDefinition::new(101, ObjectCategory::Effect));
/// let bytes = file.to_bytes()?;
///
/// let reader = ObjectReader::new(Cursor::new(bytes))?;
/// let ids: Vec<u32> = reader.filter_map(Result::ok).map(|object| object.id).collect();
/// assert_eq!(ids, [100, 101]);
/// # Ok(())
/// # }
/// ```
pub struct ObjectReader<'c, R> {
	reader: TreeReader<R>,
	signature: u32,
	ctx: DecodeContext<'c>,
	state: State,
}

impl<R: Read + Seek> ObjectReader<'static, R> {
	/// Opens a container stream with the default configuration and the
	/// [`Passthrough`] codec.
	pub fn new(inner: R) -> Result<Self, ObdError> {
		Self::with_config(inner, ReadConfig::default(), &Passthrough)
	}
}

impl<'c, R: Read + Seek> ObjectReader<'c, R> {
	/// Opens a container stream.
	///
	/// Reads the header and the root node. Objects are decoded lazily.
	///
	/// # Errors
	///
	/// Fails on a malformed header or root node, or an unknown version.
	pub fn with_config(inner: R, config: ReadConfig, codec: &'c dyn SpriteCodec) -> Result<Self, ObdError> {
		let mut reader = TreeReader::with_header(inner)?;
		let signature = reader.header().map(u32::from_le_bytes).unwrap_or_default();
		let root = reader.open_root()?;
		let version = FormatVersion::from_u8(root.node_type())?;
		debug!("container signature 0x{signature:08X}, version {version}");

		Ok(Self {
			reader,
			signature,
			ctx: DecodeContext {
				version,
				config,
				codec,
			},
			state: State::Start,
		})
	}

	/// Returns the file signature.
	pub fn signature(&self) -> u32 {
		self.signature
	}

	/// Returns the container format version.
	pub fn version(&self) -> FormatVersion {
		self.ctx.version
	}

	fn read_next(
		&mut self,
		step: Result<Option<NodeData>, FormatError>,
	) -> Option<Result<ObjectDefinition, ObdError>> {
		let node = match step {
			Ok(Some(node)) => node,
			Ok(None) => {
				self.state = State::Done;
				return None;
			}
			Err(e) => {
				self.state = State::Done;
				return Some(Err(e.into()));
			}
		};

		self.state = State::Reading;
		let offset = node.offset();
		let result = read_object(&mut self.reader, node, &self.ctx);
		match &result {
			Err(e) if e.is_format() => self.state = State::Done,
			Err(e) => {
				warn!("object at offset {offset} rejected: {e}");
				while self.reader.depth() > 1 {
					self.reader.leave();
				}
			}
			Ok(_) => {}
		}
		Some(result)
	}
}

impl<R: Read + Seek> Iterator for ObjectReader<'_, R> {
	type Item = Result<ObjectDefinition, ObdError>;

	fn next(&mut self) -> Option<Self::Item> {
		let step = match self.state {
			State::Done => return None,
			State::Start => self.reader.try_open_child(),
			State::Reading => self.reader.advance_sibling(),
		};
		self.read_next(step)
	}
}
