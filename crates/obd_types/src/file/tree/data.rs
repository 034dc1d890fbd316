//! Unescaped node payloads.

use std::io::{self, Cursor, Read, Seek, SeekFrom};

use crate::file::FormatError;

use super::constants::PROPERTY_HEADER_SIZE;

/// The unescaped payload of one node, with a random access cursor.
///
/// Built once per node visit. The payload covers the bytes between the node's
/// type tag and its first child (or its end sentinel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
	node_type: u8,
	offset: u64,
	data: Cursor<Vec<u8>>,
}

impl NodeData {
	/// Wraps an unescaped payload.
	///
	/// # Arguments
	///
	/// * `node_type` - Node type tag
	/// * `offset` - Stream offset of the node's start sentinel
	/// * `payload` - Unescaped payload bytes
	pub fn new(node_type: u8, offset: u64, payload: Vec<u8>) -> Self {
		Self {
			node_type,
			offset,
			data: Cursor::new(payload),
		}
	}

	/// Returns the node type tag.
	pub fn node_type(&self) -> u8 {
		self.node_type
	}

	/// Returns the stream offset of the node's start sentinel.
	pub fn offset(&self) -> u64 {
		self.offset
	}

	/// Returns the payload length in bytes.
	pub fn len(&self) -> usize {
		self.data.get_ref().len()
	}

	/// Returns true if the payload is empty.
	pub fn is_empty(&self) -> bool {
		self.data.get_ref().is_empty()
	}

	/// Returns the read position inside the payload.
	pub fn position(&self) -> usize {
		self.data.position() as usize
	}

	/// Moves the read position. Positions past the end are allowed; reads from
	/// there fail.
	pub fn set_position(&mut self, position: usize) {
		self.data.set_position(position as u64);
	}

	/// Returns the number of unread bytes.
	pub fn remaining(&self) -> usize {
		self.len().saturating_sub(self.position())
	}

	/// Returns the whole payload.
	pub fn as_slice(&self) -> &[u8] {
		self.data.get_ref()
	}

	/// Consumes the cursor and returns the payload.
	pub fn into_inner(self) -> Vec<u8> {
		self.data.into_inner()
	}

	/// Reads `len` bytes at the current position.
	pub fn read_bytes(&mut self, len: usize) -> Result<&[u8], FormatError> {
		let position = self.position();
		if len > self.remaining() {
			return Err(FormatError::PayloadTooShort {
				needed: len,
				position,
				len: self.len(),
			});
		}
		self.data.set_position((position + len) as u64);
		Ok(&self.data.get_ref()[position..position + len])
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
		let mut bytes = [0u8; N];
		bytes.copy_from_slice(self.read_bytes(N)?);
		Ok(bytes)
	}

	/// Reads a u8.
	pub fn read_u8(&mut self) -> Result<u8, FormatError> {
		Ok(self.read_array::<1>()?[0])
	}

	/// Reads an i8.
	pub fn read_i8(&mut self) -> Result<i8, FormatError> {
		Ok(i8::from_le_bytes(self.read_array()?))
	}

	/// Reads a little-endian u16.
	pub fn read_u16(&mut self) -> Result<u16, FormatError> {
		Ok(u16::from_le_bytes(self.read_array()?))
	}

	/// Reads a little-endian u32.
	pub fn read_u32(&mut self) -> Result<u32, FormatError> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Reads a little-endian i32.
	pub fn read_i32(&mut self) -> Result<i32, FormatError> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	/// Iterates over the tagged properties of the whole payload.
	pub fn properties(&self) -> PropertyIter<'_> {
		PropertyIter::new(self.as_slice())
	}
}

impl Read for NodeData {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		self.data.read(buf)
	}
}

impl Seek for NodeData {
	fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
		self.data.seek(pos)
	}
}

/// A tagged property borrowed from a node payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property<'a> {
	/// Property tag
	pub tag: u8,
	/// Property payload
	pub data: &'a [u8],
}

impl Property<'_> {
	/// Reads a u8 payload.
	pub fn as_u8(&self) -> Option<u8> {
		match self.data {
			[value] => Some(*value),
			_ => None,
		}
	}

	/// Reads a little-endian u32 payload.
	pub fn as_u32(&self) -> Option<u32> {
		let bytes: [u8; 4] = self.data.try_into().ok()?;
		Some(u32::from_le_bytes(bytes))
	}
}

/// Iterator over the tagged properties of a payload.
///
/// Yields one error and then stops when a property runs past the payload.
#[derive(Debug, Clone)]
pub struct PropertyIter<'a> {
	data: &'a [u8],
	position: usize,
	failed: bool,
}

impl<'a> PropertyIter<'a> {
	/// Creates an iterator over `data`.
	pub fn new(data: &'a [u8]) -> Self {
		Self {
			data,
			position: 0,
			failed: false,
		}
	}
}

impl<'a> Iterator for PropertyIter<'a> {
	type Item = Result<Property<'a>, FormatError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed || self.position >= self.data.len() {
			return None;
		}

		let rest = &self.data[self.position..];
		if rest.len() < PROPERTY_HEADER_SIZE {
			self.failed = true;
			return Some(Err(FormatError::PayloadTooShort {
				needed: PROPERTY_HEADER_SIZE,
				position: self.position,
				len: self.data.len(),
			}));
		}

		let tag = rest[0];
		let declared = u16::from_le_bytes([rest[1], rest[2]]) as usize;
		let available = rest.len() - PROPERTY_HEADER_SIZE;
		if declared > available {
			self.failed = true;
			return Some(Err(FormatError::TruncatedProperty {
				tag,
				declared,
				available,
			}));
		}

		let start = PROPERTY_HEADER_SIZE;
		self.position += PROPERTY_HEADER_SIZE + declared;
		Some(Ok(Property {
			tag,
			data: &rest[start..start + declared],
		}))
	}
}
