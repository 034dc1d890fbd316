//! Node tree writer.

use std::io::Write;

use crate::file::FormatError;

use super::constants::{ESCAPE, HEADER_SIZE, MAX_PROPERTY_LEN, NODE_END, NODE_START, needs_escape};

/// Writes a node tree to any byte sink.
///
/// Structural bytes (node start, type tag, node end) are written raw. Payload
/// bytes go through the escaper unless the caller opts out.
#[derive(Debug)]
pub struct TreeWriter<W: Write> {
	inner: W,
	open_nodes: usize,
	scratch: Vec<u8>,
}

impl<W: Write> TreeWriter<W> {
	/// Creates a writer.
	pub fn new(inner: W) -> Self {
		Self {
			inner,
			open_nodes: 0,
			scratch: Vec::new(),
		}
	}

	/// Returns the number of nodes begun but not yet ended.
	pub fn open_nodes(&self) -> usize {
		self.open_nodes
	}

	/// Returns a reference to the underlying sink.
	pub fn get_ref(&self) -> &W {
		&self.inner
	}

	/// Writes the 4-byte file header. The header is never escaped.
	pub fn write_header(&mut self, header: &[u8; HEADER_SIZE]) -> Result<(), FormatError> {
		self.inner.write_all(header)?;
		Ok(())
	}

	/// Opens a node of the given type.
	pub fn begin_node(&mut self, node_type: u8) -> Result<(), FormatError> {
		self.inner.write_all(&[NODE_START, node_type])?;
		self.open_nodes += 1;
		Ok(())
	}

	/// Writes payload bytes, escaping sentinel values when `escape` is true.
	pub fn write_bytes(&mut self, data: &[u8], escape: bool) -> Result<(), FormatError> {
		if !escape {
			self.inner.write_all(data)?;
			return Ok(());
		}

		self.scratch.clear();
		self.scratch.reserve(data.len() + data.len() / 8);
		for &byte in data {
			if needs_escape(byte) {
				self.scratch.push(ESCAPE);
			}
			self.scratch.push(byte);
		}
		self.inner.write_all(&self.scratch)?;
		Ok(())
	}

	/// Writes a tagged property: tag, u16 little-endian length, payload.
	///
	/// # Errors
	///
	/// Returns [`FormatError::PropertyTooLarge`] if the payload is longer than
	/// 65535 bytes.
	pub fn write_property(&mut self, tag: u8, data: &[u8]) -> Result<(), FormatError> {
		if data.len() > MAX_PROPERTY_LEN {
			return Err(FormatError::PropertyTooLarge {
				tag,
				len: data.len(),
			});
		}

		let len = (data.len() as u16).to_le_bytes();
		self.write_bytes(&[tag, len[0], len[1]], true)?;
		self.write_bytes(data, true)
	}

	/// Closes the innermost open node.
	///
	/// # Errors
	///
	/// Returns [`FormatError::UnbalancedWrite`] if no node is open.
	pub fn end_node(&mut self) -> Result<(), FormatError> {
		if self.open_nodes == 0 {
			return Err(FormatError::UnbalancedWrite);
		}
		self.inner.write_all(&[NODE_END])?;
		self.open_nodes -= 1;
		Ok(())
	}

	/// Flushes and returns the underlying sink.
	///
	/// # Errors
	///
	/// Returns [`FormatError::UnbalancedWrite`] if nodes are still open.
	pub fn finish(mut self) -> Result<W, FormatError> {
		if self.open_nodes != 0 {
			return Err(FormatError::UnbalancedWrite);
		}
		self.inner.flush()?;
		Ok(self.inner)
	}
}
