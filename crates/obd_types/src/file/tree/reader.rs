//! Cursor-based node tree reader.

use std::io::{self, Cursor, ErrorKind, Read, Seek, SeekFrom};

use log::{debug, trace};

use crate::file::FormatError;

use super::{
	NodeData,
	constants::{ESCAPE, HEADER_SIZE, NODE_END, NODE_START},
};

/// One structural unit of the stream.
///
/// Produced by [`TreeReader::next_token`], the only place that interprets
/// sentinel bytes. Reading a payload and skipping a node both consume tokens,
/// so both agree on where escaped bytes and nested nodes end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
	/// A payload byte (escapes already resolved)
	Data(u8),
	/// A nested node start; its type byte has been consumed
	Start {
		offset: u64,
	},
	/// A node end
	End,
}

/// Reads a node tree from a seekable stream.
///
/// The reader keeps an exclusive cursor: one current node plus the chain of
/// its ancestors. It never buffers more than the payload of the node being
/// visited.
///
/// # Examples
///
/// ```
/// use obd_types::file::tree::TreeReader;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // root(type 1) { child(type 2), child(type 3) }
/// let bytes = [0xFE, 0x01, 0xFE, 0x02, 0xFF, 0xFE, 0x03, 0xFF, 0xFF];
/// let mut reader = TreeReader::from_bytes(&bytes);
///
/// reader.open_root()?;
/// let mut types = vec![reader.open_child()?.node_type()];
/// while let Some(node) = reader.advance_sibling()? {
///     types.push(node.node_type());
/// }
/// assert_eq!(types, [2, 3]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TreeReader<R> {
	inner: R,
	base: u64,
	header: Option<[u8; HEADER_SIZE]>,
	current: Option<u64>,
	parents: Vec<u64>,
}

impl<'a> TreeReader<Cursor<&'a [u8]>> {
	/// Creates a reader over an in-memory node stream without a file header.
	pub fn from_bytes(data: &'a [u8]) -> Self {
		Self::new(Cursor::new(data))
	}
}

impl<R: Read + Seek> TreeReader<R> {
	/// Creates a reader whose root node starts at stream offset 0.
	pub fn new(inner: R) -> Self {
		Self {
			inner,
			base: 0,
			header: None,
			current: None,
			parents: Vec::new(),
		}
	}

	/// Creates a reader that first consumes the 4-byte file header.
	///
	/// # Errors
	///
	/// Returns [`FormatError::Truncated`] if the stream is shorter than the
	/// header.
	pub fn with_header(mut inner: R) -> Result<Self, FormatError> {
		let start = inner.stream_position()?;
		let mut header = [0u8; HEADER_SIZE];
		inner.read_exact(&mut header).map_err(|e| match e.kind() {
			ErrorKind::UnexpectedEof => FormatError::Truncated {
				offset: start,
			},
			_ => FormatError::Io(e),
		})?;

		Ok(Self {
			inner,
			base: start + HEADER_SIZE as u64,
			header: Some(header),
			current: None,
			parents: Vec::new(),
		})
	}

	/// Returns the file header, if the reader was created with one.
	pub fn header(&self) -> Option<[u8; HEADER_SIZE]> {
		self.header
	}

	/// Returns the nesting depth of the current node (root is 0).
	pub fn depth(&self) -> usize {
		self.parents.len()
	}

	/// Returns the stream offset of the current node, if any.
	pub fn current_offset(&self) -> Option<u64> {
		self.current
	}

	/// Consumes the reader and returns the underlying stream.
	pub fn into_inner(self) -> R {
		self.inner
	}

	/// Positions the cursor at the root node and returns its payload.
	///
	/// # Errors
	///
	/// Returns an error if the stream does not begin with `NODE_START`.
	pub fn open_root(&mut self) -> Result<NodeData, FormatError> {
		self.inner.seek(SeekFrom::Start(self.base))?;
		match self.read_byte()? {
			Some(NODE_START) => {}
			Some(actual) => {
				return Err(FormatError::UnexpectedByte {
					offset: self.base,
					expected: NODE_START,
					actual,
				});
			}
			None => {
				return Err(FormatError::Truncated {
					offset: self.base,
				});
			}
		}

		self.parents.clear();
		self.current = Some(self.base);
		self.node_bytes()
	}

	/// Descends into the first child of the current node.
	///
	/// # Errors
	///
	/// Returns [`FormatError::NoChildren`] if the current node has no child.
	pub fn open_child(&mut self) -> Result<NodeData, FormatError> {
		let offset = self.current.ok_or(FormatError::NoCurrentNode)?;
		self.try_open_child()?.ok_or(FormatError::NoChildren {
			offset,
		})
	}

	/// Descends into the first child of the current node, if there is one.
	///
	/// The cursor stays on the current node when it has no children.
	pub fn try_open_child(&mut self) -> Result<Option<NodeData>, FormatError> {
		let offset = self.current.ok_or(FormatError::NoCurrentNode)?;
		self.enter_node(offset)?;
		let Some(child) = self.read_payload(None)? else {
			return Ok(None);
		};

		self.parents.push(offset);
		self.current = Some(child);
		self.node_bytes().map(Some)
	}

	/// Skips the current node and positions the cursor at its next sibling.
	///
	/// Returns `Ok(None)` when the parent's end sentinel follows, or when the
	/// root node is followed by the end of the stream. The cursor stays on the
	/// current node in that case. Parent payload bytes between children are
	/// stepped over.
	pub fn advance_sibling(&mut self) -> Result<Option<NodeData>, FormatError> {
		let offset = self.current.ok_or(FormatError::NoCurrentNode)?;
		self.enter_node(offset)?;
		self.skip_node()?;

		if self.parents.is_empty() {
			return self.next_root();
		}

		let mut skipped = 0usize;
		loop {
			match self.next_token()? {
				Token::Data(_) => skipped += 1,
				Token::Start {
					offset,
				} => {
					if skipped > 0 {
						debug!("skipped {skipped} parent payload bytes before node at offset {offset}");
					}
					trace!("sibling node at offset {offset}");
					self.current = Some(offset);
					return self.node_bytes().map(Some);
				}
				Token::End => {
					if skipped > 0 {
						debug!("skipped {skipped} trailing parent payload bytes");
					}
					return Ok(None);
				}
			}
		}
	}

	/// Whatever follows the root: another root-level node or the end of the
	/// stream.
	fn next_root(&mut self) -> Result<Option<NodeData>, FormatError> {
		let next = self.inner.stream_position()?;
		match self.read_byte()? {
			Some(NODE_START) => {
				trace!("sibling node at offset {next}");
				self.current = Some(next);
				self.node_bytes().map(Some)
			}
			Some(actual) => Err(FormatError::UnexpectedByte {
				offset: next,
				expected: NODE_START,
				actual,
			}),
			None => Ok(None),
		}
	}

	/// Moves the cursor back to the parent of the current node.
	///
	/// Returns false if the current node is the root (or nothing is open).
	pub fn leave(&mut self) -> bool {
		match self.parents.pop() {
			Some(parent) => {
				self.current = Some(parent);
				true
			}
			None => false,
		}
	}

	/// Returns the unescaped payload of the current node.
	pub fn node_bytes(&mut self) -> Result<NodeData, FormatError> {
		let offset = self.current.ok_or(FormatError::NoCurrentNode)?;
		let node_type = self.enter_node(offset)?;
		let mut payload = Vec::new();
		self.read_payload(Some(&mut payload))?;
		Ok(NodeData::new(node_type, offset, payload))
	}

	/// Seeks to the node at `offset`, checks its start sentinel and consumes
	/// its type byte.
	fn enter_node(&mut self, offset: u64) -> Result<u8, FormatError> {
		self.inner.seek(SeekFrom::Start(offset))?;
		let start = self.expect_byte(offset)?;
		if start != NODE_START {
			return Err(FormatError::UnexpectedByte {
				offset,
				expected: NODE_START,
				actual: start,
			});
		}
		self.expect_byte(offset + 1)
	}

	/// Reads payload bytes up to the first child or the node end.
	///
	/// Returns the offset of the first child, if any.
	fn read_payload(&mut self, mut sink: Option<&mut Vec<u8>>) -> Result<Option<u64>, FormatError> {
		loop {
			match self.next_token()? {
				Token::Data(byte) => {
					if let Some(payload) = sink.as_deref_mut() {
						payload.push(byte);
					}
				}
				Token::Start {
					offset,
				} => return Ok(Some(offset)),
				Token::End => return Ok(None),
			}
		}
	}

	/// Consumes the rest of a node whose type byte was just read, including
	/// all of its descendants and its end sentinel.
	fn skip_node(&mut self) -> Result<(), FormatError> {
		let mut depth = 1usize;
		while depth > 0 {
			match self.next_token()? {
				Token::Data(_) => {}
				Token::Start {
					..
				} => depth += 1,
				Token::End => depth -= 1,
			}
		}
		Ok(())
	}

	fn next_token(&mut self) -> Result<Token, FormatError> {
		let offset = self.inner.stream_position()?;
		match self.expect_byte(offset)? {
			ESCAPE => Ok(Token::Data(self.expect_byte(offset + 1)?)),
			NODE_START => {
				self.expect_byte(offset + 1)?;
				Ok(Token::Start {
					offset,
				})
			}
			NODE_END => Ok(Token::End),
			byte => Ok(Token::Data(byte)),
		}
	}

	fn expect_byte(&mut self, offset: u64) -> Result<u8, FormatError> {
		self.read_byte()?.ok_or(FormatError::Truncated {
			offset,
		})
	}

	fn read_byte(&mut self) -> Result<Option<u8>, FormatError> {
		let mut byte = [0u8; 1];
		loop {
			match self.inner.read(&mut byte) {
				Ok(0) => return Ok(None),
				Ok(_) => return Ok(Some(byte[0])),
				Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
				Err(e) => return Err(e.into()),
			}
		}
	}
}
