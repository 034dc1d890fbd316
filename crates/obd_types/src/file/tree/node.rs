//! Owned node trees.

use std::io::{Cursor, Read, Seek, Write};

use crate::file::{FormatError, ReadConfig};

use super::{NodeData, TreeReader, TreeWriter};

/// A fully decoded container node with its children.
///
/// Children are owned exclusively by their parent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Node {
	/// Node type tag
	pub node_type: u8,
	/// Unescaped payload (bytes before the first child)
	pub payload: Vec<u8>,
	/// Child nodes in stream order
	pub children: Vec<Node>,
}

impl Node {
	/// Creates an empty node.
	pub fn new(node_type: u8) -> Self {
		Self {
			node_type,
			payload: Vec::new(),
			children: Vec::new(),
		}
	}

	/// Creates a leaf node with a payload.
	pub fn with_payload(node_type: u8, payload: impl Into<Vec<u8>>) -> Self {
		Self {
			node_type,
			payload: payload.into(),
			children: Vec::new(),
		}
	}

	/// Appends a child and returns `self` for chaining.
	pub fn with_child(mut self, child: Node) -> Self {
		self.children.push(child);
		self
	}

	/// Returns the first child of the given type.
	pub fn find_child(&self, node_type: u8) -> Option<&Node> {
		self.children.iter().find(|child| child.node_type == node_type)
	}

	/// Returns the total number of nodes in this subtree.
	pub fn node_count(&self) -> usize {
		1 + self.children.iter().map(Node::node_count).sum::<usize>()
	}

	/// Decodes a whole tree from a node stream without a file header.
	///
	/// # Errors
	///
	/// Returns the first format error; no partial tree is returned.
	pub fn decode(data: &[u8]) -> Result<Self, FormatError> {
		Self::decode_with_config(data, &ReadConfig::default())
	}

	/// Decodes a whole tree with custom limits.
	pub fn decode_with_config(data: &[u8], config: &ReadConfig) -> Result<Self, FormatError> {
		let mut reader = TreeReader::new(Cursor::new(data));
		Self::read_from(&mut reader, config)
	}

	/// Decodes the tree rooted at the reader's root node.
	pub fn read_from<R: Read + Seek>(
		reader: &mut TreeReader<R>,
		config: &ReadConfig,
	) -> Result<Self, FormatError> {
		let root = reader.open_root()?;
		read_subtree(reader, root, 0, config)
	}

	/// Encodes the tree into a node stream without a file header.
	pub fn encode(&self) -> Result<Vec<u8>, FormatError> {
		let mut writer = TreeWriter::new(Vec::new());
		self.write_to(&mut writer)?;
		writer.finish()
	}

	/// Writes the tree through an existing writer.
	pub fn write_to<W: Write>(&self, writer: &mut TreeWriter<W>) -> Result<(), FormatError> {
		writer.begin_node(self.node_type)?;
		writer.write_bytes(&self.payload, true)?;
		for child in &self.children {
			child.write_to(writer)?;
		}
		writer.end_node()
	}
}

fn read_subtree<R: Read + Seek>(
	reader: &mut TreeReader<R>,
	data: NodeData,
	depth: usize,
	config: &ReadConfig,
) -> Result<Node, FormatError> {
	if depth >= config.max_depth {
		return Err(FormatError::TooDeep {
			max_depth: config.max_depth,
		});
	}

	let mut node = Node::with_payload(data.node_type(), data.into_inner());
	let Some(mut child) = reader.try_open_child()? else {
		return Ok(node);
	};

	loop {
		node.children.push(read_subtree(reader, child, depth + 1, config)?);
		match reader.advance_sibling()? {
			Some(next) => child = next,
			None => break,
		}
	}
	reader.leave();
	Ok(node)
}
