//! Escaped node-tree container support.
//!
//! Every asset file in this project is a tree of nodes serialized into a flat
//! byte stream. Nodes carry no length field; their extent is given by
//! sentinel bytes instead.
//!
//! # Stream Layout
//!
//! ```text
//! Offset  Size  Field     Description
//! ------  ----  --------  ------------------------------------------
//! 0x00    4     header    Opaque file header (signature), not escaped
//! 0x04    ...   root      A single root node
//! ```
//!
//! ## Node Layout
//!
//! ```text
//! 0xFE  type  payload...  child*  0xFF
//! ```
//!
//! - `0xFE` (`NODE_START`) opens a node. The byte that follows is the node type
//!   and is always taken verbatim.
//! - The payload runs until the first child's `0xFE` or the node's own `0xFF`.
//!   Bytes between or after children are not part of the payload; readers
//!   step over them.
//! - `0xFF` (`NODE_END`) closes the node.
//! - `0xFD` (`ESCAPE`) makes the following byte literal. Payload bytes equal to
//!   any of the three sentinels are written as `0xFD <byte>`.
//!
//! ## Properties
//!
//! Payloads are made of tagged properties:
//!
//! ```text
//! Offset  Size  Field   Description
//! ------  ----  ------  ------------------------------------------
//! +0x00   1     tag     Property tag
//! +0x01   2     length  Payload length (u16, little-endian)
//! +0x03   n     data    Property payload
//! ```
//!
//! Tag, length and data are all subject to escaping.
//!
//! # Examples
//!
//! ```
//! use obd_types::file::tree::{Node, TreeReader, TreeWriter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut writer = TreeWriter::new(Vec::new());
//! writer.begin_node(0x01)?;
//! writer.write_property(0x10, &[0xFE, 0xFF, 0xFD])?;
//! writer.begin_node(0x02)?;
//! writer.end_node()?;
//! writer.end_node()?;
//! let bytes = writer.finish()?;
//!
//! let mut reader = TreeReader::from_bytes(&bytes);
//! let root = reader.open_root()?;
//! assert_eq!(root.node_type(), 0x01);
//! let child = reader.open_child()?;
//! assert_eq!(child.node_type(), 0x02);
//! assert!(reader.advance_sibling()?.is_none());
//!
//! let tree = Node::decode(&bytes)?;
//! assert_eq!(tree.children.len(), 1);
//! # Ok(())
//! # }
//! ```

mod data;
mod node;
mod reader;
mod writer;

#[cfg(test)]
mod tests;

pub use data::{NodeData, Property, PropertyIter};
pub use node::Node;
pub use reader::TreeReader;
pub use writer::TreeWriter;

/// Node tree constants.
pub mod constants {
	/// Opens a node
	pub const NODE_START: u8 = 0xFE;

	/// Closes a node
	pub const NODE_END: u8 = 0xFF;

	/// Makes the following byte literal
	pub const ESCAPE: u8 = 0xFD;

	/// Size of the opaque file header preceding the root node
	pub const HEADER_SIZE: usize = 4;

	/// Size of a property prefix (tag + u16 length)
	pub const PROPERTY_HEADER_SIZE: usize = 3;

	/// Largest payload a single property can carry
	pub const MAX_PROPERTY_LEN: usize = u16::MAX as usize;

	/// Returns true if `byte` must be escaped inside a payload.
	#[inline]
	pub const fn needs_escape(byte: u8) -> bool {
		matches!(byte, NODE_START | NODE_END | ESCAPE)
	}
}
