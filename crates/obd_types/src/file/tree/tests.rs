//! Unit tests for the node tree codec

use super::constants::*;
use super::*;
use crate::file::{FormatError, ReadConfig, UnknownProperties};

fn sample_tree() -> Node {
	Node::with_payload(0x01, vec![NODE_START, 0x10, NODE_END, 0x20, ESCAPE])
		.with_child(
			Node::with_payload(0x02, vec![0xAA, NODE_END])
				.with_child(Node::with_payload(0x05, vec![ESCAPE, ESCAPE])),
		)
		.with_child(Node::new(0x03))
		.with_child(Node::with_payload(0x04, vec![NODE_START]))
}

#[test]
fn test_roundtrip_with_sentinel_payloads() {
	let tree = sample_tree();
	let bytes = tree.encode().unwrap();
	let decoded = Node::decode(&bytes).unwrap();
	assert_eq!(decoded, tree);
	assert_eq!(decoded.node_count(), 5);
}

#[test]
fn test_escaped_encoding_layout() {
	let bytes = Node::with_payload(0x07, vec![0x01, NODE_START, NODE_END, ESCAPE]).encode().unwrap();
	assert_eq!(
		bytes,
		[NODE_START, 0x07, 0x01, ESCAPE, NODE_START, ESCAPE, NODE_END, ESCAPE, ESCAPE, NODE_END]
	);
}

#[test]
fn test_type_tag_is_never_escaped() {
	let tree = Node::new(NODE_END).with_child(Node::new(NODE_START)).with_child(Node::new(ESCAPE));
	let bytes = tree.encode().unwrap();
	assert_eq!(&bytes[..4], &[NODE_START, NODE_END, NODE_START, NODE_START]);
	assert_eq!(Node::decode(&bytes).unwrap(), tree);
}

#[test]
fn test_advance_sibling_visits_direct_children_only() {
	let bytes = sample_tree().encode().unwrap();
	let mut reader = TreeReader::from_bytes(&bytes);

	let root = reader.open_root().unwrap();
	assert_eq!(root.as_slice(), &[NODE_START, 0x10, NODE_END, 0x20, ESCAPE]);

	let first = reader.open_child().unwrap();
	let mut visited = vec![(first.node_type(), first.into_inner())];
	while let Some(node) = reader.advance_sibling().unwrap() {
		visited.push((node.node_type(), node.into_inner()));
	}

	assert_eq!(
		visited,
		vec![(0x02, vec![0xAA, NODE_END]), (0x03, vec![]), (0x04, vec![NODE_START])]
	);
	// Exhausted: stays on the last child and keeps reporting none
	assert!(reader.advance_sibling().unwrap().is_none());
	assert_eq!(reader.depth(), 1);
}

#[test]
fn test_leave_resumes_parent_siblings() {
	let bytes = sample_tree().encode().unwrap();
	let mut reader = TreeReader::from_bytes(&bytes);
	reader.open_root().unwrap();

	let first = reader.open_child().unwrap();
	assert_eq!(first.node_type(), 0x02);
	let grandchild = reader.open_child().unwrap();
	assert_eq!(grandchild.as_slice(), &[ESCAPE, ESCAPE]);
	assert!(reader.advance_sibling().unwrap().is_none());

	assert!(reader.leave());
	assert_eq!(reader.node_bytes().unwrap().node_type(), 0x02);
	assert_eq!(reader.advance_sibling().unwrap().unwrap().node_type(), 0x03);

	assert!(reader.leave());
	assert!(!reader.leave());
}

#[test]
fn test_root_has_no_sibling() {
	let bytes = Node::new(0x01).encode().unwrap();
	let mut reader = TreeReader::from_bytes(&bytes);
	reader.open_root().unwrap();
	assert!(reader.advance_sibling().unwrap().is_none());
}

#[test]
fn test_open_root_rejects_wrong_leading_byte() {
	let mut reader = TreeReader::from_bytes(&[0x00, NODE_START, 0x01, NODE_END]);
	let err = reader.open_root().unwrap_err();
	assert!(matches!(
		err,
		FormatError::UnexpectedByte {
			offset: 0,
			expected: NODE_START,
			actual: 0x00
		}
	));
}

#[test]
fn test_open_root_on_empty_stream() {
	let mut reader = TreeReader::from_bytes(&[]);
	assert!(matches!(
		reader.open_root(),
		Err(FormatError::Truncated {
			offset: 0
		})
	));
}

#[test]
fn test_open_child_without_children() {
	let bytes = Node::with_payload(0x01, vec![1, 2, 3]).encode().unwrap();
	let mut reader = TreeReader::from_bytes(&bytes);
	reader.open_root().unwrap();
	assert!(matches!(
		reader.open_child(),
		Err(FormatError::NoChildren {
			offset: 0
		})
	));
	assert!(reader.try_open_child().unwrap().is_none());
	assert_eq!(reader.depth(), 0);
}

#[test]
fn test_operations_before_open_root() {
	let mut reader = TreeReader::from_bytes(&[NODE_START, 0x01, NODE_END]);
	assert!(matches!(reader.node_bytes(), Err(FormatError::NoCurrentNode)));
	assert!(matches!(reader.advance_sibling(), Err(FormatError::NoCurrentNode)));
}

#[test]
fn test_truncated_streams_are_rejected() {
	let bytes = sample_tree().encode().unwrap();
	for len in 1..bytes.len() {
		assert!(Node::decode(&bytes[..len]).is_err(), "prefix of {len} bytes decoded");
	}
}

#[test]
fn test_dangling_escape_is_truncated() {
	let err = Node::decode(&[NODE_START, 0x01, 0x05, ESCAPE]).unwrap_err();
	assert!(matches!(err, FormatError::Truncated { .. }));
}

#[test]
fn test_parent_payload_after_children() {
	// root { 0x41, child, 0x42 }
	let bytes = [NODE_START, 0x01, 0x41, NODE_START, 0x02, NODE_END, 0x42, NODE_END];
	let mut reader = TreeReader::from_bytes(&bytes);
	assert_eq!(reader.open_root().unwrap().as_slice(), &[0x41]);
	reader.open_child().unwrap();
	assert!(reader.advance_sibling().unwrap().is_none());

	let tree = Node::decode(&bytes).unwrap();
	assert_eq!(tree, Node::with_payload(0x01, vec![0x41]).with_child(Node::new(0x02)));
}

#[test]
fn test_parent_payload_between_children() {
	// root { child, 0x42 0xFD 0xFE, child }
	let bytes = [
		NODE_START, 0x01, NODE_START, 0x02, NODE_END, 0x42, ESCAPE, NODE_START, NODE_START, 0x03, NODE_END, NODE_END,
	];
	let mut reader = TreeReader::from_bytes(&bytes);
	reader.open_root().unwrap();
	reader.open_child().unwrap();
	let second = reader.advance_sibling().unwrap().unwrap();
	assert_eq!((second.node_type(), second.offset()), (0x03, 8));
	assert!(reader.advance_sibling().unwrap().is_none());
}

#[test]
fn test_garbage_after_root() {
	let bytes = [NODE_START, 0x01, NODE_END, 0x42];
	let mut reader = TreeReader::from_bytes(&bytes);
	reader.open_root().unwrap();
	assert!(matches!(
		reader.advance_sibling(),
		Err(FormatError::UnexpectedByte {
			offset: 3,
			actual: 0x42,
			..
		})
	));
}

#[test]
fn test_skip_counts_escaped_sentinels_as_data() {
	// First child payload contains escaped start/end bytes; skipping it must
	// land exactly on the second child.
	let tree = Node::new(0x01)
		.with_child(Node::with_payload(0x02, vec![NODE_END, NODE_END, NODE_START]))
		.with_child(Node::with_payload(0x03, vec![0x33]));
	let bytes = tree.encode().unwrap();

	let mut reader = TreeReader::from_bytes(&bytes);
	reader.open_root().unwrap();
	reader.open_child().unwrap();
	let second = reader.advance_sibling().unwrap().unwrap();
	assert_eq!(second.node_type(), 0x03);
	assert_eq!(second.as_slice(), &[0x33]);
}

#[test]
fn test_with_header() {
	let mut bytes = vec![0x4F, 0x42, 0x44, 0x01];
	bytes.extend(Node::new(0x09).encode().unwrap());

	let mut reader = TreeReader::with_header(std::io::Cursor::new(bytes)).unwrap();
	assert_eq!(reader.header(), Some([0x4F, 0x42, 0x44, 0x01]));
	assert_eq!(reader.open_root().unwrap().node_type(), 0x09);

	assert!(matches!(
		TreeReader::with_header(std::io::Cursor::new(vec![0x00, 0x01])),
		Err(FormatError::Truncated {
			offset: 0
		})
	));
}

#[test]
fn test_write_property_escapes_length() {
	let payload = vec![0x11; 0xFE];
	let mut writer = TreeWriter::new(Vec::new());
	writer.begin_node(0x01).unwrap();
	writer.write_property(0x20, &payload).unwrap();
	writer.end_node().unwrap();
	let bytes = writer.finish().unwrap();

	assert_eq!(&bytes[2..6], &[0x20, ESCAPE, 0xFE, 0x00]);

	let mut reader = TreeReader::from_bytes(&bytes);
	let root = reader.open_root().unwrap();
	let properties: Vec<_> = root.properties().collect::<Result<_, _>>().unwrap();
	assert_eq!(properties.len(), 1);
	assert_eq!(properties[0].tag, 0x20);
	assert_eq!(properties[0].data, payload.as_slice());
}

#[test]
fn test_write_property_too_large() {
	let mut writer = TreeWriter::new(Vec::new());
	writer.begin_node(0x01).unwrap();
	let err = writer.write_property(0x20, &vec![0u8; MAX_PROPERTY_LEN + 1]).unwrap_err();
	assert!(matches!(
		err,
		FormatError::PropertyTooLarge {
			tag: 0x20,
			..
		}
	));
}

#[test]
fn test_unescaped_write_bytes() {
	let mut writer = TreeWriter::new(Vec::new());
	writer.write_bytes(&[NODE_START, ESCAPE], false).unwrap();
	assert_eq!(writer.get_ref(), &vec![NODE_START, ESCAPE]);
}

#[test]
fn test_unbalanced_writes() {
	let mut writer = TreeWriter::new(Vec::new());
	assert!(matches!(writer.end_node(), Err(FormatError::UnbalancedWrite)));

	writer.begin_node(0x01).unwrap();
	assert_eq!(writer.open_nodes(), 1);
	assert!(matches!(writer.finish(), Err(FormatError::UnbalancedWrite)));
}

#[test]
fn test_property_iter_truncated() {
	let data = NodeData::new(0x01, 0, vec![0x10, 0x04, 0x00, 0xAA]);
	let mut iter = data.properties();
	assert!(matches!(
		iter.next(),
		Some(Err(FormatError::TruncatedProperty {
			tag: 0x10,
			declared: 4,
			available: 1
		}))
	));
	assert!(iter.next().is_none());
}

#[test]
fn test_node_data_scalars() {
	let mut data = NodeData::new(0x01, 0, vec![0x01, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0xFF]);
	assert_eq!(data.read_u8().unwrap(), 0x01);
	assert_eq!(data.read_u16().unwrap(), 0x1234);
	assert_eq!(data.read_u32().unwrap(), 0x1234_5678);
	assert_eq!(data.read_i8().unwrap(), -1);
	assert_eq!(data.remaining(), 0);
	assert!(matches!(data.read_u8(), Err(FormatError::PayloadTooShort { .. })));

	data.set_position(1);
	assert_eq!(data.read_bytes(2).unwrap(), &[0x34, 0x12]);
}

#[test]
fn test_max_depth() {
	let mut tree = Node::new(0x00);
	for depth in 1..10u8 {
		tree = Node::new(depth).with_child(tree);
	}
	let bytes = tree.encode().unwrap();

	assert!(Node::decode(&bytes).is_ok());
	let config = ReadConfig::new(5, UnknownProperties::Preserve);
	assert!(matches!(
		Node::decode_with_config(&bytes, &config),
		Err(FormatError::TooDeep {
			max_depth: 5
		})
	));
}
