//! Prelude module for `obd_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use obd_internal::prelude::*;
//!
//! let node = Node::new(1).with_child(Node::with_payload(2, [0xFE, 0xFF]));
//! let decoded = Node::decode(&node.encode().unwrap()).unwrap();
//! assert_eq!(decoded, node);
//! ```

// Re-export everything from obd_types::prelude
#[doc(inline)]
pub use obd_types::prelude::*;

// Re-export the entire obd_types module for advanced usage
#[doc(inline)]
pub use obd_types;
