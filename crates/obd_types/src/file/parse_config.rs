//! Read configuration for node trees and object containers.
//!
//! This module provides limits and policies applied while decoding untrusted
//! container files.

use serde::{Deserialize, Serialize};

/// What to do with object properties the decoder does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownProperties {
	/// Keep them on the object and write them back on encode
	#[default]
	Preserve,
	/// Drop them with a warning
	Skip,
	/// Fail the object with a validation error
	Reject,
}

/// Configuration for reading containers.
///
/// # Presets
///
/// - `default()`: depth 64, unknown properties preserved
/// - `lenient()`: depth 1024, unknown properties preserved
/// - `strict()`: depth 8, unknown properties rejected
///
/// # Examples
///
/// ```
/// use obd_types::file::{ReadConfig, UnknownProperties};
///
/// let config = ReadConfig::strict();
/// assert_eq!(config.unknown_properties, UnknownProperties::Reject);
///
/// let config = ReadConfig::new(16, UnknownProperties::Skip);
/// assert_eq!(config.max_depth, 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadConfig {
	/// Maximum node nesting depth when building owned trees
	pub max_depth: usize,
	/// Policy for unrecognized object properties
	pub unknown_properties: UnknownProperties,
}

impl Default for ReadConfig {
	fn default() -> Self {
		Self {
			max_depth: 64,
			unknown_properties: UnknownProperties::Preserve,
		}
	}
}

impl ReadConfig {
	/// Create a new read configuration.
	///
	/// # Arguments
	/// * `max_depth` - Node nesting limit
	/// * `unknown_properties` - Policy for unrecognized object properties
	pub fn new(max_depth: usize, unknown_properties: UnknownProperties) -> Self {
		Self {
			max_depth,
			unknown_properties,
		}
	}

	/// Create a lenient configuration for deeply nested files.
	/// - `max_depth`: 1024
	/// - `unknown_properties`: preserve
	pub fn lenient() -> Self {
		Self {
			max_depth: 1024,
			unknown_properties: UnknownProperties::Preserve,
		}
	}

	/// Create a strict configuration that only accepts the known layout.
	/// - `max_depth`: 8
	/// - `unknown_properties`: reject
	pub fn strict() -> Self {
		Self {
			max_depth: 8,
			unknown_properties: UnknownProperties::Reject,
		}
	}
}
