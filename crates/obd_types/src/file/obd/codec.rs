//! Pluggable sprite payload compression.

use crate::file::ObdError;

/// Compresses and decompresses inline sprite payloads.
///
/// Version 3 containers store each sprite's RGBA bytes after passing them
/// through a codec. The container only sees opaque bytes.
pub trait SpriteCodec {
	/// Compresses raw RGBA bytes.
	fn compress(&self, pixels: &[u8]) -> Result<Vec<u8>, ObdError>;

	/// Restores raw RGBA bytes from codec output.
	fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, ObdError>;
}

/// Identity codec: payloads are stored uncompressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Passthrough;

impl SpriteCodec for Passthrough {
	fn compress(&self, pixels: &[u8]) -> Result<Vec<u8>, ObdError> {
		Ok(pixels.to_vec())
	}

	fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, ObdError> {
		Ok(data.to_vec())
	}
}
