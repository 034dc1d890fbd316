//! Constants for object-data containers.

/// Signature written by [`File::new`](super::File::new)
pub const DEFAULT_SIGNATURE: u32 = 0x0044_424F;

/// Object property: object ID (u32)
pub const PROP_ID: u8 = 0x10;

/// Frame group property: u8 width, u8 height, u16 exact size
pub const PROP_SIZE: u8 = 0x20;

/// Frame group property: layer count (u8)
pub const PROP_LAYERS: u8 = 0x21;

/// Frame group property: pattern x, y, z (3 × u8)
pub const PROP_PATTERNS: u8 = 0x22;

/// Frame group property: frame count (u8)
pub const PROP_FRAMES: u8 = 0x23;

/// Frame group property: mode u8, loop count i32, start frame i32, then one
/// (min u32, max u32) pair per frame. Written only for animated groups.
pub const PROP_ANIMATION: u8 = 0x24;

/// Frame group property: chunk of sprite IDs (u32 each)
pub const PROP_SPRITE_IDS: u8 = 0x25;

/// Node type of an inline sprite (version 3)
pub const SPRITE_NODE: u8 = 0x30;

/// Sprite property: sprite ID (u32)
pub const PROP_SPRITE_ID: u8 = 0x31;

/// Sprite property: chunk of codec output
pub const PROP_SPRITE_PIXELS: u8 = 0x32;

/// Largest number of sprite IDs stored in one property
pub const SPRITE_IDS_PER_PROPERTY: usize = 16383;

/// Largest number of pixel bytes stored in one property
pub const PIXEL_BYTES_PER_PROPERTY: usize = 65535;

/// Size of the fixed part of the animation property
pub const ANIMATION_HEADER_SIZE: usize = 9;

/// Size of one serialized frame duration
pub const DURATION_SIZE: usize = 8;
