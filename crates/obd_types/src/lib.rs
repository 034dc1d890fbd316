//! This crate provides the data model, container formats and playback logic
//! for the `obd-rs` project.
//!
//! # Modules
//!
//! - **`file::tree`**: escaped, self-delimiting node-tree container
//! - **`file::obd`**: object-data containers (items, outfits, effects, missiles)
//! - **`sheet`**: sprite index arithmetic, atlas assembly and outfit recoloring
//! - **`animation`**: per-instance animation timing
//! - **`settings`**: layered configuration
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```
//! use obd_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut group = FrameGroup::new(1, 1, 1, 1, 1, 1, 2);
//! group.durations = vec![FrameDuration::fixed(100); 2];
//!
//! let mut file = ObdFile::new(FormatVersion::V2);
//! file.objects.push(ObjectDefinition::new(1, ObjectCategory::Effect).with_group(FrameGroupType::Default, group));
//! let decoded = ObdFile::from_bytes(&file.to_bytes()?)?;
//!
//! let group = decoded.objects[0].frame_group(FrameGroupType::Default).unwrap();
//! let mut animator = Animator::with_source(group, SequenceSource::new([0]), 0);
//! animator.update(150);
//! assert_eq!(animator.frame(), 1);
//! # Ok(())
//! # }
//! ```

pub mod animation;
pub mod file;
pub mod settings;
pub mod sheet;

/// `use obd_types::prelude::*;` to import commonly used items.
pub mod prelude;
