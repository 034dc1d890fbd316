//! Per-frame display durations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::animation::RandomSource;
use crate::file::ValidationError;

use super::ObjectCategory;

/// Closed interval of display time for one animation frame, in milliseconds.
///
/// Invariant: `minimum <= maximum`.
///
/// # Examples
///
/// ```
/// use obd_types::animation::SequenceSource;
/// use obd_types::file::obd::FrameDuration;
///
/// let fixed = FrameDuration::fixed(100);
/// let mut rng = SequenceSource::new([42]);
/// assert_eq!(fixed.sample(&mut rng), 100);
///
/// let range = FrameDuration::new(100, 200).unwrap();
/// assert_eq!(range.sample(&mut rng), 142);
///
/// assert!(FrameDuration::new(200, 100).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RawFrameDuration")]
pub struct FrameDuration {
	minimum: u32,
	maximum: u32,
}

#[derive(Deserialize)]
struct RawFrameDuration {
	minimum: u32,
	maximum: u32,
}

impl TryFrom<RawFrameDuration> for FrameDuration {
	type Error = ValidationError;

	fn try_from(raw: RawFrameDuration) -> Result<Self, Self::Error> {
		Self::new(raw.minimum, raw.maximum)
	}
}

impl FrameDuration {
	/// Creates a duration range.
	///
	/// # Errors
	///
	/// Returns [`ValidationError::InvalidDuration`] if `minimum > maximum`.
	pub fn new(minimum: u32, maximum: u32) -> Result<Self, ValidationError> {
		if minimum > maximum {
			return Err(ValidationError::InvalidDuration {
				minimum,
				maximum,
			});
		}
		Ok(Self {
			minimum,
			maximum,
		})
	}

	/// Creates a deterministic duration.
	pub const fn fixed(duration: u32) -> Self {
		Self {
			minimum: duration,
			maximum: duration,
		}
	}

	/// Default duration for a new frame of the given category.
	///
	/// The legacy editor looked up a per-category value and then overwrote
	/// it with `(0, 0)`. That result is kept here so files round-trip with the
	/// editor; use [`ObjectCategory::nominal_frame_duration`] for the
	/// per-category values.
	pub fn for_category(_category: ObjectCategory) -> Self {
		Self::fixed(0)
	}

	/// Returns the minimum duration.
	pub fn minimum(&self) -> u32 {
		self.minimum
	}

	/// Returns the maximum duration.
	pub fn maximum(&self) -> u32 {
		self.maximum
	}

	/// Returns true if the range is a single point.
	pub fn is_fixed(&self) -> bool {
		self.minimum == self.maximum
	}

	/// Draws an effective duration.
	///
	/// Returns `minimum` for a point interval, otherwise a uniform value in
	/// `[minimum, maximum)`.
	pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> u32 {
		if self.is_fixed() {
			return self.minimum;
		}
		self.minimum + rng.next_below(self.maximum - self.minimum)
	}
}

impl fmt::Display for FrameDuration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_fixed() {
			write!(f, "{} ms", self.minimum)
		} else {
			write!(f, "{}-{} ms", self.minimum, self.maximum)
		}
	}
}
