//! Injectable random sources.

use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Uniform random integers in `[0, bound)`.
///
/// Animators and duration sampling take their randomness through this trait
/// so tests can substitute a fixed sequence.
pub trait RandomSource {
	/// Returns a value in `[0, bound)`, or 0 when `bound` is 0.
	fn next_below(&mut self, bound: u32) -> u32;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
	fn next_below(&mut self, bound: u32) -> u32 {
		(**self).next_below(bound)
	}
}

/// [`RandomSource`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R = SmallRng> {
	rng: R,
}

impl RngSource<SmallRng> {
	/// Creates a deterministic source from a seed.
	pub fn seeded(seed: u64) -> Self {
		Self {
			rng: SmallRng::seed_from_u64(seed),
		}
	}

	/// Creates a source seeded from the operating system.
	pub fn from_os() -> Self {
		Self {
			rng: SmallRng::from_os_rng(),
		}
	}
}

impl<R: Rng> RngSource<R> {
	/// Wraps an existing generator.
	pub fn new(rng: R) -> Self {
		Self {
			rng,
		}
	}

	/// Returns the wrapped generator.
	pub fn into_inner(self) -> R {
		self.rng
	}
}

impl Default for RngSource<SmallRng> {
	fn default() -> Self {
		Self::from_os()
	}
}

impl<R: Rng> RandomSource for RngSource<R> {
	fn next_below(&mut self, bound: u32) -> u32 {
		if bound == 0 {
			return 0;
		}
		self.rng.random_range(0..bound)
	}
}

/// Replays a fixed sequence of values, wrapping around at the end.
///
/// Each value is reduced modulo the requested bound.
///
/// # Examples
///
/// ```
/// use obd_types::animation::{RandomSource, SequenceSource};
///
/// let mut source = SequenceSource::new([7, 2]);
/// assert_eq!(source.next_below(5), 2);
/// assert_eq!(source.next_below(5), 2);
/// assert_eq!(source.next_below(5), 2);
/// assert_eq!(source.next_below(0), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceSource {
	values: Vec<u32>,
	position: usize,
}

impl SequenceSource {
	/// Creates a source replaying `values`. An empty sequence always yields 0.
	pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
		Self {
			values: values.into_iter().collect(),
			position: 0,
		}
	}

	/// Returns how many values have been drawn.
	pub fn draws(&self) -> usize {
		self.position
	}
}

impl RandomSource for SequenceSource {
	fn next_below(&mut self, bound: u32) -> u32 {
		if bound == 0 || self.values.is_empty() {
			return 0;
		}
		let value = self.values[self.position % self.values.len()];
		self.position += 1;
		value % bound
	}
}
