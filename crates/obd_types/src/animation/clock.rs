//! Millisecond clocks.

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of millisecond timestamps.
///
/// Synchronous animations are phase-locked to this clock, so every animator
/// that should stay in step must read the same clock.
pub trait Clock {
	/// Returns the current time in milliseconds.
	fn now_millis(&self) -> u64;
}

/// Wall clock: milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now_millis(&self) -> u64 {
		SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map(|elapsed| elapsed.as_millis() as u64)
			.unwrap_or_default()
	}
}

/// Manually driven clock for tests and offline playback.
///
/// # Examples
///
/// ```
/// use obd_types::animation::{Clock, ManualClock};
///
/// let clock = ManualClock::new(100);
/// clock.advance(50);
/// assert_eq!(clock.now_millis(), 150);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
	now: Cell<u64>,
}

impl ManualClock {
	/// Creates a clock reading `now`.
	pub fn new(now: u64) -> Self {
		Self {
			now: Cell::new(now),
		}
	}

	/// Sets the current time.
	pub fn set(&self, now: u64) {
		self.now.set(now);
	}

	/// Moves the clock forward.
	pub fn advance(&self, millis: u64) {
		self.now.set(self.now.get() + millis);
	}
}

impl Clock for ManualClock {
	fn now_millis(&self) -> u64 {
		self.now.get()
	}
}
