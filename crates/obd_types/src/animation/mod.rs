//! Animation timing.
//!
//! An [`Animator`] replays one frame group for one object instance. Time and
//! randomness come from the caller: timestamps are passed to
//! [`Animator::update`] (or read from a [`Clock`]) and random frame and
//! duration choices are drawn from a [`RandomSource`].
//!
//! # Looping
//!
//! - `loop_count == 0`: play forward forever
//! - `loop_count > 0`: play forward that many times, then stop on the last frame
//! - `loop_count < 0`: bounce between the first and last frame forever

mod animator;
mod clock;
mod random;

pub use animator::{Animator, Direction, FrameRequest, synchronous_frame};
pub use clock::{Clock, ManualClock, SystemClock};
pub use random::{RandomSource, RngSource, SequenceSource};
