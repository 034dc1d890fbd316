//! Per-instance animation playback.

use log::trace;

use crate::file::obd::{AnimationMode, FrameDuration, FrameGroup, StartFrame};

use super::{Clock, RandomSource, RngSource};

/// Frame selection request for [`Animator::set_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameRequest {
	/// Use the group's start frame rule
	Automatic,
	/// Any frame, uniformly at random
	Random,
	/// Frame 0
	AsyncReset,
	/// A literal frame; out-of-range values fall back to [`Automatic`](Self::Automatic)
	Index(usize),
}

/// Ping-pong direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
	/// Towards the last frame
	#[default]
	Forward,
	/// Towards frame 0
	Backward,
}

/// Locates the frame of a synchronous animation at time `now`.
///
/// `durations` are the effective per-frame durations. Returns the frame and
/// the time left in it. A cycle of total length 0 stays on frame 0.
///
/// # Examples
///
/// ```
/// use obd_types::animation::synchronous_frame;
///
/// assert_eq!(synchronous_frame(&[100, 200, 100], 1_000), (2, 100));
/// assert_eq!(synchronous_frame(&[100, 200, 100], 1_150), (1, 150));
/// ```
pub fn synchronous_frame(durations: &[u32], now: u64) -> (usize, u64) {
	let total: u64 = durations.iter().map(|&d| u64::from(d)).sum();
	if total == 0 {
		return (0, 0);
	}

	let elapsed = now % total;
	let mut start = 0;
	for (frame, &duration) in durations.iter().enumerate() {
		let end = start + u64::from(duration);
		if elapsed < end {
			return (frame, end - elapsed);
		}
		start = end;
	}
	(0, 0)
}

/// Playback state of one animated object instance.
///
/// Borrows the frame group's duration table. Timestamps are milliseconds of
/// whatever clock the caller uses; synchronous animators are phase-locked
/// to that clock.
///
/// # Examples
///
/// ```
/// use obd_types::animation::{Animator, SequenceSource};
/// use obd_types::file::obd::{FrameDuration, FrameGroup, StartFrame};
///
/// let mut group = FrameGroup::new(1, 1, 1, 1, 1, 1, 3);
/// group.durations = vec![FrameDuration::fixed(100); 3];
/// group.start_frame = StartFrame::Fixed(0);
///
/// let mut animator = Animator::with_source(&group, SequenceSource::new([0]), 0);
/// animator.update(100);
/// animator.update(200);
/// assert_eq!(animator.frame(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Animator<'a, R = RngSource> {
	durations: &'a [FrameDuration],
	mode: AnimationMode,
	loop_count: i32,
	start_frame: StartFrame,
	rng: R,
	frame: usize,
	remaining: u64,
	direction: Direction,
	current_loop: u32,
	complete: bool,
	last_update: u64,
}

impl<'a> Animator<'a, RngSource> {
	/// Creates an animator for `group` with an OS-seeded random source,
	/// started at `now`.
	pub fn new(group: &'a FrameGroup, now: u64) -> Self {
		Self::with_source(group, RngSource::from_os(), now)
	}
}

impl<'a, R: RandomSource> Animator<'a, R> {
	/// Creates an animator for `group` drawing randomness from `rng`,
	/// started at `now`.
	pub fn with_source(group: &'a FrameGroup, rng: R, now: u64) -> Self {
		let mut animator = Self {
			durations: &group.durations,
			mode: group.mode,
			loop_count: group.loop_count,
			start_frame: group.start_frame,
			rng,
			frame: 0,
			remaining: 0,
			direction: Direction::Forward,
			current_loop: 0,
			complete: false,
			last_update: now,
		};
		animator.reset(now);
		animator
	}

	/// Current frame.
	pub fn frame(&self) -> usize {
		self.frame
	}

	/// Time left in the current frame, in milliseconds.
	pub fn remaining(&self) -> u64 {
		self.remaining
	}

	/// Current ping-pong direction.
	pub fn direction(&self) -> Direction {
		self.direction
	}

	/// Number of completed loops of a counted animation.
	pub fn loop_counter(&self) -> u32 {
		self.current_loop
	}

	/// Returns true once a finite animation reached its last frame.
	pub fn is_complete(&self) -> bool {
		self.complete
	}

	/// Timing mode of the animated group.
	pub fn mode(&self) -> AnimationMode {
		self.mode
	}

	/// Restarts playback: start frame rule, loop counter 0, forward direction.
	pub fn reset(&mut self, now: u64) {
		self.current_loop = 0;
		self.direction = Direction::Forward;
		self.set_frame(FrameRequest::Automatic, now);
	}

	/// Selects a frame.
	///
	/// Asynchronous animators resolve `request`, clear the complete flag and
	/// load the frame's sampled duration. Synchronous animators ignore the
	/// request and resynchronize with the clock.
	pub fn set_frame(&mut self, request: FrameRequest, now: u64) {
		if self.mode == AnimationMode::Synchronous {
			self.resync(now);
			return;
		}

		self.frame = self.resolve(request);
		self.complete = false;
		self.last_update = now;
		self.remaining = self.sample(self.frame);
	}

	/// Advances playback to `now`.
	///
	/// Does nothing if `now` is the last update time or the animation is
	/// complete. Time spent past the end of a frame is carried into the next
	/// one; an asynchronous animator that overshoots a whole frame shows it
	/// for zero time, a synchronous one resynchronizes with the clock.
	pub fn update(&mut self, now: u64) {
		if now == self.last_update || self.complete {
			return;
		}

		let elapsed = now.saturating_sub(self.last_update);
		if elapsed < self.remaining {
			self.remaining -= elapsed;
			self.last_update = now;
			return;
		}

		let next = if self.loop_count < 0 {
			self.ping_pong_frame()
		} else {
			self.loop_frame()
		};
		if next == self.frame {
			trace!("animation complete at frame {next}");
			self.complete = true;
			self.last_update = now;
			return;
		}

		let overshoot = elapsed - self.remaining;
		let duration = i128::from(self.sample(next)) - i128::from(overshoot);
		if duration < 0 && self.mode == AnimationMode::Synchronous {
			self.resync(now);
			return;
		}

		self.frame = next;
		self.remaining = u64::try_from(duration).unwrap_or(0);
		self.last_update = now;
	}

	/// Advances playback to the clock's current time.
	pub fn update_with<C: Clock + ?Sized>(&mut self, clock: &C) {
		self.update(clock.now_millis());
	}

	fn frame_count(&self) -> usize {
		self.durations.len()
	}

	fn sample(&mut self, frame: usize) -> u64 {
		self.durations
			.get(frame)
			.map_or(0, |duration| u64::from(duration.sample(&mut self.rng)))
	}

	fn random_frame(&mut self) -> usize {
		let count = u32::try_from(self.frame_count()).unwrap_or(u32::MAX);
		self.rng.next_below(count) as usize
	}

	fn resolve(&mut self, request: FrameRequest) -> usize {
		match request {
			FrameRequest::AsyncReset => 0,
			FrameRequest::Random => self.random_frame(),
			FrameRequest::Index(frame) if frame < self.frame_count() => frame,
			FrameRequest::Index(_) | FrameRequest::Automatic => match self.start_frame {
				StartFrame::Fixed(frame) if usize::from(frame) < self.frame_count() => usize::from(frame),
				_ => self.random_frame(),
			},
		}
	}

	fn resync(&mut self, now: u64) {
		let durations: Vec<u32> = self
			.durations
			.iter()
			.map(|duration| duration.sample(&mut self.rng))
			.collect();
		let (frame, remaining) = synchronous_frame(&durations, now);
		self.frame = frame;
		self.remaining = remaining;
		self.complete = false;
		self.last_update = now;
	}

	/// Counted or infinite loop. Returns the current frame when playback ends.
	fn loop_frame(&mut self) -> usize {
		let next = self.frame + 1;
		if next < self.frame_count() {
			return next;
		}
		if self.loop_count == 0 {
			return 0;
		}
		if i64::from(self.current_loop) < i64::from(self.loop_count) - 1 {
			self.current_loop += 1;
			return 0;
		}
		self.frame
	}

	/// Bounces between the first and last frame.
	fn ping_pong_frame(&mut self) -> usize {
		let count = self.frame_count();
		let step = |frame: usize, direction| match direction {
			Direction::Forward => frame.checked_add(1).filter(|&next| next < count),
			Direction::Backward => frame.checked_sub(1),
		};

		if let Some(next) = step(self.frame, self.direction) {
			return next;
		}
		self.direction = match self.direction {
			Direction::Forward => Direction::Backward,
			Direction::Backward => Direction::Forward,
		};
		step(self.frame, self.direction).unwrap_or(self.frame)
	}
}
