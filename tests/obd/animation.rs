use anyhow::Result;
use obd_rs::obd_types::animation::synchronous_frame;
use obd_rs::prelude::*;

#[test_log::test]
fn test_counted_loop_on_manual_clock() -> Result<()> {
	let settings = Settings::from_toml("animation_seed = 42")?;
	let mut group = FrameGroup::new(1, 1, 1, 1, 1, 1, 3);
	group.loop_count = 2;
	group.start_frame = StartFrame::Fixed(0);
	group.durations = vec![FrameDuration::fixed(100); 3];

	let clock = ManualClock::new(1_000);
	let mut animator = Animator::with_source(&group, settings.random_source(), clock.now_millis());
	assert_eq!(animator.frame(), 0);

	let mut frames = Vec::new();
	for _ in 0..6 {
		clock.advance(100);
		animator.update_with(&clock);
		frames.push(animator.frame());
	}
	assert_eq!(frames, [1, 2, 0, 1, 2, 2]);
	assert!(animator.is_complete());

	animator.set_frame(FrameRequest::AsyncReset, clock.now_millis());
	assert_eq!(animator.frame(), 0);
	assert!(!animator.is_complete());

	clock.advance(150);
	animator.update_with(&clock);
	assert_eq!((animator.frame(), animator.remaining()), (1, 50));
	Ok(())
}

#[test]
fn test_seeded_random_start() -> Result<()> {
	let settings = Settings::from_toml("animation_seed = 7")?;
	let mut group = FrameGroup::new(1, 1, 1, 1, 1, 1, 8);
	group.durations = vec![FrameDuration::new(100, 300)?; 8];

	let a = Animator::with_source(&group, settings.random_source(), 0);
	let b = Animator::with_source(&group, settings.random_source(), 0);
	assert_eq!(a.frame(), b.frame());
	assert_eq!(a.remaining(), b.remaining());
	assert!(a.frame() < 8);
	assert!((100..300).contains(&a.remaining()));
	Ok(())
}

#[test]
fn test_synchronous_instances_share_phase() {
	let mut group = FrameGroup::new(1, 1, 1, 1, 1, 1, 4);
	group.mode = AnimationMode::Synchronous;
	group.durations = vec![FrameDuration::fixed(100); 4];

	let mut early = Animator::with_source(&group, SequenceSource::new([3]), 0);
	for now in (50..=1_234).step_by(50) {
		early.update(now);
	}
	early.update(1_234);
	let late = Animator::with_source(&group, SequenceSource::new([1]), 1_234);

	assert_eq!(synchronous_frame(&[100; 4], 1_234), (0, 66));
	assert_eq!(late.frame(), 0);
	assert_eq!(early.frame(), late.frame());
	assert_eq!(early.remaining(), late.remaining());
}
