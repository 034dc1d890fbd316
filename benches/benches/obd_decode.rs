//! Benchmark suite for object-data containers
//!
//! Measures container decoding, atlas assembly and animation stepping.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use obd_benches::{generate_outfit, generate_test_container, sizes};
use obd_types::animation::{Animator, SequenceSource};
use obd_types::file::obd::{File, FormatVersion, FrameGroupType};
use obd_types::file::tree::Node;
use obd_types::sheet::{OutfitPalette, assemble, colorize_outfit, split};
use std::hint::black_box;

/// Benchmark container decoding for both sprite storage styles
fn bench_decode_containers(c: &mut Criterion) {
	let mut group = c.benchmark_group("obd_decode");

	for version in [FormatVersion::V2, FormatVersion::V3] {
		for count in [sizes::SMALL, sizes::MEDIUM] {
			let data = generate_test_container(count, version);
			group.throughput(Throughput::Bytes(data.len() as u64));
			group.bench_with_input(BenchmarkId::new(format!("v{version}"), count), &data, |b, data| {
				b.iter(|| {
					let result = File::from_bytes(black_box(data));
					black_box(result)
				});
			});
		}
	}

	group.finish();
}

/// Benchmark the generic node tree without the object layer
fn bench_node_tree(c: &mut Criterion) {
	let mut group = c.benchmark_group("obd_tree");

	let data = generate_test_container(sizes::MEDIUM, FormatVersion::V3);
	let body = &data[4..];
	group.throughput(Throughput::Bytes(body.len() as u64));
	group.bench_function("decode_tree", |b| {
		b.iter(|| {
			let result = Node::decode(black_box(body));
			black_box(result)
		});
	});

	group.finish();
}

/// Benchmark container encoding
fn bench_encode_container(c: &mut Criterion) {
	let mut group = c.benchmark_group("obd_encode");
	group.sample_size(50);

	let file = match File::from_bytes(&generate_test_container(sizes::LARGE, FormatVersion::V3)) {
		Ok(file) => file,
		Err(err) => {
			eprintln!("Warning: Could not build container for encode benchmark: {err}");
			return;
		}
	};

	group.bench_function("encode_v3", |b| {
		b.iter(|| {
			let result = black_box(&file).to_bytes();
			black_box(result)
		});
	});

	group.finish();
}

/// Benchmark sprite sheet assembly, splitting and outfit recoloring
fn bench_sheet(c: &mut Criterion) {
	let mut group = c.benchmark_group("obd_sheet");

	let outfit = generate_outfit(1, 8);
	let (Some(walking), Ok(sprites)) = (
		outfit.frame_group(FrameGroupType::Walking),
		outfit.sprite_group(FrameGroupType::Walking),
	) else {
		eprintln!("Warning: Could not build outfit for sheet benchmark");
		return;
	};
	let Ok(sheet) = assemble(walking, sprites) else {
		eprintln!("Warning: Could not assemble outfit sheet");
		return;
	};

	group.throughput(Throughput::Elements(sprites.len() as u64));
	group.bench_function("assemble", |b| {
		b.iter(|| {
			let result = assemble(black_box(walking), black_box(sprites));
			black_box(result)
		});
	});
	group.bench_function("split", |b| {
		b.iter(|| {
			let result = split(black_box(walking), black_box(&sheet));
			black_box(result)
		});
	});

	let palette = OutfitPalette::from_hsi(0, 42, 84, 126);
	group.bench_function("colorize_outfit", |b| {
		b.iter(|| {
			let result = colorize_outfit(black_box(walking), black_box(&sheet), &palette, 0b11);
			black_box(result)
		});
	});

	group.finish();
}

/// Benchmark animation stepping over long gaps
fn bench_animator(c: &mut Criterion) {
	let mut group = c.benchmark_group("obd_animation");

	let outfit = generate_outfit(1, 8);
	let Some(walking) = outfit.frame_group(FrameGroupType::Walking) else {
		return;
	};

	group.bench_function("update_16ms", |b| {
		let mut animator = Animator::with_source(walking, SequenceSource::new([0]), 0);
		let mut now = 0;
		b.iter(|| {
			now += 16;
			animator.update(black_box(now));
			black_box(animator.frame())
		});
	});

	group.finish();
}

criterion_group!(
	benches,
	bench_decode_containers,
	bench_node_tree,
	bench_encode_container,
	bench_sheet,
	bench_animator,
);

criterion_main!(benches);
