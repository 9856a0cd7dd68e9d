//! Benchmark suite for frame layout and playback
//!
//! Measures slot computation for each layout mode, single sequencer draws and
//! full scheduler ticks with many overlapping sprites on a software canvas.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use flicker_benches::{multi_sheet_grid, populated_stage, sheet_grid, sizes};
use flicker_player::{AnimationSpec, FrameSequencer};
use flicker_types::{Canvas, compute_slots, share};

/// Benchmark slot computation for grid and multi-sheet layouts
fn bench_layout(c: &mut Criterion) {
	let mut group = c.benchmark_group("layout");

	for columns in [8_u32, 32, 128] {
		let grid = sheet_grid(columns, 8, sizes::SMALL_FRAME);
		group.throughput(Throughput::Elements(grid.frame_count() as u64));
		group.bench_with_input(BenchmarkId::new("grid", columns * 8), &grid, |b, grid| {
			b.iter(|| black_box(compute_slots(black_box(grid), false)));
		});
	}

	for sheets in [2_u32, 8, 32] {
		let grid = multi_sheet_grid(sheets, 8, 8, sizes::SMALL_FRAME);
		group.throughput(Throughput::Elements(grid.frame_count() as u64));
		group.bench_with_input(BenchmarkId::new("multi_sheet", sheets), &grid, |b, grid| {
			b.iter(|| black_box(compute_slots(black_box(grid), true)));
		});
	}

	group.finish();
}

/// Benchmark one sequencer drawing onto a canvas
fn bench_sequencer_draw(c: &mut Criterion) {
	let mut group = c.benchmark_group("sequencer");

	for frame in [sizes::SMALL_FRAME, sizes::CHARACTER_FRAME] {
		let grid = sheet_grid(8, 4, frame);
		let mut sequencer = FrameSequencer::new(AnimationSpec::<Canvas>::new(grid)).unwrap();
		sequencer.attach_surface(share(Canvas::new(sizes::STAGE.0, sizes::STAGE.1)));

		group.throughput(Throughput::Elements(u64::from(frame.0 * frame.1)));
		group.bench_function(BenchmarkId::new("draw", format!("{}x{}", frame.0, frame.1)), |b| {
			b.iter(|| sequencer.draw());
		});
	}

	group.finish();
}

/// Benchmark full scheduler ticks, clear included
fn bench_scheduler_tick(c: &mut Criterion) {
	let mut group = c.benchmark_group("scheduler");
	group.sample_size(50);

	for sprites in [1_usize, 16, 128] {
		let mut scheduler = populated_stage(sprites, sizes::STAGE, sizes::CHARACTER_FRAME);
		let interval = scheduler.tick_interval_ms();
		let mut now = 0.0;

		group.throughput(Throughput::Elements(sprites as u64));
		group.bench_function(BenchmarkId::new("tick", sprites), |b| {
			b.iter(|| {
				now += interval;
				black_box(scheduler.tick(now))
			});
		});
	}

	group.finish();
}

criterion_group!(benches, bench_layout, bench_sequencer_draw, bench_scheduler_tick);

criterion_main!(benches);
