use std::{cell::Cell, rc::Rc};

use flicker_rs::prelude::*;
use image::RgbaImage;

use crate::common::{FRAME_HEIGHT, FRAME_WIDTH, frame_at, grid, numbered_sheet};

fn attached(spec: AnimationSpec<Canvas>) -> (FrameSequencer<Canvas>, SharedTarget<Canvas>) {
	let canvas = share(Canvas::new(40, 40));
	let mut sequencer = FrameSequencer::new(spec).unwrap();
	sequencer.attach_surface(canvas.clone());
	(sequencer, canvas)
}

#[test_log::test]
fn test_frames_reach_canvas_in_order() {
	let (mut sequencer, canvas) = attached(AnimationSpec::new(grid(3, 9, 0)).at(5, 5));

	for expected in 0..9 {
		sequencer.draw();
		assert_eq!(frame_at(&canvas, 5, 5), Some((expected, 0)));
		assert_eq!(frame_at(&canvas, 5 + FRAME_WIDTH - 1, 5 + FRAME_HEIGHT - 1), Some((expected, 0)));
	}
	assert_eq!(frame_at(&canvas, 4, 4), None);
	assert_eq!(frame_at(&canvas, 5 + FRAME_WIDTH, 5), None);
	assert_eq!(sequencer.current_frame(), 0);
}

#[test_log::test]
fn test_reverse_draws_then_wraps_to_last_frame() {
	let (mut sequencer, canvas) =
		attached(AnimationSpec::new(grid(3, 9, 0)).with_loop_count(3));
	sequencer.set_direction(Direction::Reverse);

	sequencer.draw();
	assert_eq!(frame_at(&canvas, 0, 0), Some((0, 0)));
	assert_eq!(sequencer.current_frame(), 8);
	assert_eq!(sequencer.loop_count(), LoopCount::Remaining(2));

	sequencer.draw();
	assert_eq!(frame_at(&canvas, 0, 0), Some((8, 0)));
	assert_eq!(sequencer.current_frame(), 7);
}

#[test_log::test]
fn test_direction_change_keeps_current_frame() {
	let (mut sequencer, _canvas) = attached(AnimationSpec::new(grid(3, 9, 0)));
	for _ in 0..4 {
		sequencer.draw();
	}
	sequencer.set_direction(Direction::Reverse);
	assert_eq!(sequencer.current_frame(), 4);

	sequencer.draw();
	assert_eq!(sequencer.current_frame(), 3);
}

#[test_log::test]
fn test_finite_loops_complete_exactly_once() {
	let completions = Rc::new(Cell::new(0));
	let counter = Rc::clone(&completions);
	let spec = AnimationSpec::new(grid(3, 9, 0))
		.with_loop_count(2)
		.on_complete(move |_: &mut FrameSequencer<Canvas>| counter.set(counter.get() + 1));
	let (mut sequencer, canvas) = attached(spec);

	for _ in 0..18 {
		sequencer.draw();
	}
	assert_eq!(sequencer.loop_count(), LoopCount::Remaining(0));
	assert!(!sequencer.is_completed());
	assert_eq!(completions.get(), 0);

	// The terminal step renders nothing
	canvas.borrow_mut().clear();
	sequencer.draw();
	assert!(sequencer.is_completed());
	assert_eq!(completions.get(), 1);
	assert_eq!(frame_at(&canvas, 0, 0), None);

	for _ in 0..50 {
		sequencer.draw();
	}
	assert_eq!(completions.get(), 1);
	assert_eq!(frame_at(&canvas, 0, 0), None);
}

#[test_log::test]
fn test_infinite_loop_never_completes() {
	let completions = Rc::new(Cell::new(0));
	let counter = Rc::clone(&completions);
	let spec = AnimationSpec::new(grid(3, 9, 0))
		.with_loop_count(-1)
		.on_complete(move |_: &mut FrameSequencer<Canvas>| counter.set(counter.get() + 1));
	let (mut sequencer, _canvas) = attached(spec);

	for _ in 0..10_000 {
		sequencer.draw();
	}
	assert_eq!(completions.get(), 0);
	assert!(!sequencer.is_completed());
	assert!(sequencer.loop_count().is_infinite());
}

#[test_log::test]
fn test_seek_revives_completed_sequencer() {
	let (mut sequencer, canvas) =
		attached(AnimationSpec::new(grid(3, 9, 0)).with_loop_count(1).at(20, 20));
	for _ in 0..10 {
		sequencer.draw();
	}
	assert!(sequencer.is_completed());

	// Something else on the canvas is wiped by the seek
	let other = numbered_sheet(1, 1, 7);
	let cell = Rect::new(0, 0, FRAME_WIDTH, FRAME_HEIGHT);
	canvas.borrow_mut().blit(&other, cell, cell).unwrap();
	assert_eq!(frame_at(&canvas, 0, 0), Some((0, 7)));

	sequencer.seek(4).unwrap();
	assert!(!sequencer.is_completed());
	assert_eq!(sequencer.current_frame(), 4);
	assert_eq!(frame_at(&canvas, 20, 20), Some((4, 0)));
	assert_eq!(frame_at(&canvas, 0, 0), None);

	// Loops are left as they were, so the next draw completes again
	assert_eq!(sequencer.loop_count(), LoopCount::Remaining(0));
	sequencer.draw();
	assert!(sequencer.is_completed());
}

#[test_log::test]
fn test_seek_zero_always_redraws_first_frame() {
	let (mut sequencer, canvas) = attached(AnimationSpec::new(grid(3, 9, 0)));
	for _ in 0..5 {
		sequencer.draw();
	}
	sequencer.seek(0).unwrap();
	assert_eq!(sequencer.current_frame(), 0);
	assert_eq!(frame_at(&canvas, 0, 0), Some((0, 0)));
}

#[test_log::test]
fn test_seek_out_of_range_is_rejected() {
	let (mut sequencer, _canvas) = attached(AnimationSpec::new(grid(3, 9, 0)));
	sequencer.draw();

	assert_eq!(
		sequencer.seek(9),
		Err(ConfigError::FrameOutOfRange {
			index: 9,
			count: 9,
		})
	);
	assert_eq!(sequencer.current_frame(), 1);
}

#[test_log::test]
fn test_unready_sheet_is_skipped_but_playback_advances() {
	let grid = FrameGrid::new(FRAME_WIDTH, FRAME_HEIGHT, 4)
		.with_columns(4)
		.with_source(Rc::new(RgbaImage::new(0, 0)));
	let (mut sequencer, canvas) = attached(AnimationSpec::new(grid));

	sequencer.draw();
	sequencer.draw();
	assert_eq!(sequencer.current_frame(), 2);
	assert_eq!(frame_at(&canvas, 0, 0), None);
}

#[test_log::test]
fn test_detached_sequencer_still_advances() {
	let mut sequencer = FrameSequencer::<Canvas>::new(AnimationSpec::new(grid(3, 9, 0))).unwrap();
	sequencer.draw();
	assert_eq!(sequencer.current_frame(), 1);

	sequencer.seek(3).unwrap();
	assert_eq!(sequencer.current_frame(), 3);
}

#[test_log::test]
fn test_empty_animation_draw_is_noop() {
	let (mut sequencer, canvas) = attached(AnimationSpec::new(grid(3, 0, 0)));
	assert!(sequencer.frames().is_empty());

	sequencer.draw();
	assert_eq!(sequencer.current_frame(), 0);
	assert!(!sequencer.is_completed());
	assert_eq!(frame_at(&canvas, 0, 0), None);
}

#[test_log::test]
fn test_configure_resets_playback() {
	let (mut sequencer, canvas) =
		attached(AnimationSpec::new(grid(3, 9, 0)).with_loop_count(1));
	sequencer.set_direction(Direction::Reverse);
	for _ in 0..3 {
		sequencer.draw();
	}
	sequencer.release();

	let id = sequencer.id();
	let configured = sequencer.configure(AnimationSpec::new(grid(2, 4, 3)).at(10, 0)).unwrap();
	assert_eq!(configured.id(), id);
	assert_eq!(configured.current_frame(), 0);
	assert_eq!(configured.direction(), Direction::Forward);
	assert_eq!(configured.frames().len(), 4);
	assert!(!configured.is_free());
	assert!(!configured.is_completed());

	// The surface binding survives reconfiguration
	configured.draw();
	assert_eq!(frame_at(&canvas, 10, 0), Some((0, 3)));
}

#[test_log::test]
fn test_invalid_configure_keeps_previous_animation() {
	let (mut sequencer, _canvas) = attached(AnimationSpec::new(grid(3, 9, 0)));
	sequencer.draw();

	let columnless =
		FrameGrid::new(FRAME_WIDTH, FRAME_HEIGHT, 2).with_source(numbered_sheet(3, 3, 0));
	assert_eq!(
		sequencer.configure(AnimationSpec::new(columnless)).err(),
		Some(ConfigError::MissingColumns)
	);
	assert_eq!(sequencer.frames().len(), 9);
	assert_eq!(sequencer.current_frame(), 1);
}

#[test_log::test]
fn test_callback_may_reconfigure_sequencer() {
	let replays = Rc::new(Cell::new(0));
	let counter = Rc::clone(&replays);
	let spec = AnimationSpec::new(grid(3, 3, 0)).with_loop_count(1).on_complete(
		move |sequencer: &mut FrameSequencer<Canvas>| {
			counter.set(counter.get() + 1);
			sequencer.configure(AnimationSpec::new(grid(2, 2, 9)).with_loop_count(1)).unwrap();
		},
	);
	let (mut sequencer, canvas) = attached(spec);

	for _ in 0..4 {
		sequencer.draw();
	}
	assert_eq!(replays.get(), 1);
	assert!(!sequencer.is_completed());
	assert!(!sequencer.has_completion_callback());
	assert_eq!(sequencer.frames().len(), 2);

	sequencer.draw();
	assert_eq!(frame_at(&canvas, 0, 0), Some((0, 9)));
}

#[test_log::test]
fn test_destroy_drops_surface_binding() {
	let (mut sequencer, canvas) = attached(AnimationSpec::new(grid(3, 9, 0)).on_complete(|_| {}));
	sequencer.destroy();
	assert!(sequencer.surface().is_none());
	assert!(!sequencer.has_completion_callback());

	sequencer.draw();
	assert_eq!(frame_at(&canvas, 0, 0), None);
	assert_eq!(Rc::strong_count(&canvas), 1);
}
