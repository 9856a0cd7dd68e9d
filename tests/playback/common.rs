use std::rc::Rc;

use flicker_rs::prelude::*;
use image::{Rgba, RgbaImage};

pub(crate) const FRAME_WIDTH: u32 = 10;
pub(crate) const FRAME_HEIGHT: u32 = 8;

/// Builds a sheet of `columns` x `rows` frames. Frame `i` is filled with red
/// `i + 1` and green `tag`.
pub(crate) fn numbered_sheet(columns: u32, rows: u32, tag: u8) -> Rc<RgbaImage> {
	let sheet = RgbaImage::from_fn(columns * FRAME_WIDTH, rows * FRAME_HEIGHT, |x, y| {
		let index = (y / FRAME_HEIGHT) * columns + x / FRAME_WIDTH;
		Rgba([u8::try_from(index + 1).unwrap(), tag, 0, 255])
	});
	Rc::new(sheet)
}

/// Grid of `count` frames on one numbered sheet with `columns` frames per row.
pub(crate) fn grid(columns: u32, count: usize, tag: u8) -> FrameGrid<RgbaImage> {
	let rows = (count as u32).div_ceil(columns).max(1);
	FrameGrid::new(FRAME_WIDTH, FRAME_HEIGHT, count)
		.with_columns(columns)
		.with_source(numbered_sheet(columns, rows, tag))
}

/// Frame index and sheet tag visible at (`x`, `y`), or `None` when the pixel
/// is transparent.
pub(crate) fn frame_at(canvas: &SharedTarget<Canvas>, x: u32, y: u32) -> Option<(usize, u8)> {
	let pixel = canvas.borrow().pixel(x, y)?;
	if pixel[3] == 0 {
		return None;
	}
	Some((usize::from(pixel[0]) - 1, pixel[1]))
}

/// Stage of `width` x `height` at 10 fps, so a tick is drawn every 100 ms.
pub(crate) fn stage(width: u32, height: u32) -> PlaybackScheduler<Canvas> {
	PlaybackScheduler::new(StageConfig::new(10.0, width, height), Canvas::new(1, 1)).unwrap()
}
