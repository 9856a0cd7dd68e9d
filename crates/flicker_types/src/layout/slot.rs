//! Precomputed per-frame source rectangles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Location of one logical frame inside the frame grid's source images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameSlot {
	/// Index into the frame grid's sources
	pub source_index: usize,

	/// Left edge of the frame inside the source image
	pub offset_x: u32,

	/// Top edge of the frame inside the source image
	pub offset_y: u32,
}

impl FrameSlot {
	/// Creates a new frame slot.
	pub const fn new(source_index: usize, offset_x: u32, offset_y: u32) -> Self {
		Self {
			source_index,
			offset_x,
			offset_y,
		}
	}

	/// Returns the source rectangle for a frame of the given size.
	#[inline]
	pub fn source_rect(&self, frame_width: u32, frame_height: u32) -> Rect {
		Rect::new(
			i32::try_from(self.offset_x).unwrap_or(i32::MAX),
			i32::try_from(self.offset_y).unwrap_or(i32::MAX),
			frame_width,
			frame_height,
		)
	}
}

impl fmt::Display for FrameSlot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "source {} @ ({}, {})", self.source_index, self.offset_x, self.offset_y)
	}
}
