//! Integer geometry used for frame rectangles and destinations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point on the render target.
///
/// Coordinates are signed so an animation may be placed partially off-stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
	/// Horizontal coordinate in pixels
	pub x: i32,
	/// Vertical coordinate in pixels
	pub y: i32,
}

impl Point {
	/// Creates a new point.
	pub const fn new(x: i32, y: i32) -> Self {
		Self {
			x,
			y,
		}
	}
}

impl fmt::Display for Point {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {})", self.x, self.y)
	}
}

/// An axis-aligned rectangle in pixel units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
	/// Left edge
	pub x: i32,
	/// Top edge
	pub y: i32,
	/// Width in pixels
	pub width: u32,
	/// Height in pixels
	pub height: u32,
}

impl Rect {
	/// Creates a new rectangle.
	pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	/// Creates a rectangle anchored at `origin`.
	pub const fn at(origin: Point, width: u32, height: u32) -> Self {
		Self::new(origin.x, origin.y, width, height)
	}

	/// Returns the top-left corner.
	#[inline]
	pub fn origin(&self) -> Point {
		Point::new(self.x, self.y)
	}

	/// Returns the exclusive right edge.
	#[inline]
	pub fn right(&self) -> i64 {
		i64::from(self.x) + i64::from(self.width)
	}

	/// Returns the exclusive bottom edge.
	#[inline]
	pub fn bottom(&self) -> i64 {
		i64::from(self.y) + i64::from(self.height)
	}

	/// Returns `true` when the rectangle covers no pixels.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.width == 0 || self.height == 0
	}

	/// Returns the overlapping part of two rectangles, if any.
	pub fn intersect(&self, other: &Rect) -> Option<Rect> {
		let left = i64::from(self.x).max(i64::from(other.x));
		let top = i64::from(self.y).max(i64::from(other.y));
		let right = self.right().min(other.right());
		let bottom = self.bottom().min(other.bottom());

		if right <= left || bottom <= top {
			return None;
		}

		// Both corners come from i32 inputs and the extents from u32 widths.
		Some(Rect::new(left as i32, top as i32, (right - left) as u32, (bottom - top) as u32))
	}
}

impl fmt::Display for Rect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}x{} at ({}, {})", self.width, self.height, self.x, self.y)
	}
}
