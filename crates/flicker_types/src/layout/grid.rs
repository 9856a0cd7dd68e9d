//! Frame grid description: frame size, frame count and source images.

use std::{fmt, rc::Rc};

use crate::{error::ConfigError, geometry::Rect, surface::SourceImage};

use super::slot::FrameSlot;

/// Describes how an animation's frames are cut out of its source images.
///
/// Every frame has the same size. Depending on the layout mode the frames are
/// read from a single sheet laid out in rows of `columns`, from one source
/// image per frame, or packed across several sheets.
///
/// Source images are shared (`Rc`) so that many animations can reference the
/// same sheets without copying pixels.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
///
/// use flicker_types::FrameGrid;
/// use image::RgbaImage;
///
/// let sheet = Rc::new(RgbaImage::new(450, 72));
/// let grid = FrameGrid::new(50, 72, 9).with_columns(9).with_source(sheet);
///
/// assert_eq!(grid.frame_count(), 9);
/// assert_eq!(grid.columns(), Some(9));
/// assert_eq!(grid.sources().len(), 1);
/// ```
pub struct FrameGrid<S> {
	/// Frames per row, required for grid and multi-sheet layouts
	columns: Option<u32>,

	/// Number of logical frames
	frame_count: usize,

	/// Width of every frame in pixels
	frame_width: u32,

	/// Height of every frame in pixels
	frame_height: u32,

	/// Source images in playback order
	sources: Vec<Rc<S>>,
}

impl<S> FrameGrid<S> {
	/// Creates a grid without sources or column count.
	pub fn new(frame_width: u32, frame_height: u32, frame_count: usize) -> Self {
		Self {
			columns: None,
			frame_count,
			frame_width,
			frame_height,
			sources: Vec::new(),
		}
	}

	/// Sets the number of frames per row.
	pub fn with_columns(mut self, columns: u32) -> Self {
		self.columns = Some(columns);
		self
	}

	/// Appends a source image.
	pub fn with_source(mut self, source: Rc<S>) -> Self {
		self.sources.push(source);
		self
	}

	/// Replaces all source images.
	pub fn with_sources<I>(mut self, sources: I) -> Self
	where
		I: IntoIterator<Item = Rc<S>>,
	{
		self.sources = sources.into_iter().collect();
		self
	}

	/// Returns the number of frames per row, if set.
	#[inline]
	pub fn columns(&self) -> Option<u32> {
		self.columns
	}

	/// Returns the number of logical frames.
	#[inline]
	pub fn frame_count(&self) -> usize {
		self.frame_count
	}

	/// Returns the frame width.
	#[inline]
	pub fn frame_width(&self) -> u32 {
		self.frame_width
	}

	/// Returns the frame height.
	#[inline]
	pub fn frame_height(&self) -> u32 {
		self.frame_height
	}

	/// Returns the source images.
	#[inline]
	pub fn sources(&self) -> &[Rc<S>] {
		&self.sources
	}

	/// Returns the source image a slot points at.
	pub fn source(&self, slot: &FrameSlot) -> Option<&Rc<S>> {
		self.sources.get(slot.source_index)
	}

	/// Returns the source rectangle of `slot`.
	#[inline]
	pub fn frame_rect(&self, slot: &FrameSlot) -> Rect {
		slot.source_rect(self.frame_width, self.frame_height)
	}

	/// Computes the grid offset of the `index`-th frame of a sheet.
	///
	/// `columns` must be non-zero.
	pub(crate) fn grid_offset(&self, index: usize, columns: u32) -> (u32, u32) {
		let columns = columns as usize;
		let col = (index % columns) as u32;
		let row = (index / columns) as u32;
		(col.saturating_mul(self.frame_width), row.saturating_mul(self.frame_height))
	}
}

impl<S: SourceImage> FrameGrid<S> {
	/// Checks the size fields and the source list.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::ZeroDimension`] for a zero frame size and
	/// [`ConfigError::NoSources`] when no source image was given.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.frame_width == 0 {
			return Err(ConfigError::ZeroDimension {
				field: "frame width",
			});
		}
		if self.frame_height == 0 {
			return Err(ConfigError::ZeroDimension {
				field: "frame height",
			});
		}
		if self.sources.is_empty() {
			return Err(ConfigError::NoSources);
		}
		Ok(())
	}
}

impl<S> Clone for FrameGrid<S> {
	fn clone(&self) -> Self {
		Self {
			columns: self.columns,
			frame_count: self.frame_count,
			frame_width: self.frame_width,
			frame_height: self.frame_height,
			sources: self.sources.clone(),
		}
	}
}

impl<S> fmt::Debug for FrameGrid<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FrameGrid")
			.field("columns", &self.columns)
			.field("frame_count", &self.frame_count)
			.field("frame_width", &self.frame_width)
			.field("frame_height", &self.frame_height)
			.field("sources", &self.sources.len())
			.finish()
	}
}
