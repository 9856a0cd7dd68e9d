//! Frame layout: mapping logical frames onto source image rectangles.
//!
//! A frame grid is turned into an ordered list of [`FrameSlot`]s once, when an
//! animation is configured. Playback then only indexes into that list.
//!
//! # Layout Modes
//!
//! ```text
//! Grid         one sheet, frames in rows of `columns`
//!              frame i -> (i % columns * w, i / columns * h) on source 0
//!
//! PerSource    several images, one frame each
//!              frame i -> (0, 0) on source i
//!
//! MultiSheet   frames continue across sheets using the grid formula;
//!              a sheet is exhausted once a frame's right edge reaches the
//!              sheet width and its bottom edge reaches the sheet height
//! ```
//!
//! The mode is derived from the grid and the multi-sheet flag by
//! [`LayoutMode::resolve`].
//!
//! # Examples
//!
//! ```
//! use std::rc::Rc;
//!
//! use flicker_types::{FrameGrid, FrameSlot, compute_slots};
//! use image::RgbaImage;
//!
//! let sheet = Rc::new(RgbaImage::new(450, 72));
//! let grid = FrameGrid::new(50, 72, 9).with_columns(9).with_source(sheet);
//!
//! let slots = compute_slots(&grid, false)?;
//! assert_eq!(slots.len(), 9);
//! assert_eq!(slots[4], FrameSlot::new(0, 200, 0));
//! # Ok::<(), flicker_types::ConfigError>(())
//! ```

use std::num::NonZeroU32;

use crate::{error::ConfigError, surface::SourceImage};

pub mod grid;
pub mod slot;

pub use grid::FrameGrid;
pub use slot::FrameSlot;

/// How frames are distributed over the source images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
	/// A single sheet read row by row
	Grid {
		/// Frames per row
		columns: NonZeroU32,
	},

	/// One source image per frame
	PerSource,

	/// Frames packed contiguously across several sheets
	MultiSheet {
		/// Frames per row on every sheet
		columns: NonZeroU32,
	},
}

impl LayoutMode {
	/// Picks the layout mode for a frame grid.
	///
	/// Multi-sheet packing is used when requested. Otherwise a grid with more
	/// than one source is laid out one frame per source, and a single source is
	/// read as a grid.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::MissingColumns`] when a grid or multi-sheet layout
	/// has no non-zero column count, and [`ConfigError::NoSources`] for an empty
	/// source list.
	pub fn resolve<S>(grid: &FrameGrid<S>, multi_sheet: bool) -> Result<Self, ConfigError> {
		let columns = || {
			grid.columns().and_then(NonZeroU32::new).ok_or(ConfigError::MissingColumns)
		};

		match grid.sources().len() {
			0 => Err(ConfigError::NoSources),
			_ if multi_sheet => Ok(Self::MultiSheet {
				columns: columns()?,
			}),
			1 => Ok(Self::Grid {
				columns: columns()?,
			}),
			_ => Ok(Self::PerSource),
		}
	}

	/// Lays out every frame of `grid` in this mode.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::SourceCountMismatch`] when a per-source layout has
	/// fewer sources than frames, and [`ConfigError::SheetCapacityExceeded`]
	/// when multi-sheet packing runs out of sheets.
	///
	/// Multi-sheet packing reads the sheet sizes, so every source must already
	/// be loaded. A source that is still pending reports a 0x0 size, holds no
	/// frames and counts towards [`ConfigError::SheetCapacityExceeded`].
	pub fn slots<S: SourceImage>(&self, grid: &FrameGrid<S>) -> Result<Vec<FrameSlot>, ConfigError> {
		let count = grid.frame_count();

		match *self {
			Self::Grid {
				columns,
			} => Ok((0..count)
				.map(|i| {
					let (x, y) = grid.grid_offset(i, columns.get());
					FrameSlot::new(0, x, y)
				})
				.collect()),
			Self::PerSource => {
				if count > grid.sources().len() {
					return Err(ConfigError::SourceCountMismatch {
						frame_count: count,
						sources: grid.sources().len(),
					});
				}
				Ok((0..count).map(|i| FrameSlot::new(i, 0, 0)).collect())
			}
			Self::MultiSheet {
				columns,
			} => pack_sheets(grid, columns.get()),
		}
	}
}

/// Packs frames across the grid's sources, moving to the next sheet once the
/// current one is exhausted.
///
/// A sheet is exhausted after a frame reaching both its right and bottom
/// edges, or when the next frame would start below it or end past its right
/// edge.
fn pack_sheets<S: SourceImage>(
	grid: &FrameGrid<S>,
	columns: u32,
) -> Result<Vec<FrameSlot>, ConfigError> {
	let count = grid.frame_count();
	let mut slots = Vec::with_capacity(count);
	let mut sheet_index = 0;
	let mut sheet_frame = 0;

	for _ in 0..count {
		let (sheet, x, y) = loop {
			let Some(sheet) = grid.sources().get(sheet_index) else {
				return Err(ConfigError::SheetCapacityExceeded {
					frame_count: count,
					capacity: slots.len(),
				});
			};

			let (x, y) = grid.grid_offset(sheet_frame, columns);
			let right = u64::from(x) + u64::from(grid.frame_width());
			if y < sheet.height() && right <= u64::from(sheet.width()) {
				break (sheet, x, y);
			}
			sheet_index += 1;
			sheet_frame = 0;
		};
		slots.push(FrameSlot::new(sheet_index, x, y));

		let right = u64::from(x) + u64::from(grid.frame_width());
		let bottom = u64::from(y) + u64::from(grid.frame_height());
		if right >= u64::from(sheet.width()) && bottom >= u64::from(sheet.height()) {
			sheet_index += 1;
			sheet_frame = 0;
		} else {
			sheet_frame += 1;
		}
	}

	Ok(slots)
}

/// Validates `grid` and computes its frame slots.
///
/// The returned list always has exactly `grid.frame_count()` entries.
///
/// # Errors
///
/// Returns a [`ConfigError`] when the grid is malformed for the selected
/// layout mode; see [`FrameGrid::validate`], [`LayoutMode::resolve`] and
/// [`LayoutMode::slots`].
pub fn compute_slots<S: SourceImage>(
	grid: &FrameGrid<S>,
	multi_sheet: bool,
) -> Result<Vec<FrameSlot>, ConfigError> {
	grid.validate()?;
	LayoutMode::resolve(grid, multi_sheet)?.slots(grid)
}
