//! Error types for animation configuration and drawing.

use thiserror::Error;

/// Errors raised when an animation, a frame grid or a stage is configured with
/// values that cannot be played back.
///
/// These are caller mistakes: they are reported at configuration time and the
/// offending value is never clamped into range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
	/// Grid and multi-sheet layouts need a column count
	#[error("Frame grid requires a non-zero column count in this layout mode")]
	MissingColumns,

	/// A size-like field was zero
	#[error("Invalid {field}: must be greater than zero")]
	ZeroDimension {
		/// Name of the offending field
		field: &'static str,
	},

	/// The frame grid has no source images at all
	#[error("Frame grid has no source images")]
	NoSources,

	/// One-frame-per-source layout with fewer sources than frames
	#[error("Frame count {frame_count} exceeds the {sources} available source images")]
	SourceCountMismatch {
		/// Number of logical frames requested
		frame_count: usize,
		/// Number of source images provided
		sources: usize,
	},

	/// Multi-sheet packing ran out of source images
	#[error(
		"Frame count {frame_count} exceeds multi-sheet capacity: sources can hold only {capacity} frames"
	)]
	SheetCapacityExceeded {
		/// Number of logical frames requested
		frame_count: usize,
		/// Number of frames the sources can hold
		capacity: usize,
	},

	/// Seek target outside the frame sequence
	#[error("Frame index {index} out of range (frame count: {count})")]
	FrameOutOfRange {
		/// Requested frame index
		index: usize,
		/// Number of frames in the sequence
		count: usize,
	},

	/// Frame rate not strictly positive or not finite
	#[error("Invalid frame rate {0}: must be a finite value greater than zero")]
	InvalidFps(f64),

	/// Stage size with a zero dimension
	#[error("Invalid stage size {width}x{height}: both dimensions must be greater than zero")]
	InvalidStageSize {
		/// Requested stage width
		width: u32,
		/// Requested stage height
		height: u32,
	},
}

/// Transient failures of a single draw step.
///
/// A draw failure never aborts playback: the sequencer logs it, skips the blit
/// and still advances to the next frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
	/// The referenced source image cannot be sampled yet
	#[error("Source image {source_index} is not ready for drawing")]
	SourceNotReady {
		/// Index of the source image in the frame grid
		source_index: usize,
	},

	/// The frame slot points past the frame grid's sources
	#[error("Source image {source_index} does not exist")]
	SourceMissing {
		/// Index of the source image in the frame grid
		source_index: usize,
	},

	/// No render target has been attached
	#[error("No render target attached")]
	SurfaceDetached,

	/// The render target is borrowed elsewhere
	#[error("Render target is busy")]
	SurfaceBusy,

	/// The render target refused the operation
	#[error("Render target lost: {0}")]
	SurfaceLost(String),
}
