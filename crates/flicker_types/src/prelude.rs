//! Prelude module for `flicker_types`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```
//! use flicker_types::prelude::*;
//!
//! let canvas = Canvas::new(64, 64);
//! assert_eq!(canvas.width(), 64);
//! assert_eq!(LoopCount::from(-1), LoopCount::Infinite);
//! ```

#[doc(inline)]
pub use crate::{
	// Errors
	ConfigError,
	DrawError,

	// Layout
	FrameGrid,
	FrameSlot,
	LayoutMode,
	compute_slots,

	// Playback values
	Direction,
	LoopCount,

	// Geometry
	Point,
	Rect,

	// Surfaces
	Canvas,
	RenderTarget,
	SharedTarget,
	SourceImage,
	share,
};
