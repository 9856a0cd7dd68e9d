//! Capabilities the playback core needs from the host's raster surface.
//!
//! The core never rasterises anything itself. It asks a [`RenderTarget`] to
//! clear regions and to copy rectangles out of [`SourceImage`]s, and the host
//! decides what those operations mean (a software canvas, a GPU texture atlas,
//! a terminal, a recording double in tests).

use std::{cell::RefCell, rc::Rc};

use image::RgbaImage;

use crate::{error::DrawError, geometry::Rect};

/// An image frames can be sampled from.
pub trait SourceImage {
	/// Width in pixels.
	fn width(&self) -> u32;

	/// Height in pixels.
	fn height(&self) -> u32;

	/// Whether the image can be sampled right now.
	///
	/// Images that are still loading report zero dimensions, so the default
	/// treats any empty image as not ready.
	fn is_ready(&self) -> bool {
		self.width() > 0 && self.height() > 0
	}
}

impl SourceImage for RgbaImage {
	fn width(&self) -> u32 {
		image::ImageBuffer::width(self)
	}

	fn height(&self) -> u32 {
		image::ImageBuffer::height(self)
	}
}

/// A drawable surface shared by all animations of a stage.
pub trait RenderTarget {
	/// Image type that frames are copied from.
	type Source: SourceImage;

	/// Current width in pixels.
	fn width(&self) -> u32;

	/// Current height in pixels.
	fn height(&self) -> u32;

	/// Resizes the surface. Existing content may be discarded.
	fn resize(&mut self, width: u32, height: u32);

	/// Clears `region` to transparent.
	fn clear_region(&mut self, region: Rect);

	/// Copies `src` out of `source` into `dest` on this surface.
	///
	/// # Errors
	///
	/// Returns a [`DrawError`] when the surface cannot perform the copy right
	/// now. Callers treat this as a transient failure.
	fn blit(&mut self, source: &Self::Source, src: Rect, dest: Rect) -> Result<(), DrawError>;

	/// Clears the whole surface.
	fn clear(&mut self) {
		let full = Rect::new(0, 0, self.width(), self.height());
		self.clear_region(full);
	}
}

/// A render target shared between a scheduler and its sequencers.
///
/// Playback is single-threaded, so shared ownership is an `Rc` and exclusive
/// access during a draw is a `RefCell` borrow.
pub type SharedTarget<T> = Rc<RefCell<T>>;

/// Wraps a render target for sharing.
pub fn share<T: RenderTarget>(target: T) -> SharedTarget<T> {
	Rc::new(RefCell::new(target))
}
