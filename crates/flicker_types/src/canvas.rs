//! Software raster target backed by an RGBA image buffer.

use std::{fmt, path::Path};

use image::{ImageResult, Pixel, Rgba, RgbaImage};

use crate::{error::DrawError, geometry::Rect, surface::RenderTarget};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// In-memory RGBA canvas.
///
/// Blits are clipped to both the source image and the canvas, sample with
/// nearest-neighbour when the source and destination sizes differ, and
/// composite with source-over alpha blending.
///
/// # Examples
///
/// ```
/// use flicker_types::{Canvas, Rect, RenderTarget};
/// use image::{Rgba, RgbaImage};
///
/// let sheet = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
/// let mut canvas = Canvas::new(8, 8);
///
/// canvas.blit(&sheet, Rect::new(0, 0, 2, 2), Rect::new(6, 6, 2, 2)).unwrap();
/// assert_eq!(canvas.pixel(7, 7), Some(Rgba([255, 0, 0, 255])));
/// assert_eq!(canvas.pixel(5, 5), Some(Rgba([0, 0, 0, 0])));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
	pixels: RgbaImage,
}

impl Canvas {
	/// Creates a transparent canvas.
	pub fn new(width: u32, height: u32) -> Self {
		Self {
			pixels: RgbaImage::from_pixel(width, height, TRANSPARENT),
		}
	}

	/// Returns the backing image.
	#[inline]
	pub fn image(&self) -> &RgbaImage {
		&self.pixels
	}

	/// Consumes the canvas and returns the backing image.
	pub fn into_image(self) -> RgbaImage {
		self.pixels
	}

	/// Returns the pixel at (`x`, `y`), or `None` outside the canvas.
	pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
		self.pixels.get_pixel_checked(x, y).copied()
	}

	/// Saves the canvas; the format is inferred from the path extension.
	///
	/// # Errors
	///
	/// Returns an error if the image cannot be encoded or written.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
		self.pixels.save(path)
	}

	fn bounds(&self) -> Rect {
		Rect::new(0, 0, self.pixels.width(), self.pixels.height())
	}
}

impl RenderTarget for Canvas {
	type Source = RgbaImage;

	fn width(&self) -> u32 {
		self.pixels.width()
	}

	fn height(&self) -> u32 {
		self.pixels.height()
	}

	fn resize(&mut self, width: u32, height: u32) {
		self.pixels = RgbaImage::from_pixel(width, height, TRANSPARENT);
	}

	fn clear_region(&mut self, region: Rect) {
		let Some(area) = region.intersect(&self.bounds()) else {
			return;
		};

		// Intersection with the canvas bounds keeps every coordinate non-negative.
		let (left, top) = (area.x as u32, area.y as u32);
		for y in top..top + area.height {
			for x in left..left + area.width {
				self.pixels.put_pixel(x, y, TRANSPARENT);
			}
		}
	}

	fn blit(&mut self, source: &RgbaImage, src: Rect, dest: Rect) -> Result<(), DrawError> {
		if src.is_empty() || dest.is_empty() {
			return Ok(());
		}

		let source_bounds = Rect::new(0, 0, source.width(), source.height());
		let Some(visible) = dest.intersect(&self.bounds()) else {
			return Ok(());
		};

		let (dx0, dy0) = (visible.x as u32, visible.y as u32);
		for y in dy0..dy0 + visible.height {
			let rel_y = i64::from(y) - i64::from(dest.y);
			let sy = i64::from(src.y) + rel_y * i64::from(src.height) / i64::from(dest.height);
			if sy < i64::from(source_bounds.y) || sy >= source_bounds.bottom() {
				continue;
			}

			for x in dx0..dx0 + visible.width {
				let rel_x = i64::from(x) - i64::from(dest.x);
				let sx = i64::from(src.x) + rel_x * i64::from(src.width) / i64::from(dest.width);
				if sx < i64::from(source_bounds.x) || sx >= source_bounds.right() {
					continue;
				}

				let texel = *source.get_pixel(sx as u32, sy as u32);
				self.pixels.get_pixel_mut(x, y).blend(&texel);
			}
		}

		Ok(())
	}
}

impl fmt::Debug for Canvas {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Canvas")
			.field("width", &self.pixels.width())
			.field("height", &self.pixels.height())
			.finish()
	}
}
