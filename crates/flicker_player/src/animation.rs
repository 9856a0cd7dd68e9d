//! Animation configuration handed to a sequencer.

use std::fmt;

use flicker_types::{FrameGrid, LoopCount, Point, RenderTarget};

use crate::sequencer::FrameSequencer;

/// Callback invoked once when a sequencer exhausts its loops.
///
/// The callback receives the sequencer itself, so it can release it back to
/// the pool, reverse it, seek, or configure it with a new animation.
pub type CompletionCallback<T> = Box<dyn FnMut(&mut FrameSequencer<T>)>;

/// Everything a [`FrameSequencer`] needs to play one animation.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
///
/// use flicker_player::AnimationSpec;
/// use flicker_types::{Canvas, FrameGrid, LoopCount, Point};
/// use image::RgbaImage;
///
/// let sheet = Rc::new(RgbaImage::new(450, 72));
/// let spec: AnimationSpec<Canvas> =
/// 	AnimationSpec::new(FrameGrid::new(50, 72, 9).with_columns(9).with_source(sheet))
/// 		.with_loop_count(2)
/// 		.at(10, 20)
/// 		.on_complete(|sprite| sprite.release());
///
/// assert_eq!(spec.loop_count(), LoopCount::Remaining(2));
/// assert_eq!(spec.position(), Point::new(10, 20));
/// ```
pub struct AnimationSpec<T: RenderTarget> {
	/// Frame grid and source images
	frames: FrameGrid<T::Source>,

	/// Remaining play-throughs
	loop_count: LoopCount,

	/// Destination of the frame's top-left corner on the render target
	position: Point,

	/// Whether frames continue across several sheets
	multi_sheet: bool,

	/// Completion notification
	on_complete: Option<CompletionCallback<T>>,
}

impl<T: RenderTarget> AnimationSpec<T> {
	/// Creates an infinitely looping animation drawn at the origin.
	pub fn new(frames: FrameGrid<T::Source>) -> Self {
		Self {
			frames,
			loop_count: LoopCount::Infinite,
			position: Point::default(),
			multi_sheet: false,
			on_complete: None,
		}
	}

	/// Sets the loop count; negative values mean infinite.
	pub fn with_loop_count(mut self, loop_count: impl Into<LoopCount>) -> Self {
		self.loop_count = loop_count.into();
		self
	}

	/// Sets the destination position.
	pub fn at(mut self, x: i32, y: i32) -> Self {
		self.position = Point::new(x, y);
		self
	}

	/// Enables or disables multi-sheet packing.
	pub fn multi_sheet(mut self, multi_sheet: bool) -> Self {
		self.multi_sheet = multi_sheet;
		self
	}

	/// Sets the completion callback.
	pub fn on_complete<F>(mut self, callback: F) -> Self
	where
		F: FnMut(&mut FrameSequencer<T>) + 'static,
	{
		self.on_complete = Some(Box::new(callback));
		self
	}

	/// Returns the frame grid.
	#[inline]
	pub fn frames(&self) -> &FrameGrid<T::Source> {
		&self.frames
	}

	/// Returns the remaining loop count.
	#[inline]
	pub fn loop_count(&self) -> LoopCount {
		self.loop_count
	}

	/// Returns the destination position.
	#[inline]
	pub fn position(&self) -> Point {
		self.position
	}

	/// Returns `true` when frames are packed across several sheets.
	#[inline]
	pub fn is_multi_sheet(&self) -> bool {
		self.multi_sheet
	}

	/// Returns `true` when a completion callback is set.
	#[inline]
	pub fn has_completion_callback(&self) -> bool {
		self.on_complete.is_some()
	}

	pub(crate) fn loop_count_mut(&mut self) -> &mut LoopCount {
		&mut self.loop_count
	}

	pub(crate) fn take_callback(&mut self) -> Option<CompletionCallback<T>> {
		self.on_complete.take()
	}
}

impl<T: RenderTarget> fmt::Debug for AnimationSpec<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AnimationSpec")
			.field("frames", &self.frames)
			.field("loop_count", &self.loop_count)
			.field("position", &self.position)
			.field("multi_sheet", &self.multi_sheet)
			.field("on_complete", &self.on_complete.is_some())
			.finish()
	}
}
