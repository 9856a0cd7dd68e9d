//! Per-animation playback state machine.
//!
//! A [`FrameSequencer`] owns one animation: its frame slots, the current frame,
//! the playback direction and the remaining loop count. Every call to
//! [`FrameSequencer::draw`] renders the current frame and steps to the next.
//!
//! # Playback Steps
//!
//! ```text
//! draw()
//!   completed?                      -> no-op
//!   loops exhausted?                -> latch completed, fire on_complete, no render
//!   render current frame            (failures are logged, never raised)
//!   forward, not at last frame      -> index += 1
//!   reverse, not at first frame     -> index -= 1
//!   otherwise (boundary)            -> wrap to first/last frame, loops -= 1
//! ```

use std::{
	fmt,
	sync::atomic::{AtomicU64, Ordering},
};

use flicker_types::{
	ConfigError, Direction, DrawError, FrameSlot, LoopCount, Rect, RenderTarget, SharedTarget,
	SourceImage, compute_slots,
};
use log::{debug, info, warn};

use crate::animation::{AnimationSpec, CompletionCallback};

static NEXT_SEQUENCER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequencerId(u64);

impl SequencerId {
	fn next() -> Self {
		Self(NEXT_SEQUENCER_ID.fetch_add(1, Ordering::Relaxed))
	}

	/// Returns the raw identifier.
	#[inline]
	pub fn get(self) -> u64 {
		self.0
	}
}

impl fmt::Display for SequencerId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Plays one frame-based animation on a shared render target.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
///
/// use flicker_player::{AnimationSpec, FrameSequencer};
/// use flicker_types::{Canvas, Direction, FrameGrid, LoopCount, share};
/// use image::RgbaImage;
///
/// # fn main() -> Result<(), flicker_types::ConfigError> {
/// let sheet = Rc::new(RgbaImage::new(450, 72));
/// let grid = FrameGrid::new(50, 72, 9).with_columns(9).with_source(sheet);
///
/// let mut sprite = FrameSequencer::new(AnimationSpec::<Canvas>::new(grid).with_loop_count(1))?;
/// sprite.attach_surface(share(Canvas::new(200, 200)));
///
/// sprite.draw();
/// assert_eq!(sprite.current_frame(), 1);
/// assert_eq!(sprite.direction(), Direction::Forward);
///
/// for _ in 0..8 {
/// 	sprite.draw();
/// }
/// assert_eq!(sprite.current_frame(), 0);
/// assert_eq!(sprite.loop_count(), LoopCount::Remaining(0));
/// # Ok(())
/// # }
/// ```
pub struct FrameSequencer<T: RenderTarget> {
	id: SequencerId,

	/// Active configuration, without its callback
	spec: AnimationSpec<T>,

	on_complete: Option<CompletionCallback<T>>,

	/// One slot per logical frame, recomputed on every configure
	slots: Vec<FrameSlot>,

	current_frame: usize,
	direction: Direction,

	/// Latched once the loops ran out and the callback fired
	completed: bool,

	/// Pool availability, managed by the scheduler
	free: bool,

	/// Bumped on every configure so a callback that reconfigures is detected
	generation: u64,

	surface: Option<SharedTarget<T>>,
}

impl<T: RenderTarget> FrameSequencer<T> {
	/// Creates a sequencer for `spec`.
	///
	/// # Errors
	///
	/// Returns a [`ConfigError`] when the frame grid cannot be laid out.
	pub fn new(spec: AnimationSpec<T>) -> Result<Self, ConfigError> {
		let mut spec = spec;
		let slots = compute_slots(spec.frames(), spec.is_multi_sheet())?;
		let on_complete = spec.take_callback();

		Ok(Self {
			id: SequencerId::next(),
			spec,
			on_complete,
			slots,
			current_frame: 0,
			direction: Direction::Forward,
			completed: false,
			free: false,
			generation: 0,
			surface: None,
		})
	}

	/// Replaces the animation and resets playback.
	///
	/// The frame slots are recomputed, the current frame returns to 0, the
	/// direction to forward, and the sequencer is neither completed nor free.
	/// The render target binding is kept.
	///
	/// # Errors
	///
	/// Returns a [`ConfigError`] when the frame grid cannot be laid out. The
	/// sequencer is left untouched in that case.
	pub fn configure(&mut self, spec: AnimationSpec<T>) -> Result<&mut Self, ConfigError> {
		let mut spec = spec;
		let slots = compute_slots(spec.frames(), spec.is_multi_sheet())?;

		self.on_complete = spec.take_callback();
		self.spec = spec;
		self.slots = slots;
		self.current_frame = 0;
		self.direction = Direction::Forward;
		self.completed = false;
		self.free = false;
		self.generation = self.generation.wrapping_add(1);

		debug!("Sequencer {} configured with {} frames", self.id, self.slots.len());
		Ok(self)
	}

	/// Binds the render target used by later draws and seeks.
	pub fn attach_surface(&mut self, surface: SharedTarget<T>) {
		self.surface = Some(surface);
	}

	/// Returns the bound render target.
	pub fn surface(&self) -> Option<&SharedTarget<T>> {
		self.surface.as_ref()
	}

	/// Renders the current frame and steps to the next one.
	///
	/// Once the loop count reaches zero the next call fires the completion
	/// callback instead of rendering, and every call after that is a no-op
	/// until the sequencer is configured again or seeks.
	///
	/// Draw failures are logged and skipped; playback still advances.
	pub fn draw(&mut self) {
		if self.completed || self.slots.is_empty() {
			return;
		}

		if self.spec.loop_count().is_exhausted() {
			self.completed = true;
			info!("Sequencer {} completed", self.id);
			self.notify_complete();
			return;
		}

		if let Err(err) = self.render(self.current_frame) {
			warn!("Sequencer {} skipped frame {}: {}", self.id, self.current_frame, err);
		}

		self.advance();
	}

	/// Jumps to `frame_index`, clears the render target and draws that frame
	/// immediately.
	///
	/// Clears the completed flag. Loop count and direction are unchanged.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::FrameOutOfRange`] when `frame_index` is not a
	/// valid frame.
	pub fn seek(&mut self, frame_index: usize) -> Result<(), ConfigError> {
		if frame_index >= self.slots.len() {
			return Err(ConfigError::FrameOutOfRange {
				index: frame_index,
				count: self.slots.len(),
			});
		}

		self.completed = false;
		match self.surface.as_ref().map(|surface| surface.try_borrow_mut()) {
			Some(Ok(mut target)) => target.clear(),
			Some(Err(_)) => warn!("Sequencer {} could not clear a busy render target", self.id),
			None => {}
		}
		self.current_frame = frame_index;

		if let Err(err) = self.render(frame_index) {
			warn!("Sequencer {} skipped frame {}: {}", self.id, frame_index, err);
		}
		Ok(())
	}

	/// Marks the sequencer as free for reuse by the scheduler's pool.
	///
	/// A free sequencer stays attached but is no longer drawn.
	pub fn release(&mut self) {
		if !self.free {
			debug!("Sequencer {} released to pool", self.id);
		}
		self.free = true;
	}

	/// Drops the render target binding and the completion callback.
	pub fn destroy(&mut self) {
		debug!("Sequencer {} destroyed", self.id);
		self.surface = None;
		self.on_complete = None;
	}

	/// Sets the playback direction; the current frame is kept.
	pub fn set_direction(&mut self, direction: Direction) {
		self.direction = direction;
	}

	/// Returns the identity of this sequencer.
	#[inline]
	pub fn id(&self) -> SequencerId {
		self.id
	}

	/// Returns the active configuration.
	#[inline]
	pub fn spec(&self) -> &AnimationSpec<T> {
		&self.spec
	}

	/// Returns the computed frame slots.
	#[inline]
	pub fn frames(&self) -> &[FrameSlot] {
		&self.slots
	}

	/// Returns the index of the frame the next draw renders.
	#[inline]
	pub fn current_frame(&self) -> usize {
		self.current_frame
	}

	/// Returns the playback direction.
	#[inline]
	pub fn direction(&self) -> Direction {
		self.direction
	}

	/// Returns the remaining loop count.
	#[inline]
	pub fn loop_count(&self) -> LoopCount {
		self.spec.loop_count()
	}

	/// Returns `true` once playback finished and the callback fired.
	#[inline]
	pub fn is_completed(&self) -> bool {
		self.completed
	}

	/// Returns `true` while the sequencer sits in the pool.
	#[inline]
	pub fn is_free(&self) -> bool {
		self.free
	}

	/// Returns `true` when a completion callback is set.
	#[inline]
	pub fn has_completion_callback(&self) -> bool {
		self.on_complete.is_some()
	}

	fn advance(&mut self) {
		let last = self.slots.len() - 1;

		match self.direction {
			Direction::Forward if self.current_frame < last => self.current_frame += 1,
			Direction::Reverse if self.current_frame > 0 => self.current_frame -= 1,
			Direction::Forward => {
				self.current_frame = 0;
				self.spec.loop_count_mut().decrement();
			}
			Direction::Reverse => {
				self.current_frame = last;
				self.spec.loop_count_mut().decrement();
			}
		}
	}

	fn render(&self, frame_index: usize) -> Result<(), DrawError> {
		let slot = self.slots[frame_index];
		let grid = self.spec.frames();

		let source = grid.source(&slot).ok_or(DrawError::SourceMissing {
			source_index: slot.source_index,
		})?;
		if !source.is_ready() {
			return Err(DrawError::SourceNotReady {
				source_index: slot.source_index,
			});
		}

		let surface = self.surface.as_ref().ok_or(DrawError::SurfaceDetached)?;
		let mut target = surface.try_borrow_mut().map_err(|_| DrawError::SurfaceBusy)?;

		let src = grid.frame_rect(&slot);
		let dest = Rect::at(self.spec.position(), grid.frame_width(), grid.frame_height());
		target.blit(source, src, dest)
	}

	fn notify_complete(&mut self) {
		let Some(mut callback) = self.on_complete.take() else {
			return;
		};

		let generation = self.generation;
		callback(self);

		// A callback that reconfigured the sequencer installed its own callback
		if self.generation == generation {
			self.on_complete = Some(callback);
		}
	}
}

impl<T: RenderTarget> fmt::Debug for FrameSequencer<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FrameSequencer")
			.field("id", &self.id)
			.field("spec", &self.spec)
			.field("frames", &self.slots.len())
			.field("current_frame", &self.current_frame)
			.field("direction", &self.direction)
			.field("completed", &self.completed)
			.field("free", &self.free)
			.field("attached", &self.surface.is_some())
			.finish()
	}
}
