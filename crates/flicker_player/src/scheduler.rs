//! Fixed-tick driver for many sequencers sharing one render target.
//!
//! The host calls [`PlaybackScheduler::tick`] from its per-frame callback (or
//! hands a [`FramePacer`] to [`PlaybackScheduler::run`]). Each tick measures the
//! time since the last drawn tick; once a full interval has elapsed the whole
//! stage is cleared and every non-free sequencer draws one step, walking the
//! collection from the most recently attached to the first.
//!
//! The sequencer collection doubles as an object pool: finished sequencers are
//! released (marked free) instead of removed, and [`PlaybackScheduler::acquire`]
//! reconfigures the first free one before allocating a new instance.

use std::fmt;

use flicker_types::{ConfigError, Rect, RenderTarget, SharedTarget, share};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::{
	animation::AnimationSpec,
	pacer::FramePacer,
	sequencer::{FrameSequencer, SequencerId},
};

/// Stage settings: draw rate and render target size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
	/// Draws per second
	pub fps: f64,
	/// Render target width in pixels
	pub width: u32,
	/// Render target height in pixels
	pub height: u32,
}

impl StageConfig {
	/// Creates a stage configuration.
	pub fn new(fps: f64, width: u32, height: u32) -> Self {
		Self {
			fps,
			width,
			height,
		}
	}

	/// Checks the frame rate and the stage size.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::InvalidFps`] for a frame rate that is not a
	/// finite positive number, and [`ConfigError::InvalidStageSize`] when a
	/// dimension is zero.
	pub fn validate(&self) -> Result<(), ConfigError> {
		validate_fps(self.fps)?;
		if self.width == 0 || self.height == 0 {
			return Err(ConfigError::InvalidStageSize {
				width: self.width,
				height: self.height,
			});
		}
		Ok(())
	}

	/// Returns the target interval between drawn ticks in milliseconds.
	pub fn tick_interval_ms(&self) -> f64 {
		1000.0 / self.fps
	}
}

fn validate_fps(fps: f64) -> Result<(), ConfigError> {
	if fps.is_finite() && fps > 0.0 {
		Ok(())
	} else {
		Err(ConfigError::InvalidFps(fps))
	}
}

/// Result of one [`PlaybackScheduler::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
	/// The scheduler is stopped; do not schedule another tick
	Stopped,
	/// Not enough time has passed; nothing was drawn
	Throttled,
	/// The stage was cleared and redrawn
	Drawn {
		/// Number of sequencers asked to draw
		sequencers: usize,
	},
}

impl TickOutcome {
	/// Returns `true` when the host should schedule another tick.
	#[inline]
	pub fn should_reschedule(self) -> bool {
		!matches!(self, Self::Stopped)
	}
}

/// Draws a collection of sequencers on one shared render target at a fixed
/// rate.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
///
/// use flicker_player::{AnimationSpec, ManualPacer, PlaybackScheduler, StageConfig};
/// use flicker_types::{Canvas, FrameGrid};
/// use image::RgbaImage;
///
/// # fn main() -> Result<(), flicker_types::ConfigError> {
/// let sheet = Rc::new(RgbaImage::new(450, 72));
/// let mut scheduler = PlaybackScheduler::new(StageConfig::new(20.0, 200, 200), Canvas::new(1, 1))?;
///
/// let grid = FrameGrid::new(50, 72, 9).with_columns(9).with_source(sheet);
/// let id = scheduler.acquire(AnimationSpec::new(grid).with_loop_count(1))?.id();
///
/// scheduler.start();
/// // 20 fps: one draw every 50 ms
/// let drawn = scheduler.run(&mut ManualPacer::every(50.0, 4));
/// assert_eq!(drawn, 4);
/// assert_eq!(scheduler.get(id).unwrap().current_frame(), 4);
/// # Ok(())
/// # }
/// ```
pub struct PlaybackScheduler<T: RenderTarget> {
	surface: SharedTarget<T>,
	width: u32,
	height: u32,

	tick_interval_ms: f64,
	last_tick_ms: f64,
	stopped: bool,

	/// Draw order is the reverse of this order
	sequencers: Vec<FrameSequencer<T>>,
}

impl<T: RenderTarget> PlaybackScheduler<T> {
	/// Creates a scheduler and resizes `surface` to the stage size.
	///
	/// # Errors
	///
	/// Returns a [`ConfigError`] when `config` is invalid; see
	/// [`StageConfig::validate`].
	pub fn new(config: StageConfig, surface: T) -> Result<Self, ConfigError> {
		Self::with_shared_surface(config, share(surface))
	}

	/// Creates a scheduler drawing on an already shared render target.
	///
	/// The target is left at its current size when it is borrowed elsewhere.
	///
	/// # Errors
	///
	/// Returns a [`ConfigError`] when `config` is invalid.
	pub fn with_shared_surface(
		config: StageConfig,
		surface: SharedTarget<T>,
	) -> Result<Self, ConfigError> {
		config.validate()?;
		match surface.try_borrow_mut() {
			Ok(mut target) => target.resize(config.width, config.height),
			Err(_) => warn!("Render target busy, not resized to {}x{}", config.width, config.height),
		}

		Ok(Self {
			surface,
			width: config.width,
			height: config.height,
			tick_interval_ms: config.tick_interval_ms(),
			last_tick_ms: 0.0,
			stopped: false,
			sequencers: Vec::new(),
		})
	}

	/// Changes the draw rate; takes effect on the next tick.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::InvalidFps`] for a non-positive or non-finite rate.
	pub fn set_fps(&mut self, fps: f64) -> Result<(), ConfigError> {
		validate_fps(fps)?;
		self.tick_interval_ms = 1000.0 / fps;
		Ok(())
	}

	/// Returns the current draw rate.
	#[inline]
	pub fn fps(&self) -> f64 {
		1000.0 / self.tick_interval_ms
	}

	/// Returns the target interval between drawn ticks in milliseconds.
	#[inline]
	pub fn tick_interval_ms(&self) -> f64 {
		self.tick_interval_ms
	}

	/// Returns the shared render target.
	#[inline]
	pub fn surface(&self) -> &SharedTarget<T> {
		&self.surface
	}

	/// Binds the render target to `sequencer` and adds it on top of the draw
	/// order.
	pub fn attach(&mut self, mut sequencer: FrameSequencer<T>) -> SequencerId {
		sequencer.attach_surface(self.surface.clone());
		let id = sequencer.id();
		debug!("Attached sequencer {} ({} total)", id, self.sequencers.len() + 1);
		self.sequencers.push(sequencer);
		id
	}

	/// Removes the sequencer with identity `id` and hands it back.
	pub fn detach(&mut self, id: SequencerId) -> Option<FrameSequencer<T>> {
		let index = self.sequencers.iter().position(|s| s.id() == id)?;
		debug!("Detached sequencer {}", id);
		Some(self.sequencers.remove(index))
	}

	/// Returns a sequencer playing `spec`, reusing a free one when possible.
	///
	/// The first free sequencer in attachment order is reconfigured. When
	/// none is free a new sequencer is created, bound to the render target and
	/// attached.
	///
	/// # Errors
	///
	/// Returns a [`ConfigError`] when `spec` cannot be laid out.
	pub fn acquire(&mut self, spec: AnimationSpec<T>) -> Result<&mut FrameSequencer<T>, ConfigError> {
		if let Some(index) = self.sequencers.iter().position(FrameSequencer::is_free) {
			debug!("Reusing pooled sequencer {}", self.sequencers[index].id());
			let surface = self.surface.clone();
			let sequencer = &mut self.sequencers[index];
			sequencer.attach_surface(surface);
			return sequencer.configure(spec);
		}

		let sequencer = FrameSequencer::new(spec)?;
		self.attach(sequencer);
		let last = self.sequencers.len() - 1;
		Ok(&mut self.sequencers[last])
	}

	/// Returns the sequencer with identity `id` to the pool.
	///
	/// Returns `false` when no such sequencer is attached.
	pub fn release(&mut self, id: SequencerId) -> bool {
		match self.get_mut(id) {
			Some(sequencer) => {
				sequencer.release();
				true
			}
			None => false,
		}
	}

	/// Returns the attached sequencer with identity `id`.
	pub fn get(&self, id: SequencerId) -> Option<&FrameSequencer<T>> {
		self.sequencers.iter().find(|s| s.id() == id)
	}

	/// Returns the attached sequencer with identity `id` mutably.
	pub fn get_mut(&mut self, id: SequencerId) -> Option<&mut FrameSequencer<T>> {
		self.sequencers.iter_mut().find(|s| s.id() == id)
	}

	/// Iterates over all attached sequencers in attachment order.
	pub fn iter(&self) -> impl Iterator<Item = &FrameSequencer<T>> {
		self.sequencers.iter()
	}

	/// Returns the number of attached sequencers, free ones included.
	#[inline]
	pub fn len(&self) -> usize {
		self.sequencers.len()
	}

	/// Returns `true` when no sequencer is attached.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.sequencers.is_empty()
	}

	/// Returns the number of sequencers that are drawn each tick.
	pub fn active_count(&self) -> usize {
		self.sequencers.iter().filter(|s| !s.is_free()).count()
	}

	/// Returns `true` when every drawn sequencer has completed.
	pub fn is_idle(&self) -> bool {
		self.sequencers.iter().all(|s| s.is_free() || s.is_completed())
	}

	/// Clears the stop flag so that ticks draw again.
	pub fn start(&mut self) {
		debug!("Scheduler started at {:.2} fps", self.fps());
		self.stopped = false;
	}

	/// Sets or clears the stop flag. A stopped scheduler ignores ticks until
	/// [`start`](Self::start) is called.
	pub fn set_stop(&mut self, stop: bool) {
		self.stopped = stop;
	}

	/// Stops the scheduler.
	pub fn stop(&mut self) {
		self.set_stop(true);
	}

	/// Returns `true` while the scheduler is stopped.
	#[inline]
	pub fn is_stopped(&self) -> bool {
		self.stopped
	}

	/// Runs one tick at `timestamp_ms` (monotonic milliseconds).
	///
	/// When at least one interval elapsed since the last drawn tick, the stage
	/// is cleared once and every non-free sequencer draws, last attached
	/// first. The last-tick timestamp is then moved to `timestamp_ms` minus the
	/// overshoot, which keeps the average rate at the configured fps.
	pub fn tick(&mut self, timestamp_ms: f64) -> TickOutcome {
		if self.stopped {
			return TickOutcome::Stopped;
		}

		let elapsed = timestamp_ms - self.last_tick_ms;
		if elapsed < self.tick_interval_ms {
			trace!("Tick at {:.3} ms throttled ({:.3} ms elapsed)", timestamp_ms, elapsed);
			return TickOutcome::Throttled;
		}

		match self.surface.try_borrow_mut() {
			Ok(mut target) => target.clear_region(Rect::new(0, 0, self.width, self.height)),
			Err(_) => warn!("Render target busy, stage not cleared"),
		}

		let mut drawn = 0;
		for sequencer in self.sequencers.iter_mut().rev() {
			if !sequencer.is_free() {
				sequencer.draw();
				drawn += 1;
			}
		}

		self.last_tick_ms = timestamp_ms - (elapsed % self.tick_interval_ms);
		TickOutcome::Drawn {
			sequencers: drawn,
		}
	}

	/// Ticks at every timestamp `pacer` yields until it runs dry or the
	/// scheduler is stopped. Returns the number of drawn ticks.
	pub fn run<P: FramePacer + ?Sized>(&mut self, pacer: &mut P) -> usize {
		let mut drawn_ticks = 0;
		while let Some(timestamp) = pacer.next_frame() {
			match self.tick(timestamp) {
				TickOutcome::Stopped => break,
				TickOutcome::Throttled => {}
				TickOutcome::Drawn {
					..
				} => drawn_ticks += 1,
			}
		}
		drawn_ticks
	}

	/// Stops the scheduler and destroys every sequencer.
	pub fn teardown(&mut self) {
		self.stop();
		debug!("Tearing down {} sequencers", self.sequencers.len());
		while let Some(mut sequencer) = self.sequencers.pop() {
			sequencer.destroy();
		}
	}
}

impl<T: RenderTarget> fmt::Debug for PlaybackScheduler<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PlaybackScheduler")
			.field("width", &self.width)
			.field("height", &self.height)
			.field("tick_interval_ms", &self.tick_interval_ms)
			.field("last_tick_ms", &self.last_tick_ms)
			.field("stopped", &self.stopped)
			.field("sequencers", &self.sequencers.len())
			.finish()
	}
}
