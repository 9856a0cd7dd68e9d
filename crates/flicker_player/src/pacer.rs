//! Sources of per-frame callback timestamps.
//!
//! On the web a scheduler re-registers itself with the browser's animation
//! frame callback after every tick. Here the same role is played by a
//! [`FramePacer`]: each call to [`FramePacer::next_frame`] waits for the next
//! native frame and yields its timestamp in milliseconds.

use std::{
	collections::VecDeque,
	thread,
	time::{Duration, Instant},
};

/// Yields monotonic frame timestamps in milliseconds.
pub trait FramePacer {
	/// Waits for the next frame and returns its timestamp, or `None` when no
	/// further frames will come.
	fn next_frame(&mut self) -> Option<f64>;
}

impl<F> FramePacer for F
where
	F: FnMut() -> Option<f64>,
{
	fn next_frame(&mut self) -> Option<f64> {
		self()
	}
}

/// Replays a fixed list of timestamps without waiting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManualPacer {
	timestamps: VecDeque<f64>,
}

impl ManualPacer {
	/// Creates a pacer that yields `timestamps` in order.
	pub fn new<I>(timestamps: I) -> Self
	where
		I: IntoIterator<Item = f64>,
	{
		Self {
			timestamps: timestamps.into_iter().collect(),
		}
	}

	/// Creates a pacer yielding `count` frames `step_ms` apart, the first one
	/// at `step_ms`.
	pub fn every(step_ms: f64, count: usize) -> Self {
		let mut timestamps = VecDeque::with_capacity(count);
		let mut now = 0.0;
		for _ in 0..count {
			now += step_ms;
			timestamps.push_back(now);
		}
		Self {
			timestamps,
		}
	}

	/// Appends a timestamp.
	pub fn push(&mut self, timestamp_ms: f64) {
		self.timestamps.push_back(timestamp_ms);
	}

	/// Returns the number of frames left.
	pub fn remaining(&self) -> usize {
		self.timestamps.len()
	}
}

impl FramePacer for ManualPacer {
	fn next_frame(&mut self) -> Option<f64> {
		self.timestamps.pop_front()
	}
}

/// Sleeps until the next native refresh and yields wall-clock milliseconds
/// since the pacer was created.
#[derive(Debug, Clone)]
pub struct RealtimePacer {
	origin: Instant,
	frame: Duration,
	next_deadline: Instant,
	budget: Option<u64>,
}

impl RealtimePacer {
	/// Default native refresh rate
	pub const DEFAULT_REFRESH_HZ: f64 = 60.0;

	/// Creates a pacer firing `refresh_hz` times per second.
	///
	/// Non-positive or non-finite rates fall back to
	/// [`DEFAULT_REFRESH_HZ`](Self::DEFAULT_REFRESH_HZ).
	pub fn new(refresh_hz: f64) -> Self {
		let hz = if refresh_hz.is_finite() && refresh_hz > 0.0 {
			refresh_hz
		} else {
			Self::DEFAULT_REFRESH_HZ
		};
		let origin = Instant::now();
		let frame = Duration::from_secs_f64(1.0 / hz);

		Self {
			origin,
			frame,
			next_deadline: origin + frame,
			budget: None,
		}
	}

	/// Limits the pacer to `frames` more frames.
	pub fn with_budget(mut self, frames: u64) -> Self {
		self.budget = Some(frames);
		self
	}

	/// Returns the time between native frames.
	pub fn frame_duration(&self) -> Duration {
		self.frame
	}
}

impl Default for RealtimePacer {
	fn default() -> Self {
		Self::new(Self::DEFAULT_REFRESH_HZ)
	}
}

impl FramePacer for RealtimePacer {
	fn next_frame(&mut self) -> Option<f64> {
		if let Some(budget) = self.budget.as_mut() {
			if *budget == 0 {
				return None;
			}
			*budget -= 1;
		}

		let now = Instant::now();
		if self.next_deadline > now {
			thread::sleep(self.next_deadline - now);
		}
		// A stalled host skips missed frames instead of replaying them
		self.next_deadline = Instant::now().max(self.next_deadline) + self.frame;

		Some(self.origin.elapsed().as_secs_f64() * 1000.0)
	}
}
