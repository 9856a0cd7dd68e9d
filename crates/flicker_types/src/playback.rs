//! Playback direction and loop bookkeeping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction in which a sequencer walks its frame slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	/// From the first frame towards the last
	#[default]
	Forward,
	/// From the last frame towards the first
	Reverse,
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Forward => write!(f, "forward"),
			Self::Reverse => write!(f, "reverse"),
		}
	}
}

/// Remaining full traversals of a frame sequence.
///
/// Converts from the signed convention used in scene files: any negative value
/// means [`LoopCount::Infinite`], `0` means already exhausted and a positive
/// value is the number of play-throughs left.
///
/// # Examples
///
/// ```
/// use flicker_types::LoopCount;
///
/// let mut loops = LoopCount::from(2);
/// loops.decrement();
/// assert_eq!(loops, LoopCount::Remaining(1));
/// loops.decrement();
/// assert!(loops.is_exhausted());
///
/// let mut forever = LoopCount::from(-1);
/// forever.decrement();
/// assert!(!forever.is_exhausted());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum LoopCount {
	/// Play forever
	#[default]
	Infinite,
	/// Play this many more times
	Remaining(u32),
}

impl LoopCount {
	/// Returns `true` once no traversals remain.
	#[inline]
	pub fn is_exhausted(self) -> bool {
		self == Self::Remaining(0)
	}

	/// Returns `true` for unbounded playback.
	#[inline]
	pub fn is_infinite(self) -> bool {
		self == Self::Infinite
	}

	/// Consumes one traversal. Infinite playback is unaffected.
	pub fn decrement(&mut self) {
		if let Self::Remaining(n) = self {
			*n = n.saturating_sub(1);
		}
	}
}

impl From<i32> for LoopCount {
	fn from(value: i32) -> Self {
		if value < 0 {
			Self::Infinite
		} else {
			Self::Remaining(value.unsigned_abs())
		}
	}
}

impl From<LoopCount> for i32 {
	fn from(value: LoopCount) -> Self {
		match value {
			LoopCount::Infinite => -1,
			LoopCount::Remaining(n) => i32::try_from(n).unwrap_or(i32::MAX),
		}
	}
}

impl fmt::Display for LoopCount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Infinite => write!(f, "infinite"),
			Self::Remaining(n) => write!(f, "{n}"),
		}
	}
}
