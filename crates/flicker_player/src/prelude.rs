//! Prelude module for `flicker_player`.
//!
//! # Examples
//!
//! ```
//! use flicker_player::prelude::*;
//!
//! let stage = StageConfig::new(20.0, 200, 200);
//! assert_eq!(stage.tick_interval_ms(), 50.0);
//! ```

#[doc(inline)]
pub use crate::{
	// Animations
	AnimationSpec,
	CompletionCallback,
	FrameSequencer,
	SequencerId,

	// Scheduling
	PlaybackScheduler,
	StageConfig,
	TickOutcome,

	// Pacing
	FramePacer,
	ManualPacer,
	RealtimePacer,

	// Scenes
	AnimationEntry,
	SceneConfig,
	SceneError,
};
