//! This module is separated into its own crate to enable simple dynamic linking for `flicker`, and should not be used directly.

/// `use flicker::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export member crates for convenience
pub use flicker_player;
pub use flicker_types;

// Re-export commonly used types at crate root
pub use flicker_player::{
	AnimationEntry, AnimationSpec, FramePacer, FrameSequencer, ManualPacer, PlaybackScheduler,
	RealtimePacer, SceneConfig, SceneError, SequencerId, StageConfig, TickOutcome,
};
pub use flicker_types::{
	Canvas, ConfigError, Direction, DrawError, FrameGrid, LoopCount, Point, Rect, RenderTarget,
	SourceImage,
};
