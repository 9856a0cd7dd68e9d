//! Playback engine of the `flicker-rs` project.
//!
//! # Contents
//!
//! - **Animations**: [`AnimationSpec`] describes what to play, with an optional
//!   [`CompletionCallback`]
//! - **Sequencing**: [`FrameSequencer`] steps through the frames of one animation
//! - **Scheduling**: [`PlaybackScheduler`] draws every attached sequencer at the
//!   stage rate and pools finished ones for reuse
//! - **Pacing**: [`FramePacer`] and its [`ManualPacer`] and [`RealtimePacer`]
//!   implementations drive [`PlaybackScheduler::run`]
//! - **Scenes**: [`SceneConfig`] loads a stage and its animations from a file

mod animation;
mod pacer;
mod scene;
mod scheduler;
mod sequencer;


/// `use flicker_player::prelude::*;` to import commonly used items.
pub mod prelude;

pub use animation::{AnimationSpec, CompletionCallback};
pub use pacer::{FramePacer, ManualPacer, RealtimePacer};
pub use scene::{AnimationEntry, ENV_PREFIX, SceneConfig, SceneError};
pub use scheduler::{PlaybackScheduler, StageConfig, TickOutcome};
pub use sequencer::{FrameSequencer, SequencerId};
