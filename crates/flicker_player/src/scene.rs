//! Scene files: a stage plus the animations placed on it.
//!
//! Scenes are read with the `config` crate, so any format it understands can
//! be used (TOML by default), and every key can be overridden from the
//! environment with the `FLICKER_` prefix and `__` as the nesting separator,
//! e.g. `FLICKER_STAGE__FPS=30`.
//!
//! # Example Scene
//!
//! ```toml
//! [stage]
//! fps = 20.0
//! width = 200
//! height = 200
//!
//! [[animations]]
//! sheets = ["dude_animation_sheet.png"]
//! columns = 9
//! frame_count = 9
//! frame_width = 50
//! frame_height = 72
//! loop_count = -1
//! x = 0
//! y = 0
//! ```
//!
//! Sheet paths are resolved relative to the scene file. Loading the sheets is
//! left to the host, which then turns each entry into an [`AnimationSpec`]
//! with [`AnimationEntry::to_spec`].

use std::{
	path::{Path, PathBuf},
	rc::Rc,
};

use flicker_types::{ConfigError, Direction, FrameGrid, LoopCount, Point, RenderTarget};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{animation::AnimationSpec, scheduler::StageConfig};

/// Prefix of environment variables overriding scene keys
pub const ENV_PREFIX: &str = "FLICKER";

/// Errors that can occur when loading a scene
#[derive(Debug, Error)]
pub enum SceneError {
	/// The scene source could not be read or deserialized
	#[error(transparent)]
	Source(#[from] config::ConfigError),

	/// The stage section is invalid
	#[error("Invalid stage: {0}")]
	Stage(#[source] ConfigError),

	/// An animation entry is invalid
	#[error("Invalid animation #{index}: {source}")]
	Animation {
		/// Position of the entry in the scene
		index: usize,
		/// What is wrong with it
		source: ConfigError,
	},
}

/// A stage and the animations placed on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
	/// Draw rate and render target size
	pub stage: StageConfig,

	/// Animations in attachment order
	#[serde(default)]
	pub animations: Vec<AnimationEntry>,
}

/// One animation of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationEntry {
	/// Source image paths in playback order
	pub sheets: Vec<PathBuf>,

	/// Frames per row; required unless every frame has its own sheet
	#[serde(default)]
	pub columns: Option<u32>,

	/// Number of logical frames
	pub frame_count: usize,

	/// Frame width in pixels
	pub frame_width: u32,

	/// Frame height in pixels
	pub frame_height: u32,

	/// Play-throughs, negative for infinite
	#[serde(default)]
	pub loop_count: LoopCount,

	/// Destination x on the stage
	#[serde(default)]
	pub x: i32,

	/// Destination y on the stage
	#[serde(default)]
	pub y: i32,

	/// Whether frames continue across the sheets
	#[serde(default)]
	pub multi_sheet: bool,

	/// Initial playback direction
	#[serde(default)]
	pub direction: Direction,
}

impl SceneConfig {
	/// Loads a scene file, applying environment overrides.
	///
	/// Relative sheet paths are resolved against the scene file's directory.
	///
	/// # Errors
	///
	/// Returns a [`SceneError`] when the file cannot be read or parsed, or
	/// when the scene is invalid.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
		Self::load_from(path.as_ref(), environment())
	}

	/// Loads a scene file, taking overrides from `vars` instead of the process
	/// environment.
	///
	/// `vars` holds `FLICKER_`-prefixed names, as [`load`](Self::load) reads
	/// them; other names are ignored.
	///
	/// # Errors
	///
	/// Same as [`load`](Self::load).
	pub fn load_with_vars<P, I, K, V>(path: P, vars: I) -> Result<Self, SceneError>
	where
		P: AsRef<Path>,
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let vars = vars.into_iter().map(|(name, value)| (name.into(), value.into())).collect();
		Self::load_from(path.as_ref(), environment().source(Some(vars)))
	}

	fn load_from(path: &Path, environment: config::Environment) -> Result<Self, SceneError> {
		let mut scene: Self = config::Config::builder()
			.add_source(config::File::from(path))
			.add_source(environment)
			.build()?
			.try_deserialize()?;

		if let Some(base) = path.parent() {
			scene.resolve_sheets(base);
		}
		scene.validate()?;
		debug!(
			"Scene {}: {}x{} @ {} fps, {} animations",
			path.display(),
			scene.stage.width,
			scene.stage.height,
			scene.stage.fps,
			scene.animations.len()
		);
		Ok(scene)
	}

	/// Parses a scene from TOML text without environment overrides.
	///
	/// # Errors
	///
	/// Returns a [`SceneError`] when the text cannot be parsed or the scene is
	/// invalid.
	pub fn from_toml_str(text: &str) -> Result<Self, SceneError> {
		let scene: Self = config::Config::builder()
			.add_source(config::File::from_str(text, config::FileFormat::Toml))
			.build()?
			.try_deserialize()?;
		scene.validate()?;
		Ok(scene)
	}

	/// Makes relative sheet paths relative to `base`.
	pub fn resolve_sheets(&mut self, base: &Path) {
		for sheet in self.animations.iter_mut().flat_map(|a| a.sheets.iter_mut()) {
			if sheet.is_relative() {
				*sheet = base.join(&*sheet);
			}
		}
	}

	/// Checks the stage and every animation entry.
	///
	/// # Errors
	///
	/// Returns the first problem found.
	pub fn validate(&self) -> Result<(), SceneError> {
		self.stage.validate().map_err(SceneError::Stage)?;
		for (index, entry) in self.animations.iter().enumerate() {
			entry.validate().map_err(|source| SceneError::Animation {
				index,
				source,
			})?;
		}
		Ok(())
	}
}

/// Override source for `FLICKER_STAGE__FPS` style names.
fn environment() -> config::Environment {
	config::Environment::with_prefix(ENV_PREFIX).prefix_separator("_").separator("__")
}

impl AnimationEntry {
	/// Checks the fields that can be validated without the sheets.
	///
	/// # Errors
	///
	/// Returns a [`ConfigError`] for missing sheets or zero frame sizes.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.sheets.is_empty() {
			return Err(ConfigError::NoSources);
		}
		if self.frame_width == 0 {
			return Err(ConfigError::ZeroDimension {
				field: "frame width",
			});
		}
		if self.frame_height == 0 {
			return Err(ConfigError::ZeroDimension {
				field: "frame height",
			});
		}
		Ok(())
	}

	/// Returns the destination position.
	pub fn position(&self) -> Point {
		Point::new(self.x, self.y)
	}

	/// Builds an animation from this entry and its loaded sheets.
	///
	/// `sources` must be in the same order as [`sheets`](Self::sheets). The
	/// initial direction is not part of an [`AnimationSpec`]; apply it to the
	/// sequencer after acquiring it.
	pub fn to_spec<T: RenderTarget>(&self, sources: Vec<Rc<T::Source>>) -> AnimationSpec<T> {
		let mut grid =
			FrameGrid::new(self.frame_width, self.frame_height, self.frame_count).with_sources(sources);
		if let Some(columns) = self.columns {
			grid = grid.with_columns(columns);
		}

		AnimationSpec::new(grid)
			.with_loop_count(self.loop_count)
			.at(self.x, self.y)
			.multi_sheet(self.multi_sheet)
	}
}
