use std::{fs, path::PathBuf, rc::Rc};

use flicker_rs::prelude::*;

use crate::common::{frame_at, numbered_sheet};

/// Writes a scene with one 3-frame animation and its sheet into a fresh
/// directory and returns the scene path.
fn write_scene(name: &str, body: &str) -> PathBuf {
	let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
	fs::create_dir_all(&dir).unwrap();
	numbered_sheet(3, 1, 6).save(dir.join("sheet.png")).unwrap();

	let path = dir.join("scene.toml");
	fs::write(&path, body).unwrap();
	path
}

const SCENE: &str = r#"
[stage]
fps = 10.0
width = 30
height = 20

[[animations]]
sheets = ["sheet.png"]
columns = 3
frame_count = 3
frame_width = 10
frame_height = 8
loop_count = 1
x = 5
y = 6
direction = "reverse"
"#;

#[test_log::test]
fn test_scene_file_plays_on_canvas() {
	let path = write_scene("scene_plays", SCENE);
	let scene = SceneConfig::load(&path).unwrap();
	assert_eq!(scene.stage, StageConfig::new(10.0, 30, 20));

	let entry = &scene.animations[0];
	let sheet_path = path.parent().unwrap().join("sheet.png");
	assert_eq!(entry.sheets, vec![sheet_path.clone()]);

	let sheet = Rc::new(image::open(&sheet_path).unwrap().into_rgba8());
	let mut scheduler = PlaybackScheduler::new(scene.stage, Canvas::new(1, 1)).unwrap();
	let sequencer = scheduler.acquire(entry.to_spec::<Canvas>(vec![sheet])).unwrap();
	sequencer.set_direction(entry.direction);
	let id = sequencer.id();

	scheduler.start();
	let mut shown = Vec::new();
	let mut pacer = ManualPacer::every(100.0, 5);
	while let Some(timestamp) = pacer.next_frame() {
		scheduler.tick(timestamp);
		shown.push(frame_at(scheduler.surface(), 5, 6));
	}

	// Reverse from frame 0 wraps to the end and spends the only loop
	assert_eq!(shown, vec![Some((0, 6)), None, None, None, None]);
	assert!(scheduler.get(id).unwrap().is_completed());
}

#[test_log::test]
fn test_environment_overrides_stage() {
	let path = write_scene("scene_env", SCENE);
	let vars = [
		("FLICKER_STAGE__FPS", "30"),
		("FLICKER_STAGE__WIDTH", "48"),
		("OTHER_STAGE__HEIGHT", "99"),
	];
	let scene = SceneConfig::load_with_vars(&path, vars).unwrap();

	assert_eq!(scene.stage, StageConfig::new(30.0, 48, 20));
	assert_eq!(scene.animations.len(), 1);
	assert_eq!(scene.animations[0].position(), Point::new(5, 6));
}

#[test_log::test]
fn test_environment_override_is_validated() {
	let path = write_scene("scene_env_invalid", SCENE);
	let err = SceneConfig::load_with_vars(&path, [("FLICKER_STAGE__FPS", "0")]).unwrap_err();
	assert!(matches!(err, SceneError::Stage(ConfigError::InvalidFps(_))));
}

#[test_log::test]
fn test_scene_defaults() {
	let body = r#"
[stage]
fps = 24.0
width = 64
height = 64

[[animations]]
sheets = ["sheet.png"]
frame_count = 1
frame_width = 10
frame_height = 8
"#;
	let scene = SceneConfig::load(write_scene("scene_defaults", body)).unwrap();
	let entry = &scene.animations[0];

	assert_eq!(entry.columns, None);
	assert_eq!(entry.loop_count, LoopCount::Infinite);
	assert_eq!(entry.position(), Point::new(0, 0));
	assert_eq!(entry.direction, Direction::Forward);
	assert!(!entry.multi_sheet);
}

#[test_log::test]
fn test_scene_without_animations() {
	let scene = SceneConfig::from_toml_str("[stage]\nfps = 30.0\nwidth = 8\nheight = 8\n").unwrap();
	assert!(scene.animations.is_empty());
	assert_eq!(scene.stage.tick_interval_ms(), 1000.0 / 30.0);
}

#[test_log::test]
fn test_missing_scene_file() {
	let missing = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("no_such_scene.toml");
	assert!(matches!(SceneConfig::load(&missing), Err(SceneError::Source(_))));
}

#[test_log::test]
fn test_invalid_scene_entries() {
	let body = SCENE.replace("frame_width = 10", "frame_width = 0");
	let err = SceneConfig::load(write_scene("scene_invalid", &body)).unwrap_err();
	assert!(matches!(
		err,
		SceneError::Animation {
			index: 0,
			source: ConfigError::ZeroDimension {
				field: "frame width"
			}
		}
	));
	assert_eq!(err.to_string(), "Invalid animation #0: Invalid frame width: must be greater than zero");
}
