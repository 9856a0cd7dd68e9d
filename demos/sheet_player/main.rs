//! Sprite sheet player.
//!
//! Provides two subcommands:
//! - `sample`: write a generated sprite sheet and a scene file playing it.
//! - `render`: play a scene on an in-memory canvas and save every drawn tick
//!   as a PNG, optionally writing a JSON summary of the run.

use std::{
	cell::Cell,
	fs,
	path::{Path, PathBuf},
	rc::Rc,
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use flicker_rs::prelude::*;
use image::{Rgba, RgbaImage};
use log::{debug, info, warn};
use serde::Serialize;

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Command::Sample(args) => run_sample(&args),
		Command::Render(args) => run_render(&args),
	}
}

#[derive(Parser)]
#[command(name = "sheet_player")]
#[command(author = "flicker-rs project")]
#[command(version)]
#[command(about = "Play sprite sheet animations from a scene file", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Write a generated sprite sheet and a scene playing it
	Sample(SampleArgs),
	/// Render a scene to a sequence of PNG frames
	Render(RenderArgs),
}

#[derive(Args)]
struct SampleArgs {
	/// Output directory for the sheet and the scene file
	#[arg(short, long, value_name = "DIR", default_value = "bin/sample")]
	output: PathBuf,

	/// Number of frames on the generated sheet
	#[arg(short, long, value_name = "COUNT", default_value_t = 9)]
	frames: u32,
}

#[derive(Args)]
struct RenderArgs {
	/// Scene file to play
	#[arg(value_name = "SCENE")]
	scene: PathBuf,

	/// Output directory for rendered frames
	#[arg(short, long, value_name = "DIR", default_value = "bin/frames")]
	output: PathBuf,

	/// Maximum number of native frames to run
	#[arg(short, long, value_name = "COUNT", default_value_t = 120)]
	ticks: usize,

	/// Override the stage frame rate
	#[arg(long, value_name = "FPS")]
	fps: Option<f64>,

	/// Pace ticks with the wall clock instead of simulated time
	#[arg(long, default_value_t = false)]
	realtime: bool,

	/// Native refresh rate used for pacing
	#[arg(long, value_name = "HZ", default_value_t = RealtimePacer::DEFAULT_REFRESH_HZ)]
	refresh: f64,

	/// Write a JSON summary of the run
	#[arg(long, value_name = "FILE")]
	summary: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct RunSummary {
	scene: PathBuf,
	fps: f64,
	native_frames: usize,
	drawn_ticks: usize,
	completions: usize,
	animations: Vec<AnimationSummary>,
}

#[derive(Debug, Serialize)]
struct AnimationSummary {
	id: u64,
	frames: usize,
	current_frame: usize,
	direction: Direction,
	loop_count: LoopCount,
	completed: bool,
}

const SAMPLE_FRAME_WIDTH: u32 = 50;
const SAMPLE_FRAME_HEIGHT: u32 = 72;
const SAMPLE_COLUMNS: u32 = 3;

fn run_sample(args: &SampleArgs) -> Result<()> {
	if args.frames == 0 {
		bail!("A sample sheet needs at least one frame");
	}
	fs::create_dir_all(&args.output)
		.with_context(|| format!("Failed to create {}", args.output.display()))?;

	let rows = args.frames.div_ceil(SAMPLE_COLUMNS);
	let sheet = sample_sheet(args.frames, rows);
	let sheet_path = args.output.join("sample_sheet.png");
	sheet.save(&sheet_path).with_context(|| format!("Failed to write {}", sheet_path.display()))?;
	info!("✓ Sheet: {} ({}x{})", sheet_path.display(), sheet.width(), sheet.height());

	let scene = SceneConfig {
		stage: StageConfig::new(12.0, SAMPLE_FRAME_WIDTH * 3, SAMPLE_FRAME_HEIGHT),
		animations: vec![
			sample_entry(args.frames, LoopCount::Infinite, 0, Direction::Forward),
			sample_entry(args.frames, LoopCount::Remaining(2), 50, Direction::Reverse),
			sample_entry(args.frames, LoopCount::Remaining(1), 100, Direction::Forward),
		],
	};

	let scene_path = args.output.join("scene.toml");
	fs::write(&scene_path, sample_scene_toml(&scene))
		.with_context(|| format!("Failed to write {}", scene_path.display()))?;
	info!("✓ Scene: {}", scene_path.display());
	info!("Play it with: sheet_player render {}", scene_path.display());

	Ok(())
}

/// Paints one solid hue per frame with a bar whose height grows with the
/// frame index.
fn sample_sheet(frames: u32, rows: u32) -> RgbaImage {
	let mut sheet = RgbaImage::new(SAMPLE_FRAME_WIDTH * SAMPLE_COLUMNS, SAMPLE_FRAME_HEIGHT * rows);
	for index in 0..frames {
		let left = (index % SAMPLE_COLUMNS) * SAMPLE_FRAME_WIDTH;
		let top = (index / SAMPLE_COLUMNS) * SAMPLE_FRAME_HEIGHT;
		let shade = u8::try_from(index * 255 / frames.max(1)).unwrap_or(u8::MAX);
		let bar = SAMPLE_FRAME_HEIGHT * (index + 1) / frames;

		for y in 0..SAMPLE_FRAME_HEIGHT {
			for x in 0..SAMPLE_FRAME_WIDTH {
				let color = if y >= SAMPLE_FRAME_HEIGHT - bar {
					Rgba([255, shade, 255 - shade, 255])
				} else {
					Rgba([32, 32, 32, 255])
				};
				sheet.put_pixel(left + x, top + y, color);
			}
		}
	}
	sheet
}

fn sample_entry(frames: u32, loop_count: LoopCount, x: i32, direction: Direction) -> AnimationEntry {
	AnimationEntry {
		sheets: vec![PathBuf::from("sample_sheet.png")],
		columns: Some(SAMPLE_COLUMNS),
		frame_count: frames as usize,
		frame_width: SAMPLE_FRAME_WIDTH,
		frame_height: SAMPLE_FRAME_HEIGHT,
		loop_count,
		x,
		y: 0,
		multi_sheet: false,
		direction,
	}
}

fn sample_scene_toml(scene: &SceneConfig) -> String {
	let mut text = format!(
		"[stage]\nfps = {:.1}\nwidth = {}\nheight = {}\n",
		scene.stage.fps, scene.stage.width, scene.stage.height
	);
	for entry in &scene.animations {
		let sheets: Vec<String> =
			entry.sheets.iter().map(|sheet| format!("{:?}", sheet.display().to_string())).collect();
		text.push_str(&format!(
			"\n[[animations]]\nsheets = [{}]\ncolumns = {}\nframe_count = {}\nframe_width = {}\nframe_height = {}\nloop_count = {}\nx = {}\ny = {}\nmulti_sheet = {}\ndirection = \"{}\"\n",
			sheets.join(", "),
			entry.columns.unwrap_or(1),
			entry.frame_count,
			entry.frame_width,
			entry.frame_height,
			i32::from(entry.loop_count),
			entry.x,
			entry.y,
			entry.multi_sheet,
			entry.direction,
		));
	}
	text
}

fn run_render(args: &RenderArgs) -> Result<()> {
	let mut scene = SceneConfig::load(&args.scene)
		.with_context(|| format!("Failed to load scene {}", args.scene.display()))?;
	if let Some(fps) = args.fps {
		scene.stage.fps = fps;
	}
	fs::create_dir_all(&args.output)
		.with_context(|| format!("Failed to create {}", args.output.display()))?;

	info!(
		"Scene: {} ({}x{} @ {:.2} fps, {} animations)",
		args.scene.display(),
		scene.stage.width,
		scene.stage.height,
		scene.stage.fps,
		scene.animations.len()
	);

	let canvas = Canvas::new(scene.stage.width, scene.stage.height);
	let mut scheduler = PlaybackScheduler::new(scene.stage, canvas)?;
	let completions = Rc::new(Cell::new(0_usize));

	for (index, entry) in scene.animations.iter().enumerate() {
		let sources = load_sheets(&entry.sheets)?;
		let counter = Rc::clone(&completions);
		let spec = entry.to_spec::<Canvas>(sources).on_complete(move |sequencer| {
			counter.set(counter.get() + 1);
			info!("Animation {} finished on frame {}", sequencer.id(), sequencer.current_frame());
		});

		let sequencer = scheduler
			.acquire(spec)
			.with_context(|| format!("Invalid animation #{index} in {}", args.scene.display()))?;
		sequencer.set_direction(entry.direction);
		debug!("Animation #{index} -> {} ({} frames)", sequencer.id(), sequencer.frames().len());
	}

	let mut pacer: Box<dyn FramePacer> = if args.realtime {
		Box::new(RealtimePacer::new(args.refresh).with_budget(args.ticks as u64))
	} else {
		Box::new(ManualPacer::every(1000.0 / args.refresh, args.ticks))
	};

	scheduler.start();
	let mut native_frames = 0;
	let mut drawn_ticks = 0;
	while let Some(timestamp) = pacer.next_frame() {
		native_frames += 1;
		match scheduler.tick(timestamp) {
			TickOutcome::Stopped => break,
			TickOutcome::Throttled => continue,
			TickOutcome::Drawn {
				..
			} => {}
		}

		let path = args.output.join(format!("frame_{drawn_ticks:04}.png"));
		scheduler
			.surface()
			.borrow()
			.save(&path)
			.with_context(|| format!("Failed to write {}", path.display()))?;
		drawn_ticks += 1;

		if scheduler.is_idle() {
			info!("All animations completed after {} ticks", drawn_ticks);
			scheduler.stop();
		}
	}

	if drawn_ticks == 0 {
		warn!("No tick was drawn; raise --ticks or lower the stage fps");
	}
	info!("✓ {} frames written to {}", drawn_ticks, args.output.display());

	if let Some(summary_path) = &args.summary {
		let summary = RunSummary {
			scene: args.scene.clone(),
			fps: scheduler.fps(),
			native_frames,
			drawn_ticks,
			completions: completions.get(),
			animations: scheduler.iter().map(summarize).collect(),
		};
		save_summary(summary_path, &summary)?;
		info!("✓ Summary: {}", summary_path.display());
	}

	scheduler.teardown();
	Ok(())
}

fn load_sheets(paths: &[PathBuf]) -> Result<Vec<Rc<RgbaImage>>> {
	paths
		.iter()
		.map(|path| {
			let sheet = image::open(path)
				.with_context(|| format!("Failed to open sheet {}", path.display()))?
				.into_rgba8();
			debug!("Loaded {} ({}x{})", path.display(), sheet.width(), sheet.height());
			Ok(Rc::new(sheet))
		})
		.collect()
}

fn summarize(sequencer: &FrameSequencer<Canvas>) -> AnimationSummary {
	AnimationSummary {
		id: sequencer.id().get(),
		frames: sequencer.frames().len(),
		current_frame: sequencer.current_frame(),
		direction: sequencer.direction(),
		loop_count: sequencer.loop_count(),
		completed: sequencer.is_completed(),
	}
}

fn save_summary(path: &Path, summary: &RunSummary) -> Result<()> {
	let json = serde_json::to_string_pretty(summary)?;
	fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
	Ok(())
}
