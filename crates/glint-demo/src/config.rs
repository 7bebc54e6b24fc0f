//! Runtime configuration for the demo host.
//!
//! Precedence, lowest to highest: built-in defaults, `GLINT_*` environment
//! variables, a JSON file passed with `--config`, command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use glam::Vec2;
use glint_core::{ControlRegion, FilterMode};
use serde::{Deserialize, Serialize};

use crate::error::DemoError;

/// Default render rate.
const DEFAULT_FPS: f32 = 30.0;
/// Default playback rate for a frame-sequence feed.
const DEFAULT_FEED_FPS: f32 = 24.0;
/// Default control region edge length in logical pixels.
const DEFAULT_REGION_SIZE: f32 = 300.0;

pub const USAGE: &str = "\
usage: glint-demo [options]

  --config <file>          JSON config file
  --image <file>           still image (PNG or JPEG)
  --feed <dir>             directory of frames played as a live feed
  --feed-fps <n>           feed playback rate
  --fps <n>                render rate
  --frames <n>             stop after n frames
  --mode <grade|blend>     filter mode
  --rect <x,y,w,h>         rectangular control region
  --circle <cx,cy,r>       circular control region
  --pointer <x,y>          hold the pointer down at a fixed position
  --script <file>          JSON pointer script
  --export-on-frame <n>    export frame n as PNG
  --output <dir>           export directory
  --cpu                    render on the CPU
  --help                   show this message";

/// Runtime configuration for the Glint demo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Still image shown when no feed is running (and as the fallback).
    pub image: Option<PathBuf>,
    /// Frame-sequence directory treated as a live feed.
    pub feed_dir: Option<PathBuf>,
    pub feed_fps: f32,
    /// Render ticks per second.
    pub fps: f32,
    /// Stop after this many ticks. Runs until interrupted when unset.
    pub frames: Option<u64>,
    pub mode: FilterMode,
    pub region: ControlRegion,
    /// Pointer held down for the whole run.
    pub pointer: Option<Vec2>,
    pub script: Option<PathBuf>,
    pub export_on_frame: Option<u64>,
    pub output_dir: PathBuf,
    pub gpu: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            image: None,
            feed_dir: None,
            feed_fps: DEFAULT_FEED_FPS,
            fps: std::env::var("GLINT_FPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_FPS),
            frames: None,
            mode: FilterMode::Grade,
            region: ControlRegion::rect(0.0, 0.0, DEFAULT_REGION_SIZE, DEFAULT_REGION_SIZE),
            pointer: None,
            script: None,
            export_on_frame: None,
            output_dir: std::env::var("GLINT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("glint-output")),
            gpu: std::env::var("GLINT_GPU").map_or(true, |v| v != "0" && v != "false"),
        }
    }
}

/// What the command line asked for.
#[derive(Debug)]
pub enum Command {
    Run(DemoConfig),
    Help,
}

impl DemoConfig {
    /// Build the configuration from process arguments (without the program name).
    pub fn from_args<I>(args: I) -> Result<Command, DemoError>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();

        let config_path = args
            .iter()
            .position(|a| a == "--config")
            .map(|i| value(&args, i))
            .transpose()?;
        let mut config = match config_path {
            Some(path) => Self::load(Path::new(path))?,
            None => Self::default(),
        };

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--help" | "-h" => return Ok(Command::Help),
                "--cpu" => {
                    config.gpu = false;
                    i += 1;
                    continue;
                }
                _ => {}
            }
            let v = value(&args, i)?;
            match flag {
                "--config" => {}
                "--image" => config.image = Some(PathBuf::from(v)),
                "--feed" => config.feed_dir = Some(PathBuf::from(v)),
                "--feed-fps" => config.feed_fps = parse_number(flag, v)?,
                "--fps" => config.fps = parse_number(flag, v)?,
                "--frames" => config.frames = Some(parse_number(flag, v)?),
                "--mode" => config.mode = parse_mode(v)?,
                "--rect" => {
                    let [x, y, w, h] = parse_floats::<4>(flag, v)?;
                    config.region = ControlRegion::rect(x, y, w, h);
                }
                "--circle" => {
                    let [cx, cy, r] = parse_floats::<3>(flag, v)?;
                    config.region = ControlRegion::circle(cx, cy, r);
                }
                "--pointer" => {
                    let [x, y] = parse_floats::<2>(flag, v)?;
                    config.pointer = Some(Vec2::new(x, y));
                }
                "--script" => config.script = Some(PathBuf::from(v)),
                "--export-on-frame" => config.export_on_frame = Some(parse_number(flag, v)?),
                "--output" => config.output_dir = PathBuf::from(v),
                other => return Err(DemoError::Config(format!("unknown flag `{other}`"))),
            }
            i += 2;
        }

        config.validate()?;
        Ok(Command::Run(config))
    }

    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, DemoError> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| DemoError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    fn validate(&self) -> Result<(), DemoError> {
        frame_period("fps", self.fps)?;
        frame_period("feed fps", self.feed_fps)?;
        if self.region.is_degenerate() {
            tracing::warn!(region = ?self.region, "control region is degenerate; filters stay neutral");
        }
        Ok(())
    }
}

/// Tick period for a rate in frames per second.
///
/// Rejects rates whose period is not a finite, non-zero [`Duration`].
pub fn frame_period(what: &str, fps: f32) -> Result<Duration, DemoError> {
    if !(fps.is_finite() && fps > 0.0) {
        return Err(DemoError::Config(format!("{what} must be positive, got {fps}")));
    }
    match Duration::try_from_secs_f32(1.0 / fps) {
        Ok(period) if !period.is_zero() => Ok(period),
        _ => Err(DemoError::Config(format!("{what} {fps} is out of range"))),
    }
}

fn value(args: &[String], flag_index: usize) -> Result<&str, DemoError> {
    args.get(flag_index + 1)
        .map(String::as_str)
        .ok_or_else(|| DemoError::Config(format!("`{}` needs a value", args[flag_index])))
}

fn parse_number<T: std::str::FromStr>(flag: &str, v: &str) -> Result<T, DemoError> {
    v.trim()
        .parse()
        .map_err(|_| DemoError::Config(format!("`{flag}` expects a number, got `{v}`")))
}

fn parse_floats<const N: usize>(flag: &str, v: &str) -> Result<[f32; N], DemoError> {
    let parts: Vec<f32> = v
        .split(',')
        .map(|p| parse_number(flag, p))
        .collect::<Result<_, _>>()?;
    parts
        .try_into()
        .map_err(|_| DemoError::Config(format!("`{flag}` expects {N} comma-separated numbers")))
}

fn parse_mode(v: &str) -> Result<FilterMode, DemoError> {
    match v {
        "grade" => Ok(FilterMode::Grade),
        "blend" => Ok(FilterMode::Blend),
        other => Err(DemoError::Config(format!(
            "unknown mode `{other}`, expected grade or blend"
        ))),
    }
}
