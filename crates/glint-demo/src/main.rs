//! Glint Demo — headless host for the pointer-driven filter pipeline.
//!
//! Loads a still image and/or a frame-sequence feed, replays scripted or
//! fixed pointer input, renders at a fixed rate on the GPU (or CPU), and
//! writes requested exports as PNG files.

mod config;
mod error;
mod feed;
mod image_loader;
mod scheduler;
mod script;

use std::process::ExitCode;
use std::sync::Arc;

use glint_core::{CpuRenderer, FrameRenderer, FrameSource, PointerSample, Session};
use tracing_subscriber::EnvFilter;

use crate::config::{Command, DemoConfig, USAGE};
use crate::error::DemoError;
use crate::feed::FeedController;
use crate::scheduler::RunPlan;
use crate::script::PointerScript;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = match DemoConfig::from_args(std::env::args().skip(1)) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("glint-demo: {err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "glint-demo failed");
            ExitCode::FAILURE
        }
    }
}

/// `GLINT_LOG` takes precedence over `RUST_LOG`; default `info`.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_env("GLINT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .ok();
}

async fn run(config: DemoConfig) -> Result<(), DemoError> {
    let mut renderer = build_renderer(&config)?;

    let still = match &config.image {
        Some(path) => {
            let image = image_loader::load_image(path)?;
            tracing::info!(path = %path.display(), width = image.width, height = image.height, "still image loaded");
            Some(Arc::new(image))
        }
        None => None,
    };

    let mut session = Session::new(config.region, config.mode);
    let mut feed = FeedController::new();

    match &config.feed_dir {
        Some(dir) => match feed.start(dir, config.feed_fps).await {
            Ok(slot) => session.set_source(FrameSource::Live(Box::new(slot))),
            Err(err) => {
                tracing::warn!(%err, "live feed unavailable");
                session.fall_back_to_still(still.clone());
            }
        },
        None => {
            if let Some(image) = &still {
                session.set_source(FrameSource::Still(Arc::clone(image)));
            }
        }
    }

    if matches!(session.source(), FrameSource::Empty) {
        tracing::warn!("no image or feed available; nothing will be rendered");
    }

    if let Some(pointer) = config.pointer {
        session.pointer_moved(PointerSample::touching(pointer.x, pointer.y));
    }

    let script = match &config.script {
        Some(path) => {
            let script = PointerScript::load(path)?;
            tracing::info!(path = %path.display(), events = script.len(), "pointer script loaded");
            Some(script)
        }
        None => None,
    };

    let plan = RunPlan {
        fps: config.fps,
        frames: config.frames,
        export_on_frame: config.export_on_frame,
        output_dir: config.output_dir.clone(),
    };
    let summary = scheduler::run(&mut session, renderer.as_mut(), script, &plan).await?;

    if feed.is_running() {
        feed.stop();
    }
    if summary.failed_exports > 0 {
        tracing::warn!(failed = summary.failed_exports, "some exports were not written");
    }
    Ok(())
}

/// GPU when enabled and available, CPU otherwise. A shader that fails to
/// compile is fatal.
fn build_renderer(config: &DemoConfig) -> Result<Box<dyn FrameRenderer>, DemoError> {
    #[cfg(feature = "gpu")]
    if config.gpu {
        match glint_gpu::GpuFilterPipeline::create_blocking() {
            Ok(pipeline) => return Ok(Box::new(pipeline)),
            Err(err @ glint_gpu::GpuError::ShaderCompile(_)) => return Err(err.into()),
            Err(err) => tracing::warn!(%err, "GPU unavailable, rendering on the CPU"),
        }
    }
    #[cfg(not(feature = "gpu"))]
    if config.gpu {
        tracing::info!("built without GPU support, rendering on the CPU");
    }
    Ok(Box::new(CpuRenderer))
}
