//! Fixed-rate frame loop.
//!
//! One tick: apply due script events, step the session, report feedback, and
//! hand any export to a blocking writer so the next tick is not delayed.

use std::path::{Path, PathBuf};

use glint_core::{FrameRenderer, Session, StepOutput};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::frame_period;
use crate::error::DemoError;
use crate::script::{PointerScript, apply_event};

/// Loop settings taken from the config.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub fps: f32,
    pub frames: Option<u64>,
    pub export_on_frame: Option<u64>,
    pub output_dir: PathBuf,
}

/// What happened during a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub ticks: u64,
    /// Ticks that produced a frame.
    pub rendered: u64,
    pub exports: Vec<PathBuf>,
    pub failed_exports: usize,
}

type ExportTask = JoinHandle<std::io::Result<PathBuf>>;

/// Drive `session` at `plan.fps` until the frame limit is reached.
pub async fn run(
    session: &mut Session,
    renderer: &mut dyn FrameRenderer,
    mut script: Option<PointerScript>,
    plan: &RunPlan,
) -> Result<RunSummary, DemoError> {
    let mut ticker = tokio::time::interval(frame_period("fps", plan.fps)?);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(renderer = renderer.name(), fps = plan.fps, frames = ?plan.frames, "render loop started");

    let start = Instant::now();
    let mut summary = RunSummary::default();
    let mut writes: Vec<ExportTask> = Vec::new();

    while plan.frames.is_none_or(|limit| summary.ticks < limit) {
        ticker.tick().await;
        let elapsed = start.elapsed();
        let frame_index = summary.ticks;

        if let Some(active) = script.as_mut() {
            for timed in active.due(elapsed) {
                tracing::debug!(t_ms = timed.t_ms, event = ?timed.event, "script event");
                apply_event(session, &timed.event);
            }
            if active.is_finished() {
                tracing::info!(frame = frame_index, "pointer script finished");
                script = None;
            }
        }
        if plan.export_on_frame == Some(frame_index) {
            session.request_export();
        }

        let output = session.step(elapsed, renderer)?;
        report(frame_index, &output);

        if output.frame.is_some() {
            summary.rendered += 1;
        }
        if let Some(png) = output.export {
            writes.push(spawn_export(&plan.output_dir, frame_index, png));
        }
        reap_finished(&mut writes, &mut summary).await;
        summary.ticks += 1;
    }

    for task in writes {
        record_export(task.await, &mut summary);
    }

    tracing::info!(
        ticks = summary.ticks,
        rendered = summary.rendered,
        exports = summary.exports.len(),
        "render loop finished"
    );
    Ok(summary)
}

/// Parameter feedback at debug as JSON, haptics at info.
fn report(frame_index: u64, output: &StepOutput) {
    if let Some(pulse) = output.haptic {
        tracing::info!(frame = frame_index, ?pulse, "haptic pulse");
    }
    if output.frame.is_none() {
        tracing::debug!(frame = frame_index, "no frame ready");
    }
    if tracing::enabled!(tracing::Level::DEBUG) {
        match serde_json::to_string(&output.parameters) {
            Ok(json) => tracing::debug!(frame = frame_index, parameters = %json, "filter parameters"),
            Err(err) => tracing::warn!(%err, "failed to serialize parameters"),
        }
    }
}

/// Collect exports whose writer has already completed.
async fn reap_finished(writes: &mut Vec<ExportTask>, summary: &mut RunSummary) {
    let (done, pending): (Vec<_>, Vec<_>) =
        std::mem::take(writes).into_iter().partition(|task| task.is_finished());
    *writes = pending;
    for task in done {
        record_export(task.await, summary);
    }
}

fn record_export(
    result: Result<std::io::Result<PathBuf>, tokio::task::JoinError>,
    summary: &mut RunSummary,
) {
    match result {
        Ok(Ok(path)) => {
            tracing::info!(path = %path.display(), "export written");
            summary.exports.push(path);
        }
        Ok(Err(err)) => {
            tracing::error!(%err, "failed to write export");
            summary.failed_exports += 1;
        }
        Err(err) => {
            tracing::error!(%err, "export task failed");
            summary.failed_exports += 1;
        }
    }
}

fn spawn_export(dir: &Path, frame_index: u64, png: Vec<u8>) -> ExportTask {
    let path = dir.join(format!("glint_{frame_index:06}.png"));
    let dir = dir.to_path_buf();
    tokio::task::spawn_blocking(move || {
        std::fs::create_dir_all(&dir)?;
        std::fs::write(&path, png)?;
        Ok(path)
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glint_core::{ControlRegion, CpuRenderer, FilterMode, FrameImage, FrameSource, FrameSlot};

    use super::*;
    use crate::script::{ScriptEvent, TimedEvent};

    fn plan(frames: u64, dir: PathBuf) -> RunPlan {
        RunPlan {
            fps: 200.0,
            frames: Some(frames),
            export_on_frame: None,
            output_dir: dir,
        }
    }

    fn still_session() -> Session {
        let mut session = Session::new(ControlRegion::rect(0.0, 0.0, 100.0, 100.0), FilterMode::Grade);
        let image = FrameImage::solid(4, 4, [0.5, 0.4, 0.3, 1.0]).unwrap();
        session.set_source(FrameSource::Still(Arc::new(image)));
        session
    }

    #[tokio::test]
    async fn test_runs_exact_frame_count() {
        let mut session = still_session();
        let summary = run(&mut session, &mut CpuRenderer, None, &plan(5, std::env::temp_dir()))
            .await
            .unwrap();
        assert_eq!(summary.ticks, 5);
        assert_eq!(summary.rendered, 5);
        assert!(summary.exports.is_empty());
    }

    #[tokio::test]
    async fn test_export_on_frame_writes_png() {
        let dir = std::env::temp_dir().join(format!("glint-sched-{}", std::process::id()));
        let mut session = still_session();
        let mut p = plan(3, dir.clone());
        p.export_on_frame = Some(1);
        let summary = run(&mut session, &mut CpuRenderer, None, &p).await.unwrap();
        assert_eq!(summary.exports.len(), 1);
        let bytes = std::fs::read(&summary.exports[0]).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_finished_exports_are_reaped_during_the_run() {
        let dir = std::env::temp_dir().join(format!("glint-sched-reap-{}", std::process::id()));
        let mut writes = vec![
            spawn_export(&dir, 0, b"first".to_vec()),
            spawn_export(&dir, 1, b"second".to_vec()),
        ];
        while !writes.iter().all(|task| task.is_finished()) {
            tokio::task::yield_now().await;
        }
        let mut summary = RunSummary::default();
        reap_finished(&mut writes, &mut summary).await;
        assert!(writes.is_empty());
        assert_eq!(summary.exports.len(), 2);
        assert_eq!(summary.failed_exports, 0);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_unusable_fps_is_a_config_error() {
        let mut session = still_session();
        let mut p = plan(1, std::env::temp_dir());
        p.fps = 1e30;
        let err = run(&mut session, &mut CpuRenderer, None, &p).await.unwrap_err();
        assert!(matches!(err, DemoError::Config(_)), "{err}");
    }

    #[tokio::test]
    async fn test_script_capture_waits_for_live_frame() {
        let dir = std::env::temp_dir().join(format!("glint-sched-live-{}", std::process::id()));
        let mut session = still_session();
        // Live source that never produces a frame.
        session.set_source(FrameSource::Live(Box::new(FrameSlot::new())));
        let script = PointerScript::new(vec![TimedEvent {
            t_ms: 0,
            event: ScriptEvent::Capture,
        }]);
        let summary = run(&mut session, &mut CpuRenderer, Some(script), &plan(3, dir))
            .await
            .unwrap();
        assert_eq!(summary.rendered, 0);
        assert!(summary.exports.is_empty());
        assert!(session.export_pending());
    }
}
