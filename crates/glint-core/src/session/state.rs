//! Session state and the per-frame step.
//!
//! `Session` is the only place filter state changes. Input handlers call the
//! pointer/resize/mode methods between frames; the scheduler calls
//! [`Session::step`] once per tick.

use std::sync::Arc;
use std::time::Duration;

use crate::error::CoreError;
use crate::image::FrameImage;
use crate::mapping::haptics::{HapticPulse, HapticTracker};
use crate::mapping::pointer::PointerSample;
use crate::mapping::region::ControlRegion;
use crate::mapping::{map, normalize_pointer};
use crate::session::export::encode_png;
use crate::session::renderer::FrameRenderer;
use crate::session::source::FrameSource;
use crate::transform::params::{FilterMode, FilterParameterSet};

/// Everything the host needs after one tick.
#[derive(Debug, Clone)]
pub struct StepOutput {
    /// The composited frame, or `None` while the source has nothing to show.
    pub frame: Option<Arc<FrameImage>>,
    /// Parameters used for this frame, for indicator feedback.
    pub parameters: FilterParameterSet,
    /// Haptic pulse raised since the previous tick.
    pub haptic: Option<HapticPulse>,
    /// PNG bytes when an export was requested and a frame was available.
    pub export: Option<Vec<u8>>,
}

/// Explicit application state shared by input handling and rendering.
#[derive(Debug)]
pub struct Session {
    mode: FilterMode,
    region: ControlRegion,
    pointer: Option<PointerSample>,
    parameters: FilterParameterSet,
    haptics: HapticTracker,
    pending_haptic: Option<HapticPulse>,
    source: FrameSource,
    export_requested: bool,
    elapsed: Duration,
    /// Source frame the cached output was rendered from.
    rendered_from: Option<Arc<FrameImage>>,
    last_frame: Option<Arc<FrameImage>>,
    /// Whether the parameters changed since the last render.
    dirty: bool,
}

impl Session {
    pub fn new(region: ControlRegion, mode: FilterMode) -> Self {
        Self {
            mode,
            region,
            pointer: None,
            parameters: FilterParameterSet::neutral(mode),
            haptics: HapticTracker::new(),
            pending_haptic: None,
            source: FrameSource::Empty,
            export_requested: false,
            elapsed: Duration::ZERO,
            rendered_from: None,
            last_frame: None,
            dirty: true,
        }
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn region(&self) -> &ControlRegion {
        &self.region
    }

    pub fn pointer(&self) -> Option<&PointerSample> {
        self.pointer.as_ref()
    }

    /// Current parameter set.
    pub fn parameters(&self) -> FilterParameterSet {
        self.parameters
    }

    pub fn source(&self) -> &FrameSource {
        &self.source
    }

    /// Time passed to the most recent [`Session::step`].
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn export_pending(&self) -> bool {
        self.export_requested
    }

    /// A new pointer sample arrived. Inactive samples count as a release.
    pub fn pointer_moved(&mut self, sample: PointerSample) {
        if !sample.active {
            self.pointer_released();
            return;
        }
        self.pointer = Some(sample);
        self.remap();
    }

    /// The pointer lifted; parameters return to neutral.
    pub fn pointer_released(&mut self) {
        self.pointer = None;
        self.remap();
    }

    /// The control region moved or changed size.
    pub fn resize(&mut self, region: ControlRegion) {
        tracing::debug!(?region, "control region resized");
        self.region = region;
        self.pointer = None;
        self.haptics.reset();
        self.remap();
    }

    /// Switch between grade and blend.
    pub fn set_mode(&mut self, mode: FilterMode) {
        if mode == self.mode {
            return;
        }
        tracing::info!(?mode, "filter mode changed");
        self.mode = mode;
        self.pointer = None;
        self.haptics.reset();
        self.remap();
    }

    /// Replace the frame source.
    pub fn set_source(&mut self, source: FrameSource) {
        tracing::info!(kind = source.kind(), "frame source changed");
        self.source = source;
        self.rendered_from = None;
        self.last_frame = None;
        self.dirty = true;
    }

    /// Media acquisition failed: show the still image (if any) with a neutral filter.
    pub fn fall_back_to_still(&mut self, image: Option<Arc<FrameImage>>) {
        tracing::warn!(has_image = image.is_some(), "falling back to still-image mode");
        let source = match image {
            Some(image) => FrameSource::Still(image),
            None => FrameSource::Empty,
        };
        self.set_source(source);
        self.pointer = None;
        self.haptics.reset();
        self.remap();
    }

    /// Ask for the next rendered frame to be exported.
    pub fn request_export(&mut self) {
        self.export_requested = true;
    }

    /// Advance to `elapsed` and produce this tick's output.
    ///
    /// When the source has no frame yet, nothing is rendered and any export
    /// request stays pending. A still frame with unchanged parameters and no
    /// time-varying filter reuses the cached output.
    pub fn step(
        &mut self,
        elapsed: Duration,
        renderer: &mut dyn FrameRenderer,
    ) -> Result<StepOutput, CoreError> {
        self.elapsed = elapsed;
        let haptic = self.pending_haptic.take();

        let Some(source_frame) = self.source.current_frame() else {
            return Ok(StepOutput {
                frame: None,
                parameters: self.parameters,
                haptic,
                export: None,
            });
        };

        let same_source = self
            .rendered_from
            .as_ref()
            .is_some_and(|prev| Arc::ptr_eq(prev, &source_frame));
        let animated = self.parameters.mode().is_time_varying() && !self.parameters.is_neutral();

        let cached = if same_source && !self.dirty && !animated {
            self.last_frame.clone()
        } else {
            None
        };
        let frame = match cached {
            Some(frame) => frame,
            None => {
                let rendered = renderer.render(
                    &source_frame,
                    &self.parameters,
                    elapsed.as_secs_f32(),
                )?;
                let rendered = Arc::new(rendered);
                self.rendered_from = Some(source_frame);
                self.last_frame = Some(Arc::clone(&rendered));
                self.dirty = false;
                rendered
            }
        };

        let export = if self.export_requested {
            let png = encode_png(&frame)?;
            self.export_requested = false;
            tracing::info!(bytes = png.len(), "frame exported");
            Some(png)
        } else {
            None
        };

        Ok(StepOutput {
            frame: Some(frame),
            parameters: self.parameters,
            haptic,
            export,
        })
    }

    fn remap(&mut self) {
        let parameters = map(self.pointer.as_ref(), &self.region, self.mode);
        let radial = normalize_pointer(self.pointer.as_ref(), &self.region)
            .map(|coord| coord.radial_distance());
        if let Some(pulse) = self.haptics.observe(radial) {
            self.pending_haptic = Some(pulse);
        }
        if parameters != self.parameters {
            self.parameters = parameters;
            self.dirty = true;
        }
    }
}
