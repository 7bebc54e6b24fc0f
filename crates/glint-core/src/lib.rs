//! Glint Core — domain layer for pointer-driven live photo filters.
//!
//! This crate maps pointer positions over a control region to filter
//! parameters and runs the per-pixel color pipeline (continuous grade and
//! four-way stylized blend). No GPU or runtime dependencies.

pub mod error;
pub mod grading;
pub mod image;
pub mod mapping;
pub mod session;
pub mod stylize;
pub mod transform;

// Re-exports for convenience.
pub use error::CoreError;
pub use image::FrameImage;
pub use mapping::haptics::{HapticPulse, HapticTracker};
pub use mapping::pointer::PointerSample;
pub use mapping::region::{ControlRegion, CoordinateDomain, NormalizedCoordinate};
pub use session::renderer::{CpuRenderer, FrameRenderer};
pub use session::source::{FrameSlot, FrameSource, VideoFeed};
pub use session::state::{Session, StepOutput};
pub use transform::evaluate::{evaluate_grade, evaluate_pixel, render_frame};
pub use transform::params::{BlendWeights, FilterMode, FilterParameterSet, GradeParams};
