//! Session model: explicit application state, frame sources, rendering and export.

pub mod export;
pub mod renderer;
pub mod source;
pub mod state;
