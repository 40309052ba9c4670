//! Rendering pipeline: one lit pass over the scene with a UI overlay

pub mod pipeline_manager;
pub mod render_engine;

pub use pipeline_manager::{PipelineConfig, PipelineError, PipelineManager};
pub use render_engine::RenderEngine;
