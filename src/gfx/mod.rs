//! # Graphics Module
//!
//! Draws what the narrative core decides: placeholder spheres for the bodies, a
//! merged starfield backdrop and the camera pose.
//!
//! - **Camera** ([`camera`]) - orbit camera; implements [`OrbitControls`] so the camera
//!   rig and mouse drag can both move it
//! - **Geometry** ([`geometry`]) - procedural spheres and starfield
//! - **Scene** ([`scene`]) - drawable objects fed from [`FrameOutput`]
//! - **Rendering** ([`rendering`]) - Lambert + emissive pipeline with depth
//! - **Resources** ([`resources`]) - global camera/light uniforms and depth buffer
//!
//! [`OrbitControls`]: crate::narrative::OrbitControls
//! [`FrameOutput`]: crate::narrative::FrameOutput

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
