//! # Scene Management Module
//!
//! - [`Scene`] - camera, bodies and starfield
//! - [`Object`] - one mesh with a flat colour, emissive factor and world transform
//! - [`Vertex3D`] - position and normal vertex format

pub mod object;
pub mod scene;
pub mod vertex;

pub use object::{object_bind_group_layout, DrawObject, Mesh, Object};
pub use scene::Scene;
pub use vertex::Vertex3D;
