//! Plane geometry: affine transforms, vectors, cubic Beziers and the small
//! numeric helpers the matcher needs.

pub mod bezier;
pub mod math;
pub mod transform;
pub mod vector;

pub use bezier::Bezier;
pub use glam::DVec2;
pub use math::*;
pub use transform::Transform;
pub use vector::VectorExt;
