mod vec3_impl;

pub use vec3_impl::Vec3;

/// A geometric position in the scene.
pub type Point = Vec3;
/// A linear RGB color with components in [0,1].
pub type Color = Vec3;
