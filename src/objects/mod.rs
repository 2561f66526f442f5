mod hittable;
mod plane;
mod sphere;
mod world;

pub use hittable::{Hit, Object};
pub use plane::Plane;
pub use sphere::Sphere;
pub use world::World;
