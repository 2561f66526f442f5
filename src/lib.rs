mod camera;
mod configuration;
mod lights;
mod loader;
mod material;
mod ray;
mod renderer;
mod rtweekend;
mod scene;
mod vec3;

// Exported as modules so the driver binaries can reach the individual
// primitives and codecs.
pub mod objects;
pub mod ppm;

pub use camera::Camera;
pub use configuration::{load_configuration, ImageFormat, RenderSettings};
pub use lights::{AmbientLight, DirectionalLight, Light, PointLight};
pub use loader::{load_scene, parse_scene};
pub use material::Material;
pub use ppm::{read_ppm, write_ppm};
pub use ray::Ray;
pub use renderer::render;
pub use scene::Scene;
pub use vec3::{Color, Point, Vec3};

// Re-export the numeric helpers under a friendlier name.
pub mod utils {
    pub use crate::rtweekend::*;
}
