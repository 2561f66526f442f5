use crate::vec3::{Color, Point, Vec3};

/// Positional light with distance-limited shadow feelers.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: Point,
    pub intensity: f64,
    pub color: Color,
}

impl PointLight {
    pub fn new(position: Point, intensity: f64, color: Color) -> PointLight {
        PointLight {
            position,
            intensity,
            color,
        }
    }
}

/// Parallel light. `direction` points toward the scene and is normalized on
/// construction; shadow feelers run unbounded against it.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub intensity: f64,
    pub color: Color,
}

impl DirectionalLight {
    pub fn new(direction: Vec3, intensity: f64, color: Color) -> DirectionalLight {
        DirectionalLight {
            direction: direction.unit_vector(),
            intensity,
            color,
        }
    }
}

/// Global ambient term. When present it replaces the material's default
/// ambient contribution; with several entries the last one wins.
#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    pub intensity: f64,
    pub color: Color,
}

impl AmbientLight {
    pub fn new(intensity: f64, color: Color) -> AmbientLight {
        AmbientLight { intensity, color }
    }
}

/// The three light variants the shader dispatches over.
#[derive(Debug, Clone, Copy)]
pub enum Light {
    Point(PointLight),
    Directional(DirectionalLight),
    Ambient(AmbientLight),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn directional_light_normalizes_its_direction() {
        let light = DirectionalLight::new(Vec3::new(0.0, -4.0, 0.0), 1.0, Color::new(1.0, 1.0, 1.0));
        assert_eq!(light.direction, Vec3::new(0.0, -1.0, 0.0));
    }
}
