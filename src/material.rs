use crate::vec3::Color;

/// Phong surface parameters. `color` is the linear albedo; the scalar
/// coefficients weight the ambient, Lambertian and specular terms, and
/// `reflectivity` linearly mixes the local shade with the mirrored bounce.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub color: Color,
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
    pub reflectivity: f64,
}

impl Material {
    pub fn new(
        color: Color,
        ambient: f64,
        diffuse: f64,
        specular: f64,
        shininess: f64,
        reflectivity: f64,
    ) -> Material {
        Material {
            color,
            ambient,
            diffuse,
            specular,
            shininess,
            reflectivity,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Material {
            color: Color::new(1.0, 1.0, 1.0),
            ambient: 0.1,
            diffuse: 0.7,
            specular: 0.2,
            shininess: 32.0,
            reflectivity: 0.0,
        }
    }
}
