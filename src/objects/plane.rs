use crate::material::Material;
use crate::objects::Hit;
use crate::ray::Ray;
use crate::rtweekend::EPSILON;
use crate::vec3::{Point, Vec3};

// Below this the ray is treated as parallel to the plane.
const PARALLEL_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone)]
pub struct Plane {
    pub point: Point,
    pub normal: Vec3,
    pub material: Material,
}

impl Plane {
    pub fn new(point: Point, normal: Vec3, material: Material) -> Plane {
        Plane {
            point,
            normal: normal.unit_vector(),
            material,
        }
    }

    /// Intersection with the infinite plane through `point` with the stored
    /// unit normal. The normal is returned as stored, also for back-face
    /// hits.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let denom = ray.direction().dot(&self.normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.point - ray.origin()).dot(&self.normal) / denom;
        if t <= EPSILON {
            return None;
        }

        Some(Hit {
            t,
            normal: self.normal,
        })
    }
}
