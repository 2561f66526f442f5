use crate::material::Material;
use crate::objects::Hit;
use crate::ray::Ray;
use crate::rtweekend::EPSILON;
use crate::vec3::Point;

#[derive(Debug, Clone)]
pub struct Sphere {
    pub center: Point,
    pub radius: f64,
    pub material: Material,
}

impl Sphere {
    pub fn new(center: Point, radius: f64, material: Material) -> Sphere {
        Sphere {
            center,
            radius,
            material,
        }
    }

    /// Solves the quadratic |origin + t·d − center|² = r² and returns the
    /// nearest root above `EPSILON`. The normal always points outward, even
    /// when the ray starts inside the sphere.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().dot(&ray.direction());
        let b = 2.0 * oc.dot(&ray.direction());
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_discriminant = f64::sqrt(discriminant);
        let t1 = (-b - sqrt_discriminant) / (2.0 * a);
        let t2 = (-b + sqrt_discriminant) / (2.0 * a);

        // Nearest root in front of the ray; t1 <= t2 always.
        let t = if t1 > EPSILON {
            t1
        } else if t2 > EPSILON {
            t2
        } else {
            return None;
        };

        let normal = (ray.at(t) - self.center).unit_vector();
        Some(Hit { t, normal })
    }
}
