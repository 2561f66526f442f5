use crate::vec3::{Point, Vec3};

/// A half-line **P**(*t*) = origin + *t*·direction. The direction is
/// normalized on construction, so `t` measures Euclidean distance along the
/// ray. Only parameters above [`crate::utils::EPSILON`] count as hits.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    origin: Point,
    direction: Vec3,
}

impl Ray {
    pub fn new(origin: &Point, direction: &Vec3) -> Ray {
        Ray {
            origin: *origin,
            direction: direction.unit_vector(),
        }
    }

    pub fn at(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }
}
