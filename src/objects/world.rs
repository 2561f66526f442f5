use crate::objects::{Hit, Object};
use crate::ray::Ray;

/// The scene's primitives in one flat collection, iterated linearly for both
/// closest-hit and occlusion queries. No acceleration structure; the cost of
/// a query is proportional to the object count.
#[derive(Debug, Clone, Default)]
pub struct World {
    objects: Vec<Object>,
}

impl World {
    pub fn new() -> World {
        World::default()
    }

    pub fn add(&mut self, object: Object) {
        self.objects.push(object);
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Closest intersection along the ray, together with the object that was
    /// hit.
    pub fn hit(&self, ray: &Ray) -> Option<(&Object, Hit)> {
        let mut closest: Option<(&Object, Hit)> = None;

        for object in &self.objects {
            if let Some(hit) = object.intersect(ray) {
                if closest.as_ref().map_or(true, |(_, best)| hit.t < best.t) {
                    closest = Some((object, hit));
                }
            }
        }

        closest
    }

    /// Occlusion query for shadow feelers: true as soon as any object lies
    /// closer than `max_distance` along the ray.
    pub fn is_blocked(&self, ray: &Ray, max_distance: f64) -> bool {
        self.objects
            .iter()
            .any(|object| matches!(object.intersect(ray), Some(hit) if hit.t < max_distance))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::material::Material;
    use crate::objects::Sphere;
    use crate::rtweekend::INFINITY;
    use crate::vec3::{Point, Vec3};

    fn two_spheres_in_line() -> World {
        let mut world = World::new();
        world.add(Object::Sphere(Sphere::new(
            Point::new(0.0, 0.0, -5.0),
            1.0,
            Material::default(),
        )));
        world.add(Object::Sphere(Sphere::new(
            Point::new(0.0, 0.0, -10.0),
            1.0,
            Material::default(),
        )));
        world
    }

    #[test]
    fn hit_returns_the_closest_object() {
        let world = two_spheres_in_line();
        let ray = Ray::new(&Point::new(0.0, 0.0, 0.0), &Vec3::new(0.0, 0.0, -1.0));
        let (_, hit) = world.hit(&ray).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-12);
    }

    #[test]
    fn empty_world_never_hits() {
        let world = World::new();
        let ray = Ray::new(&Point::new(0.0, 0.0, 0.0), &Vec3::new(0.0, 0.0, -1.0));
        assert!(world.hit(&ray).is_none());
        assert!(!world.is_blocked(&ray, INFINITY));
    }

    #[test]
    fn occlusion_respects_the_distance_limit() {
        let world = two_spheres_in_line();
        let ray = Ray::new(&Point::new(0.0, 0.0, 0.0), &Vec3::new(0.0, 0.0, -1.0));
        assert!(world.is_blocked(&ray, INFINITY));
        // Both spheres sit beyond a limit of 3 units.
        assert!(!world.is_blocked(&ray, 3.0));
    }
}
