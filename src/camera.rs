use crate::ray::Ray;
use crate::rtweekend::degrees_to_radians;
use crate::vec3::{Point, Vec3};

/// Pinhole camera with a look-at orientation. The image plane sits at unit
/// distance along the viewing direction; `get_ray` maps normalized image
/// coordinates onto it through the cached corner and span vectors.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Point,
    lower_left_corner: Point,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Builds the camera basis from a position, a target point and an up
    /// hint.
    ///
    /// # Arguments
    /// * `vfov`: vertical field of view in degrees
    /// * `aspect_ratio`: width over height of the viewport
    pub fn new(position: Point, look_at: Point, up: Vec3, vfov: f64, aspect_ratio: f64) -> Camera {
        let theta = degrees_to_radians(vfov);
        let half_height = (theta / 2.0).tan();
        let half_width = aspect_ratio * half_height;

        let forward = (look_at - position).unit_vector();
        let right = forward.cross(&up.unit_vector()).unit_vector();
        let up_corrected = right.cross(&forward).unit_vector();

        Camera {
            origin: position,
            lower_left_corner: position + forward
                - right * half_width
                - up_corrected * half_height,
            horizontal: right * (2.0 * half_width),
            vertical: up_corrected * (2.0 * half_height),
        }
    }

    /// Primary ray through normalized image coordinates `u, v` in [0,1],
    /// measured from the lower left corner of the image plane.
    pub fn get_ray(&self, u: f64, v: f64) -> Ray {
        let target = self.lower_left_corner + self.horizontal * u + self.vertical * v;
        Ray::new(&self.origin, &(target - self.origin))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn center_ray_points_at_the_look_target() {
        let camera = Camera::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(0.0, 0.0, -5.0),
            Vec3::new(0.0, 1.0, 0.0),
            60.0,
            16.0 / 9.0,
        );
        let ray = camera.get_ray(0.5, 0.5);
        assert!((ray.direction() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-12);
        assert_eq!(ray.origin(), Point::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn corner_rays_are_symmetric_about_the_axis() {
        let camera = Camera::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            90.0,
            1.0,
        );
        let lower_left = camera.get_ray(0.0, 0.0).direction();
        let upper_right = camera.get_ray(1.0, 1.0).direction();
        assert!((lower_left.x() + upper_right.x()).abs() < 1e-12);
        assert!((lower_left.y() + upper_right.y()).abs() < 1e-12);
        assert!((lower_left.z() - upper_right.z()).abs() < 1e-12);
    }

    #[test]
    fn antiparallel_up_hint_degenerates_without_nans() {
        // Looking straight down with the default up hint collapses the
        // basis; every ray then follows the forward axis.
        let camera = Camera::new(
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            90.0,
            16.0 / 9.0,
        );
        let ray = camera.get_ray(0.25, 0.75);
        assert_eq!(ray.direction(), Vec3::new(0.0, -1.0, 0.0));
    }
}
