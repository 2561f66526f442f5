use crate::camera::Camera;
use crate::configuration::RenderSettings;
use crate::lights::Light;
use crate::material::Material;
use crate::ray::Ray;
use crate::rtweekend::{random_in_unit_interval, EPSILON, INFINITY};
use crate::scene::Scene;
use crate::vec3::{Color, Point, Vec3};
use rand::prelude::*;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};

// Completed-row interval between progress callbacks.
const PROGRESS_INTERVAL: u64 = 50;

/// Renders the scene into a top-to-bottom grid of linear colors, one row per
/// entry. Rows render in parallel; the scene is only read, every row is an
/// independent write, and with a configured seed each pixel draws from its
/// own jitter stream, so the result is identical to a sequential render.
///
/// The progress callback receives a percentage every 50 completed rows and
/// once at the end.
///
/// # Panics
/// Panics when the scene has no camera; the CLI rejects such scenes before
/// rendering.
pub fn render<F>(settings: &RenderSettings, scene: &Scene, progress_callback: F) -> Vec<Vec<Color>>
where
    F: Fn(f64) + Sync + Send,
{
    let camera = scene
        .camera
        .as_ref()
        .expect("cannot render a scene without a camera");
    let rows_completed = AtomicU64::new(0);

    (0..settings.height)
        .into_par_iter()
        .map(|j| {
            let row = (0..settings.width)
                .map(|i| sample_pixel(settings, scene, camera, i, j))
                .collect();

            let done = rows_completed.fetch_add(1, Ordering::SeqCst) + 1;
            if done % PROGRESS_INTERVAL == 0 || done == settings.height as u64 {
                progress_callback(done as f64 / settings.height as f64 * 100.0);
            }

            row
        })
        .collect()
}

/// Averages the configured number of jittered samples through pixel (i, j).
/// A single sample goes through the exact pixel coordinate instead.
fn sample_pixel(
    settings: &RenderSettings,
    scene: &Scene,
    camera: &Camera,
    i: u32,
    j: u32,
) -> Color {
    if settings.samples_per_pixel > 1 {
        let mut rng = settings.seed.map(|seed| {
            let pixel_index = j as u64 * settings.width as u64 + i as u64;
            StdRng::seed_from_u64(seed.wrapping_add(pixel_index))
        });

        let mut color_sum = Color::default();
        for _ in 0..settings.samples_per_pixel {
            let u = pixel_coord(i as f64 + jitter(&mut rng), settings.width);
            let v = 1.0 - pixel_coord(j as f64 + jitter(&mut rng), settings.height);
            let ray = camera.get_ray(u, v);
            color_sum += trace_ray(scene, &ray, 0, settings.max_depth);
        }
        color_sum / settings.samples_per_pixel as f64
    } else {
        let u = pixel_coord(i as f64, settings.width);
        let v = 1.0 - pixel_coord(j as f64, settings.height);
        let ray = camera.get_ray(u, v);
        trace_ray(scene, &ray, 0, settings.max_depth)
    }
}

// A one-pixel axis has no span to interpolate over; aim through its center.
fn pixel_coord(x: f64, extent: u32) -> f64 {
    if extent > 1 {
        x / (extent - 1) as f64
    } else {
        0.5
    }
}

fn jitter(rng: &mut Option<StdRng>) -> f64 {
    match rng {
        Some(rng) => rng.gen(),
        None => random_in_unit_interval(),
    }
}

/// Casts a ray into the scene: closest hit, Phong shade, then a mirror
/// bounce blended by the material's reflectivity. Recursion stops at
/// `max_depth`, returning black.
fn trace_ray(scene: &Scene, ray: &Ray, depth: u32, max_depth: u32) -> Color {
    if depth >= max_depth {
        return Color::new(0.0, 0.0, 0.0);
    }

    let Some((object, hit)) = scene.objects.hit(ray) else {
        return scene.background_color;
    };

    let hit_point = ray.at(hit.t);
    let material = object.material();
    let mut color = shade(scene, &hit_point, &hit.normal, &ray.direction(), material);

    if material.reflectivity > 0.0 {
        let reflect_dir = Vec3::reflect(&ray.direction(), &hit.normal);
        // Spawn off the surface to avoid re-hitting it.
        let reflect_ray = Ray::new(&(hit_point + hit.normal * EPSILON), &reflect_dir);
        let reflect_color = trace_ray(scene, &reflect_ray, depth + 1, max_depth);
        color = color * (1.0 - material.reflectivity) + reflect_color * material.reflectivity;
    }

    color
}

/// Phong illumination at a surface point. The material's own ambient term is
/// the starting point; an AmbientLight in the scene replaces it (last one
/// wins). Point and directional lights contribute diffuse and specular terms
/// unless a shadow feeler finds an occluder. The result is clamped to [0,1].
fn shade(scene: &Scene, point: &Point, normal: &Vec3, view_dir: &Vec3, material: &Material) -> Color {
    let mut ambient = material.color * material.ambient;
    let mut diffuse = Color::default();
    let mut specular = Color::default();

    for light in &scene.lights {
        let (light_dir, light_distance, intensity, light_color) = match light {
            Light::Ambient(light) => {
                ambient = material.color * light.color * (material.ambient * light.intensity);
                continue;
            }
            // The stored direction points toward the scene; the shading
            // vector points from the surface toward the light.
            Light::Directional(light) => (-light.direction, INFINITY, light.intensity, light.color),
            Light::Point(light) => (
                (light.position - *point).unit_vector(),
                (light.position - *point).length(),
                light.intensity,
                light.color,
            ),
        };

        let shadow_ray = Ray::new(&(*point + *normal * EPSILON), &light_dir);
        if scene.objects.is_blocked(&shadow_ray, light_distance) {
            continue;
        }

        let diffuse_intensity = f64::max(0.0, normal.dot(&light_dir));
        diffuse += material.color * light_color * (material.diffuse * diffuse_intensity * intensity);

        if diffuse_intensity > 0.0 {
            let reflect_dir = Vec3::reflect(&(-light_dir), normal);
            let to_viewer = -view_dir.unit_vector();
            let spec_intensity =
                f64::max(0.0, reflect_dir.dot(&to_viewer)).powf(material.shininess);
            specular += light_color * (material.specular * spec_intensity * intensity);
        }
    }

    (ambient + diffuse + specular).clamp(0.0, 1.0)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lights::{AmbientLight, DirectionalLight, PointLight};
    use crate::objects::{Object, Plane, Sphere};

    fn settings(width: u32, height: u32, samples: u32) -> RenderSettings {
        RenderSettings {
            width,
            height,
            samples_per_pixel: samples,
            seed: Some(7),
            ..RenderSettings::default()
        }
    }

    fn camera_at_origin_looking(look_at: Point, fov: f64) -> Camera {
        Camera::new(
            Point::new(0.0, 0.0, 0.0),
            look_at,
            Vec3::new(0.0, 1.0, 0.0),
            fov,
            16.0 / 9.0,
        )
    }

    fn matte(color: Color) -> Material {
        Material::new(color, 0.1, 0.7, 0.0, 1.0, 0.0)
    }

    fn mirror() -> Material {
        Material::new(Color::new(1.0, 1.0, 1.0), 0.0, 0.0, 0.0, 1.0, 1.0)
    }

    fn assert_color_close(a: &Color, b: &Color) {
        assert!((*a - *b).length() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn empty_scene_renders_the_background_everywhere() {
        let mut scene = Scene::new();
        scene.set_camera(camera_at_origin_looking(Point::new(0.0, 0.0, -1.0), 60.0));
        scene.set_background(Color::new(0.2, 0.4, 0.6));

        let image = render(&settings(4, 3, 1), &scene, |_| {});

        assert_eq!(image.len(), 3);
        for row in &image {
            assert_eq!(row.len(), 4);
            for pixel in row {
                assert_color_close(pixel, &Color::new(0.2, 0.4, 0.6));
            }
        }
    }

    #[test]
    fn head_on_sphere_gets_full_ambient_plus_diffuse() {
        let mut scene = Scene::new();
        scene.set_camera(camera_at_origin_looking(Point::new(0.0, 0.0, -5.0), 60.0));
        scene.add_object(Object::Sphere(Sphere::new(
            Point::new(0.0, 0.0, -5.0),
            1.0,
            Material::new(Color::new(1.0, 0.0, 0.0), 0.1, 0.7, 0.0, 1.0, 0.0),
        )));
        scene.add_light(Light::Point(PointLight::new(
            Point::new(0.0, 0.0, 0.0),
            1.0,
            Color::new(1.0, 1.0, 1.0),
        )));

        let image = render(&settings(1, 1, 1), &scene, |_| {});

        assert_color_close(&image[0][0], &Color::new(0.8, 0.0, 0.0));
    }

    #[test]
    fn downward_camera_sees_the_ambient_lit_plane() {
        let mut scene = Scene::new();
        scene.set_camera(Camera::new(
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            90.0,
            16.0 / 9.0,
        ));
        scene.add_object(Object::Plane(Plane::new(
            Point::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            matte(Color::new(0.5, 0.5, 0.5)),
        )));
        scene.add_light(Light::Ambient(AmbientLight::new(
            1.0,
            Color::new(1.0, 1.0, 1.0),
        )));

        let image = render(&settings(2, 2, 1), &scene, |_| {});

        for row in &image {
            for pixel in row {
                assert_color_close(pixel, &Color::new(0.05, 0.05, 0.05));
            }
        }
    }

    #[test]
    fn occluded_point_keeps_only_the_ambient_term() {
        let mut scene = Scene::new();
        let material = Material::new(Color::new(0.3, 0.6, 0.9), 0.1, 0.7, 0.2, 32.0, 0.0);
        scene.add_object(Object::Sphere(Sphere::new(
            Point::new(0.0, 0.0, 0.0),
            1.0,
            material,
        )));
        scene.add_object(Object::Sphere(Sphere::new(
            Point::new(0.0, 0.0, 5.0),
            1.0,
            Material::default(),
        )));
        scene.add_light(Light::Point(PointLight::new(
            Point::new(0.0, 0.0, 10.0),
            1.0,
            Color::new(1.0, 1.0, 1.0),
        )));

        // Lit face of the first sphere, pointing at the light but occluded
        // by the second sphere.
        let point = Point::new(0.0, 0.0, 1.0);
        let normal = Vec3::new(0.0, 0.0, 1.0);
        let view = Vec3::new(0.0, 0.0, -1.0);
        let color = shade(&scene, &point, &normal, &view, &material);

        assert_color_close(&color, &(material.color * material.ambient));
    }

    #[test]
    fn unoccluded_directional_light_adds_diffuse() {
        let mut scene = Scene::new();
        let material = Material::new(Color::new(1.0, 1.0, 1.0), 0.0, 0.5, 0.0, 1.0, 0.0);
        scene.add_object(Object::Plane(Plane::new(
            Point::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            material,
        )));
        scene.add_light(Light::Directional(DirectionalLight::new(
            Vec3::new(0.0, -1.0, 0.0),
            1.0,
            Color::new(1.0, 1.0, 1.0),
        )));

        let color = shade(
            &scene,
            &Point::new(0.0, 0.0, 0.0),
            &Vec3::new(0.0, 1.0, 0.0),
            &Vec3::new(0.0, -1.0, 0.0),
            &material,
        );

        assert_color_close(&color, &Color::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn last_ambient_light_wins() {
        let mut scene = Scene::new();
        let material = Material::new(Color::new(1.0, 1.0, 1.0), 0.5, 0.0, 0.0, 1.0, 0.0);
        scene.add_light(Light::Ambient(AmbientLight::new(
            1.0,
            Color::new(1.0, 0.0, 0.0),
        )));
        scene.add_light(Light::Ambient(AmbientLight::new(
            0.4,
            Color::new(0.0, 1.0, 0.0),
        )));

        let color = shade(
            &scene,
            &Point::new(0.0, 0.0, 0.0),
            &Vec3::new(0.0, 1.0, 0.0),
            &Vec3::new(0.0, -1.0, 0.0),
            &material,
        );

        assert_color_close(&color, &Color::new(0.0, 0.2, 0.0));
    }

    #[test]
    fn parallel_mirrors_terminate_at_the_depth_bound() {
        let mut scene = Scene::new();
        scene.set_background(Color::new(1.0, 1.0, 1.0));
        scene.add_object(Object::Plane(Plane::new(
            Point::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            mirror(),
        )));
        scene.add_object(Object::Plane(Plane::new(
            Point::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, -1.0),
            mirror(),
        )));

        let ray = Ray::new(&Point::new(0.0, 0.0, 2.5), &Vec3::new(0.0, 0.0, 1.0));
        let color = trace_ray(&scene, &ray, 0, 3);

        assert_color_close(&color, &Color::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn perfect_mirror_returns_the_background_head_on() {
        let mut scene = Scene::new();
        scene.set_background(Color::new(0.2, 0.4, 0.6));
        scene.add_object(Object::Sphere(Sphere::new(
            Point::new(0.0, 0.0, -5.0),
            1.0,
            mirror(),
        )));

        let ray = Ray::new(&Point::new(0.0, 0.0, 0.0), &Vec3::new(0.0, 0.0, -1.0));
        let color = trace_ray(&scene, &ray, 0, 3);

        assert_color_close(&color, &scene.background_color);
    }

    #[test]
    fn sampling_a_uniform_scene_averages_to_the_background() {
        let mut scene = Scene::new();
        scene.set_camera(camera_at_origin_looking(Point::new(0.0, 0.0, -1.0), 60.0));
        // Exact binary fractions keep the four-sample average exact.
        scene.set_background(Color::new(0.25, 0.5, 0.75));

        let image = render(&settings(3, 2, 4), &scene, |_| {});

        for row in &image {
            for pixel in row {
                assert_eq!(*pixel, Color::new(0.25, 0.5, 0.75));
            }
        }
    }

    #[test]
    fn seeded_renders_are_reproducible() {
        let mut scene = Scene::new();
        scene.set_camera(camera_at_origin_looking(Point::new(0.0, 0.0, -3.0), 60.0));
        scene.set_background(Color::new(0.0, 0.0, 1.0));
        scene.add_object(Object::Sphere(Sphere::new(
            Point::new(0.0, 0.0, -3.0),
            1.0,
            matte(Color::new(1.0, 0.0, 0.0)),
        )));
        scene.add_light(Light::Ambient(AmbientLight::new(
            1.0,
            Color::new(1.0, 1.0, 1.0),
        )));

        let first = render(&settings(16, 9, 4), &scene, |_| {});
        let second = render(&settings(16, 9, 4), &scene, |_| {});

        assert_eq!(first, second);
    }

    #[test]
    fn silhouette_pixels_blend_object_and_background() {
        let mut scene = Scene::new();
        scene.set_camera(camera_at_origin_looking(Point::new(0.0, 0.0, -3.0), 60.0));
        scene.set_background(Color::new(0.0, 0.0, 1.0));
        // Ambient coefficient 1 with a full ambient light makes the sphere
        // flat red, so every sample is either pure red or pure blue.
        scene.add_object(Object::Sphere(Sphere::new(
            Point::new(0.0, 0.0, -3.0),
            1.0,
            Material::new(Color::new(1.0, 0.0, 0.0), 1.0, 0.0, 0.0, 1.0, 0.0),
        )));
        scene.add_light(Light::Ambient(AmbientLight::new(
            1.0,
            Color::new(1.0, 1.0, 1.0),
        )));

        let image = render(&settings(32, 32, 4), &scene, |_| {});

        let blended = image.iter().flatten().any(|pixel| {
            pixel.x() > 1e-9 && pixel.x() < 1.0 - 1e-9
        });
        assert!(blended, "expected at least one anti-aliased edge pixel");
    }

    #[test]
    fn progress_is_reported_for_the_final_row() {
        let mut scene = Scene::new();
        scene.set_camera(camera_at_origin_looking(Point::new(0.0, 0.0, -1.0), 60.0));

        let reported = std::sync::Mutex::new(Vec::new());
        render(&settings(2, 2, 1), &scene, |p| {
            reported.lock().unwrap().push(p);
        });

        let reported = reported.into_inner().unwrap();
        assert!(reported.iter().any(|p| (*p - 100.0).abs() < 1e-9));
    }
}
