use crate::camera::Camera;
use crate::lights::Light;
use crate::objects::{Object, World};
use crate::vec3::Color;

/// Everything the renderer reads: primitives, lights, the camera and the
/// background color. Built once by the loader, immutable during rendering.
#[derive(Debug, Clone)]
pub struct Scene {
    pub objects: World,
    pub lights: Vec<Light>,
    pub camera: Option<Camera>,
    pub background_color: Color,
}

impl Scene {
    pub fn new() -> Scene {
        Scene::default()
    }

    pub fn add_object(&mut self, object: Object) {
        self.objects.add(object);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = Some(camera);
    }

    pub fn set_background(&mut self, color: Color) {
        self.background_color = color;
    }
}

impl Default for Scene {
    fn default() -> Self {
        Scene {
            objects: World::new(),
            lights: Vec::new(),
            camera: None,
            background_color: Color::new(0.1, 0.1, 0.2),
        }
    }
}
