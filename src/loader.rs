use crate::camera::Camera;
use crate::lights::{AmbientLight, DirectionalLight, Light, PointLight};
use crate::material::Material;
use crate::objects::{Object, Plane, Sphere};
use crate::scene::Scene;
use crate::vec3::{Color, Vec3};
use std::fs;
use std::io;
use std::path::Path;

// The text format fixes the camera frame: the up hint and the aspect ratio
// are not part of the CAMERA command.
const ASPECT_RATIO: f64 = 16.0 / 9.0;

/// Reads and parses a scene file. Only the read itself can fail; malformed
/// lines are reported to stderr and skipped.
pub fn load_scene(path: &Path) -> io::Result<Scene> {
    let text = fs::read_to_string(path)?;
    Ok(parse_scene(&text))
}

/// Parses the line-oriented scene text. Blank lines and `#` comments are
/// ignored; keywords are case-insensitive; every diagnostic carries the
/// offending line number. Missing camera, lights or objects produce warnings
/// after the pass, not errors.
pub fn parse_scene(text: &str) -> Scene {
    let mut scene = Scene::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line_num = index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let command = tokens[0].to_uppercase();

        match command.as_str() {
            "CAMERA" => {
                if tokens.len() < 8 {
                    eprintln!("Line {line_num}: CAMERA requires 7 parameters");
                    continue;
                }
                let Some(args) = parse_floats(&tokens[1..8], line_num) else {
                    continue;
                };
                let position = Vec3::new(args[0], args[1], args[2]);
                let look_at = Vec3::new(args[3], args[4], args[5]);
                let fov = args[6];
                let up = Vec3::new(0.0, 1.0, 0.0);
                scene.set_camera(Camera::new(position, look_at, up, fov, ASPECT_RATIO));
            }

            "LIGHT" => {
                if tokens.len() < 5 {
                    eprintln!("Line {line_num}: LIGHT requires at least 4 parameters");
                    continue;
                }
                let Some(args) = parse_floats(&tokens[1..5], line_num) else {
                    continue;
                };
                let Some(color) = optional_color(&tokens, 5, line_num) else {
                    continue;
                };
                let position = Vec3::new(args[0], args[1], args[2]);
                scene.add_light(Light::Point(PointLight::new(position, args[3], color)));
            }

            "DIRECTIONAL_LIGHT" => {
                if tokens.len() < 5 {
                    eprintln!("Line {line_num}: DIRECTIONAL_LIGHT requires at least 4 parameters");
                    continue;
                }
                let Some(args) = parse_floats(&tokens[1..5], line_num) else {
                    continue;
                };
                let Some(color) = optional_color(&tokens, 5, line_num) else {
                    continue;
                };
                let direction = Vec3::new(args[0], args[1], args[2]);
                scene.add_light(Light::Directional(DirectionalLight::new(
                    direction, args[3], color,
                )));
            }

            "AMBIENT_LIGHT" => {
                if tokens.len() < 2 {
                    eprintln!("Line {line_num}: AMBIENT_LIGHT requires at least 1 parameter");
                    continue;
                }
                let Some(args) = parse_floats(&tokens[1..2], line_num) else {
                    continue;
                };
                let Some(color) = optional_color(&tokens, 2, line_num) else {
                    continue;
                };
                scene.add_light(Light::Ambient(AmbientLight::new(args[0], color)));
            }

            "SPHERE" => {
                if tokens.len() < 8 {
                    eprintln!("Line {line_num}: SPHERE requires at least 7 parameters");
                    continue;
                }
                let upto = tokens.len().min(13);
                let Some(args) = parse_floats(&tokens[1..upto], line_num) else {
                    continue;
                };
                let center = Vec3::new(args[0], args[1], args[2]);
                let radius = args[3];
                let color = Vec3::new(args[4], args[5], args[6]);
                let material = Material::new(
                    color,
                    args.get(7).copied().unwrap_or(0.1),
                    args.get(8).copied().unwrap_or(0.7),
                    args.get(9).copied().unwrap_or(0.2),
                    args.get(10).copied().unwrap_or(32.0),
                    args.get(11).copied().unwrap_or(0.0),
                );
                scene.add_object(Object::Sphere(Sphere::new(center, radius, material)));
            }

            "PLANE" => {
                if tokens.len() < 10 {
                    eprintln!("Line {line_num}: PLANE requires at least 9 parameters");
                    continue;
                }
                let upto = tokens.len().min(14);
                let Some(args) = parse_floats(&tokens[1..upto], line_num) else {
                    continue;
                };
                let point = Vec3::new(args[0], args[1], args[2]);
                let normal = Vec3::new(args[3], args[4], args[5]);
                let color = Vec3::new(args[6], args[7], args[8]);
                // The PLANE command has no shininess slot; it stays at 10.
                let material = Material::new(
                    color,
                    args.get(9).copied().unwrap_or(0.1),
                    args.get(10).copied().unwrap_or(0.7),
                    args.get(11).copied().unwrap_or(0.1),
                    10.0,
                    args.get(12).copied().unwrap_or(0.0),
                );
                scene.add_object(Object::Plane(Plane::new(point, normal, material)));
            }

            "BACKGROUND" => {
                if tokens.len() < 4 {
                    eprintln!("Line {line_num}: BACKGROUND requires 3 parameters");
                    continue;
                }
                let Some(args) = parse_floats(&tokens[1..4], line_num) else {
                    continue;
                };
                scene.set_background(Color::new(args[0], args[1], args[2]));
            }

            _ => eprintln!("Line {line_num}: unknown command '{command}'"),
        }
    }

    if scene.camera.is_none() {
        eprintln!("Warning: no camera defined in the scene!");
    }
    if scene.lights.is_empty() {
        eprintln!("Warning: no lights defined in the scene!");
    }
    if scene.objects.is_empty() {
        eprintln!("Warning: no objects defined in the scene!");
    }

    scene
}

fn parse_floats(tokens: &[&str], line_num: usize) -> Option<Vec<f64>> {
    match tokens.iter().map(|t| t.parse::<f64>()).collect() {
        Ok(values) => Some(values),
        Err(e) => {
            eprintln!("Line {line_num}: parse error - {e}");
            None
        }
    }
}

/// Optional trailing `r g b` triple; white when absent. A partial triple is
/// ignored, a malformed one skips the line.
fn optional_color(tokens: &[&str], from: usize, line_num: usize) -> Option<Color> {
    if tokens.len() >= from + 3 {
        let values = parse_floats(&tokens[from..from + 3], line_num)?;
        Some(Color::new(values[0], values[1], values[2]))
    } else {
        Some(Color::new(1.0, 1.0, 1.0))
    }
}
