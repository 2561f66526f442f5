use indicatif::{ProgressBar, ProgressStyle};
use raytracer::utils::PI;
use raytracer::{load_scene, render, write_ppm, RenderSettings};
use std::fs;
use std::path::Path;
use std::process;

// One scene file and one rendered frame per animation step.
const SCENES_DIR: &str = "scenes/animation";
const OUTPUT_DIR: &str = "output/animation";

fn main() {
    process::exit(run());
}

/// `animate [frames] [width] [height]`: writes a rotated copy of the orbit
/// scene for every frame, then renders each one in-process.
fn run() -> i32 {
    let args: Vec<String> = std::env::args().collect();
    let frames: u32 = match args.get(1).map(|arg| arg.parse()) {
        None => 30,
        Some(Ok(frames)) if frames > 0 => frames,
        Some(_) => {
            eprintln!("Error: invalid frame count");
            return 1;
        }
    };
    let width: u32 = match args.get(2).map(|arg| arg.parse()) {
        None => 640,
        Some(Ok(width)) => width,
        Some(Err(_)) => {
            eprintln!("Error: invalid width");
            return 1;
        }
    };
    let height: u32 = match args.get(3).map(|arg| arg.parse()) {
        None => 360,
        Some(Ok(height)) => height,
        Some(Err(_)) => {
            eprintln!("Error: invalid height");
            return 1;
        }
    };

    for dir in [SCENES_DIR, OUTPUT_DIR] {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Error: cannot create '{dir}': {e}");
            return 1;
        }
    }

    println!("Generating {frames} scenes...");
    for frame in 0..frames {
        let path = format!("{SCENES_DIR}/frame_{frame:03}.txt");
        if let Err(e) = fs::write(&path, frame_scene(frame, frames)) {
            eprintln!("Error: cannot write '{path}': {e}");
            return 1;
        }
    }

    println!("Rendering {frames} frames at {width}x{height}...");
    let bar = ProgressBar::new(frames as u64);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len}",
        )
        .unwrap()
        .progress_chars("#>-"),
    );

    for frame in 0..frames {
        let scene_file = format!("{SCENES_DIR}/frame_{frame:03}.txt");
        let output_file = format!("{OUTPUT_DIR}/frame_{frame:03}.ppm");

        let scene = match load_scene(Path::new(&scene_file)) {
            Ok(scene) => scene,
            Err(e) => {
                eprintln!("Error: cannot read '{scene_file}': {e}");
                return 1;
            }
        };
        if scene.camera.is_none() {
            eprintln!("Error: no camera in '{scene_file}'");
            return 1;
        }

        let settings = RenderSettings {
            width,
            height,
            seed: Some(frame as u64),
            ..RenderSettings::default()
        };
        let pixels = render(&settings, &scene, |_| {});

        if let Err(e) = write_ppm(Path::new(&output_file), &pixels) {
            eprintln!("Error: cannot write '{output_file}': {e}");
            return 1;
        }
        bar.inc(1);
    }
    bar.finish();

    println!("Done! Frames in {OUTPUT_DIR}");
    0
}

/// Rotates (x, z) around a center in the ground plane.
fn rotate_point(x: f64, z: f64, angle: f64, center_x: f64, center_z: f64) -> (f64, f64) {
    let (x, z) = (x - center_x, z - center_z);
    let (sin_a, cos_a) = angle.sin_cos();
    (
        x * cos_a - z * sin_a + center_x,
        x * sin_a + z * cos_a + center_z,
    )
}

/// Scene text for one animation step: red and blue spheres orbiting a fixed
/// green one above a reflective ground plane.
fn frame_scene(frame: u32, total: u32) -> String {
    let angle = 2.0 * PI * frame as f64 / total as f64;

    let (center_x, center_y, center_z) = (0.0, 0.7, -0.5);
    let (red_x, red_z) = rotate_point(-2.0, 0.0, angle, center_x, center_z);
    let red_y = 1.0;
    let (blue_x, blue_z) = rotate_point(2.5, -1.0, angle, center_x, center_z);
    let blue_y = 1.2;

    format!(
        "# Frame {frame}/{total}\n\
         \n\
         CAMERA 0 2 8  0 0 0  50\n\
         \n\
         LIGHT 5 10 5  1.0\n\
         LIGHT -3 5 3  0.5\n\
         \n\
         BACKGROUND 0.2 0.2 0.3\n\
         \n\
         PLANE 0 0 0  0 1 0  0.5 0.5 0.5  0.1 0.6 0.1 0.3\n\
         \n\
         # Orbiting red sphere\n\
         SPHERE {red_x:.3} {red_y} {red_z:.3}  1.0  0.8 0.2 0.2  0.1 0.7 0.3 50 0.2\n\
         \n\
         # Fixed green sphere\n\
         SPHERE {center_x} {center_y} {center_z}  0.7  0.2 0.8 0.2  0.1 0.7 0.4 60 0.1\n\
         \n\
         # Orbiting blue sphere\n\
         SPHERE {blue_x:.3} {blue_y} {blue_z:.3}  1.2  0.2 0.3 0.9  0.1 0.6 0.5 80 0.3\n"
    )
}
