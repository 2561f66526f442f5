use indicatif::{ProgressBar, ProgressStyle};
use raytracer::ppm::to_byte;
use raytracer::{load_configuration, load_scene, render, write_ppm, Color, ImageFormat, RenderSettings};
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    process::exit(run());
}

/// `raytracer [scene] [output] [width] [height] [samples]`, every argument
/// positional with defaults from the configuration layer.
fn run() -> i32 {
    let mut settings = load_configuration().unwrap_or_else(|_| RenderSettings::default());

    let args: Vec<String> = std::env::args().collect();
    if let Some(scene) = args.get(1) {
        settings.scene = scene.clone();
    }
    if let Some(path) = args.get(2) {
        settings.path = path.clone();
    }
    if let Some(arg) = args.get(3) {
        match arg.parse() {
            Ok(width) => settings.width = width,
            Err(_) => {
                eprintln!("Error: invalid width '{arg}'");
                return 1;
            }
        }
    }
    if let Some(arg) = args.get(4) {
        match arg.parse() {
            Ok(height) => settings.height = height,
            Err(_) => {
                eprintln!("Error: invalid height '{arg}'");
                return 1;
            }
        }
    }
    if let Some(arg) = args.get(5) {
        match arg.parse() {
            Ok(samples) => settings.samples_per_pixel = samples,
            Err(_) => {
                eprintln!("Error: invalid sample count '{arg}'");
                return 1;
            }
        }
    }

    // The output extension wins over the configured format.
    if settings.path.ends_with(".png") {
        settings.format = ImageFormat::Png;
    } else if settings.path.ends_with(".ppm") {
        settings.format = ImageFormat::Ppm;
    }

    println!(
        "Ray Tracer - rendering {}x{}",
        settings.width, settings.height
    );
    println!("Scene: {}", settings.scene);

    let scene_path = Path::new(&settings.scene);
    if !scene_path.exists() {
        eprintln!("Error: scene file '{}' not found", settings.scene);
        return 1;
    }

    let scene = match load_scene(scene_path) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {e}", settings.scene);
            return 1;
        }
    };
    if scene.camera.is_none() {
        eprintln!("Error: no camera in the scene");
        return 1;
    }

    let output_path = Path::new(&settings.path).to_path_buf();
    if let Some(dir) = output_path.parent() {
        if !dir.as_os_str().is_empty() {
            if let Err(e) = fs::create_dir_all(dir) {
                eprintln!("Error: cannot create '{}': {e}", dir.display());
                return 1;
            }
        }
    }

    let progress = ProgressBar::new(100);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {msg}",
        )
        .unwrap()
        .progress_chars("#>-"),
    );

    println!("Rendering...");
    let pixels = render(&settings, &scene, |percent: f64| {
        progress.set_position(percent as u64);
        progress.set_message(format!("{percent:.1}%"));
    });
    progress.finish_and_clear();

    println!("Saving...");
    let saved = match settings.format {
        ImageFormat::Ppm => write_ppm(&output_path, &pixels).map_err(|e| e.to_string()),
        ImageFormat::Png => save_png(&output_path, &pixels).map_err(|e| e.to_string()),
    };
    if let Err(e) = saved {
        eprintln!("Error: cannot write '{}': {e}", settings.path);
        return 1;
    }

    println!("Done! Image: {}", settings.path);
    0
}

fn save_png(path: &Path, pixels: &[Vec<Color>]) -> image::ImageResult<()> {
    let height = pixels.len() as u32;
    let width = pixels.first().map_or(0, Vec::len) as u32;

    let mut buffer = image::RgbImage::new(width, height);
    for (y, row) in pixels.iter().enumerate() {
        for (x, color) in row.iter().enumerate() {
            let rgb = image::Rgb([to_byte(color.x()), to_byte(color.y()), to_byte(color.z())]);
            buffer.put_pixel(x as u32, y as u32, rgb);
        }
    }

    buffer.save_with_format(path, image::ImageFormat::Png)
}
