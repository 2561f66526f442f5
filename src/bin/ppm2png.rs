use raytracer::read_ppm;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    process::exit(run());
}

/// `ppm2png <input.ppm> [output.png]`: transcodes an ASCII PPM into an
/// 8-bit truecolor PNG. The output path defaults to the input with its
/// extension swapped.
fn run() -> i32 {
    let args: Vec<String> = std::env::args().collect();
    let Some(input) = args.get(1) else {
        eprintln!("Usage: ppm2png <input.ppm> [output.png]");
        return 1;
    };
    let output = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(input).with_extension("png"));

    let (width, height, data) = match read_ppm(Path::new(input)) {
        Ok(ppm) => ppm,
        Err(e) => {
            eprintln!("Error: cannot read '{input}': {e}");
            return 1;
        }
    };

    let Some(buffer) = image::RgbImage::from_raw(width, height, data) else {
        eprintln!("Error: pixel data does not match {width}x{height}");
        return 1;
    };
    if let Err(e) = buffer.save_with_format(&output, image::ImageFormat::Png) {
        eprintln!("Error: cannot write '{}': {e}", output.display());
        return 1;
    }

    println!("Converted {input} -> {}", output.display());
    0
}
