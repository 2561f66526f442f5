use crate::rtweekend::clamp;
use crate::vec3::Color;
use std::fs;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Maps a linear color component in [0,1] to an output byte.
pub fn to_byte(component: f64) -> u8 {
    clamp(component * 255.999, 0.0, 255.0) as u8
}

/// Writes the pixel grid as ASCII PPM (P3): `P3`, dimensions, the 255
/// maximum, then one line per row with two spaces between pixels.
pub fn write_ppm(path: &Path, image: &[Vec<Color>]) -> io::Result<()> {
    let height = image.len();
    let width = image.first().map_or(0, Vec::len);

    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "P3")?;
    writeln!(out, "{width} {height}")?;
    writeln!(out, "255")?;

    for row in image {
        for color in row {
            write!(
                out,
                "{} {} {}  ",
                to_byte(color.x()),
                to_byte(color.y()),
                to_byte(color.z())
            )?;
        }
        writeln!(out)?;
    }

    out.flush()
}

/// Reads an ASCII PPM (P3) back as `(width, height, rgb bytes)`. `#`
/// comments and blank lines are tolerated anywhere between tokens, and
/// samples are rescaled from the declared maximum to 255.
pub fn read_ppm(path: &Path) -> io::Result<(u32, u32, Vec<u8>)> {
    let text = fs::read_to_string(path)?;
    let mut tokens = text
        .lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .flat_map(str::split_whitespace);

    let magic = tokens.next().ok_or_else(|| bad_ppm("missing header"))?;
    if magic != "P3" {
        return Err(bad_ppm(&format!("expected P3, found '{magic}'")));
    }

    let width: u32 = next_number(&mut tokens, "width")?;
    let height: u32 = next_number(&mut tokens, "height")?;
    let max: u32 = next_number(&mut tokens, "maximum sample value")?;
    if max == 0 {
        return Err(bad_ppm("maximum sample value is zero"));
    }

    let expected = width as usize * height as usize * 3;
    let mut data = Vec::with_capacity(expected);
    for _ in 0..expected {
        let value: u32 = next_number(&mut tokens, "pixel sample")?;
        data.push((value as u64 * 255 / max as u64).min(255) as u8);
    }

    Ok((width, height, data))
}

fn next_number<'a, I>(tokens: &mut I, what: &str) -> io::Result<u32>
where
    I: Iterator<Item = &'a str>,
{
    let token = tokens
        .next()
        .ok_or_else(|| bad_ppm(&format!("missing {what}")))?;
    token
        .parse()
        .map_err(|_| bad_ppm(&format!("invalid {what} '{token}'")))
}

fn bad_ppm(reason: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, format!("not a valid P3 file: {reason}"))
}
