use config::ConfigError;
use serde::Deserialize;
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};

/// Encodings the CLI can write. PPM is the native P3 text encoder; PNG goes
/// through the `image` crate.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Ppm,
    Png,
}

/// Render parameters, merged from `configuration/base.yaml` and the CLI's
/// positional arguments. Every field is optional in the file.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RenderSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub width: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub height: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub samples_per_pixel: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_depth: u32,
    /// Base seed for the per-pixel jitter streams. Fixing it makes renders
    /// reproducible across runs and thread counts; leaving it unset draws
    /// jitter from the thread RNG.
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub seed: Option<u64>,
    pub format: ImageFormat,
    pub scene: String,
    pub path: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            width: 1920,
            height: 1080,
            samples_per_pixel: 4,
            max_depth: 3,
            seed: None,
            format: ImageFormat::Ppm,
            scene: "scenes/simple.txt".to_string(),
            path: "output/render.ppm".to_string(),
        }
    }
}

/// Loads `configuration/base.yaml` from the working directory. Callers fall
/// back to [`RenderSettings::default`] when the file is absent so the CLI
/// works from a bare checkout.
pub fn load_configuration() -> Result<RenderSettings, ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");
    let f = config::File::from(configuration_directory.join("base.yaml"));
    let settings = config::Config::builder().add_source(f).build()?;

    settings.try_deserialize::<RenderSettings>()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_match_the_cli_contract() {
        let settings = RenderSettings::default();
        assert_eq!(settings.width, 1920);
        assert_eq!(settings.height, 1080);
        assert_eq!(settings.samples_per_pixel, 4);
        assert_eq!(settings.max_depth, 3);
        assert_eq!(settings.scene, "scenes/simple.txt");
        assert_eq!(settings.path, "output/render.ppm");
        assert_eq!(settings.format, ImageFormat::Ppm);
        assert!(settings.seed.is_none());
    }
}
