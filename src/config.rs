use std::{
    env, fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{de::Error as _, Deserialize, Deserializer};
use shelfpack::{GrowthPolicy, SortOrder, DEFAULT_MARGIN, DEFAULT_STEP};
use thiserror::Error;

use crate::palette::Palette;

static CONFIG_FILENAME: &str = "blockpack.toml";

/// Configuration for blockpack, contained in a blockpack.toml file.
///
/// Every setting has a default, and command line options take precedence over
/// whatever the file says.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// The bin to pack into: `"auto"` or a fixed size like `"500x400"`.
    #[serde(default)]
    pub bin: BinSize,

    /// How blocks are ordered before packing.
    #[serde(default)]
    pub sort: SortOrder,

    #[serde(default)]
    pub strategy: StrategyKind,

    /// Which way an automatically sized bin grows when a block doesn't fit.
    #[serde(default)]
    pub growth: GrowthPolicy,

    /// Seed used for scale ratios and random sorting. Unseeded runs differ
    /// every time.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub spiral: SpiralConfig,

    #[serde(default)]
    pub render: RenderConfig,

    /// The path that this config came from, if any. Relative paths in this
    /// config are resolved against the folder containing it.
    #[serde(skip)]
    pub file_path: Option<PathBuf>,
}

impl Config {
    /// Finds the config to use: the given file or folder if there is one,
    /// otherwise a blockpack.toml in the current directory, otherwise the
    /// defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::read_from_folder_or_file(path);
        }

        let current_dir = env::current_dir().map_err(|source| ConfigError::Io {
            path: PathBuf::from("."),
            source,
        })?;

        match Self::read_from_folder(&current_dir) {
            Ok(config) => Ok(config),
            Err(err) if err.is_not_found() => {
                log::trace!("No {} found, using defaults", CONFIG_FILENAME);
                Ok(Config::default())
            }
            Err(err) => Err(err),
        }
    }

    pub fn read_from_folder_or_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let meta = fs::metadata(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        if meta.is_file() {
            Self::read_from_file(path)
        } else {
            Self::read_from_folder(path)
        }
    }

    pub fn read_from_folder<P: AsRef<Path>>(folder_path: P) -> Result<Self, ConfigError> {
        let folder_path = folder_path.as_ref();
        let file_path = &folder_path.join(CONFIG_FILENAME);

        Self::read_from_file(file_path)
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        let mut config: Self = toml::from_slice(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_owned(),
            source,
        })?;
        config.file_path = Some(path.to_owned());

        log::debug!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Resolves a path from this config relative to the folder the config
    /// file is in.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match self.file_path.as_ref().and_then(|file| file.parent()) {
            Some(folder) => folder.join(path),
            None => path.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinSize {
    Auto,
    Fixed(f64, f64),
}

impl Default for BinSize {
    fn default() -> Self {
        BinSize::Auto
    }
}

impl fmt::Display for BinSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinSize::Auto => f.write_str("auto"),
            BinSize::Fixed(width, height) => write!(f, "{}x{}", width, height),
        }
    }
}

impl FromStr for BinSize {
    type Err = String;

    fn from_str(value: &str) -> Result<BinSize, Self::Err> {
        if value == "auto" || value == "automatic" {
            return Ok(BinSize::Auto);
        }

        let mut dims = value.splitn(2, 'x');
        let width = dims.next().and_then(|w| w.trim().parse::<f64>().ok());
        let height = dims.next().and_then(|h| h.trim().parse::<f64>().ok());

        match (width, height) {
            (Some(width), Some(height))
                if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 =>
            {
                Ok(BinSize::Fixed(width, height))
            }
            _ => Err(format!(
                "Invalid bin size '{}'. Use 'auto' or WIDTHxHEIGHT, like '500x400'.",
                value
            )),
        }
    }
}

impl<'de> Deserialize<'de> for BinSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;

        value.parse().map_err(D::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Pack tightly from the top-left corner using the shelf tree.
    Shelf,

    /// Spread blocks outward from the center of the bin.
    Spiral,
}

impl Default for StrategyKind {
    fn default() -> Self {
        StrategyKind::Shelf
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(value: &str) -> Result<StrategyKind, Self::Err> {
        match value {
            "shelf" => Ok(StrategyKind::Shelf),
            "spiral" => Ok(StrategyKind::Spiral),

            _ => Err(String::from(
                "Invalid strategy. Valid options are 'shelf' and 'spiral'.",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SpiralConfig {
    /// The point blocks are spread out from. Defaults to the middle of the
    /// bin.
    pub center: Option<(f64, f64)>,

    /// How far from the center blocks may reach along each axis. Defaults to
    /// half the bin size.
    pub half_extents: Option<(f64, f64)>,

    /// Distance between neighboring candidate positions.
    pub step: f64,

    /// Minimum empty space kept between any two blocks.
    pub margin: f64,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            center: None,
            half_extents: None,
            step: DEFAULT_STEP,
            margin: DEFAULT_MARGIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct RenderConfig {
    /// Pixels per layout unit.
    pub zoom: u32,

    pub palette: Palette,

    /// A folder to look for `<block name>.png` images in. Found images are
    /// drawn over the block; blocks without one keep their palette color.
    pub image_dir: Option<PathBuf>,

    /// Whether to outline each block and the bin.
    pub outline: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            zoom: 1,
            palette: Palette::default(),
            image_dir: None,
            outline: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{source} in {}", .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{source} in {}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl ConfigError {
    /// Tells whether this ConfigError originated because of a path not
    /// existing.
    pub fn is_not_found(&self) -> bool {
        match self {
            ConfigError::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.bin, BinSize::Auto);
        assert_eq!(config.sort, SortOrder::MaxSide);
        assert_eq!(config.render.zoom, 1);
    }

    #[test]
    fn full_config() {
        let config: Config = toml::from_str(
            r#"
            bin = "500x400"
            sort = "area"
            strategy = "spiral"
            growth = "prefer-right"
            seed = 7

            [spiral]
            center = [250.0, 200.0]
            step = 5.0
            margin = 2.0

            [render]
            zoom = 2
            palette = "vintage"
            image-dir = "img"
            outline = false
            "#,
        )
        .unwrap();

        assert_eq!(config.bin, BinSize::Fixed(500.0, 400.0));
        assert_eq!(config.sort, SortOrder::Area);
        assert_eq!(config.strategy, StrategyKind::Spiral);
        assert_eq!(config.growth, GrowthPolicy::PreferRight);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.spiral.center, Some((250.0, 200.0)));
        assert_eq!(config.spiral.half_extents, None);
        assert_eq!(config.spiral.step, 5.0);
        assert_eq!(config.render.palette, Palette::Vintage);
        assert_eq!(config.render.image_dir, Some(PathBuf::from("img")));
        assert!(!config.render.outline);
    }

    #[test]
    fn unknown_fields_are_errors() {
        assert!(toml::from_str::<Config>("colour = \"red\"").is_err());
        assert!(toml::from_str::<Config>("bin = \"huge\"").is_err());
    }

    #[test]
    fn parse_bin_sizes() {
        assert_eq!("auto".parse(), Ok(BinSize::Auto));
        assert_eq!("500x400".parse(), Ok(BinSize::Fixed(500.0, 400.0)));
        assert_eq!("12.5x8".parse(), Ok(BinSize::Fixed(12.5, 8.0)));

        assert!("500".parse::<BinSize>().is_err());
        assert!("0x400".parse::<BinSize>().is_err());
        assert!("axb".parse::<BinSize>().is_err());
    }

    #[test]
    fn parse_strategies() {
        assert_eq!("shelf".parse(), Ok(StrategyKind::Shelf));
        assert_eq!("spiral".parse(), Ok(StrategyKind::Spiral));
        assert!("grid".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn paths_resolve_next_to_the_config() {
        let mut config = Config::default();
        assert_eq!(config.resolve(Path::new("img")), PathBuf::from("img"));

        config.file_path = Some(PathBuf::from("boards/blockpack.toml"));
        assert_eq!(
            config.resolve(Path::new("img")),
            PathBuf::from("boards/img")
        );
    }
}
