// Layout configuration
// Spacing thresholds and line budget used by the flow engine, loadable from TOML

use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "flowtext";
const APPLICATION: &str = "flowtext";
const CONFIG_FILE_NAME: &str = "layout.toml";

/// Font selector handed to the glyph-metrics provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub face: u8,
    pub size: u8,
}

impl Default for FontSpec {
    fn default() -> Self {
        FontSpec { face: 0, size: 24 }
    }
}

impl FontSpec {
    pub fn new(face: u8, size: u8) -> Self {
        FontSpec { face, size }
    }
}

/// Immutable layout parameters for a Document.
///
/// All lengths are in layout units (pixels for the SVG preview).
/// `min_spacing_loose` and `min_spacing_tight` are the lowest ideograph
/// spacing a justified line may shrink to; successive lines of a paragraph
/// alternate between the two, starting loose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub line_length: f32,
    pub min_spacing_loose: f32,
    pub min_spacing_tight: f32,
    pub max_spacing: f32,
    pub best_spacing: f32,
    pub hanzi_western_spacing: f32,
    pub western_spacing: f32,
    pub row_spacing: f32,
    /// Slack allowed past `line_length` before a character overflows
    pub overflow_tolerance: f32,
    /// Tab advance, in Latin letters
    pub tab_width: u8,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            line_length: 480.0,
            min_spacing_loose: 4.0,
            min_spacing_tight: 3.0,
            max_spacing: 10.0,
            best_spacing: 5.0,
            hanzi_western_spacing: 3.0,
            western_spacing: 1.0,
            row_spacing: 10.0,
            overflow_tolerance: 0.01,
            tab_width: 4,
        }
    }
}

impl LayoutConfig {
    /// Minimum ideograph spacing for a line in the given mode
    pub fn min_spacing(&self, loose: bool) -> f32 {
        if loose {
            self.min_spacing_loose
        } else {
            self.min_spacing_tight
        }
    }

    pub fn with_line_length(mut self, line_length: f32) -> Self {
        self.line_length = line_length;
        self
    }

    /// Check that the values describe a usable layout
    pub fn validate(&self) -> Result<()> {
        if !self.line_length.is_finite() || self.line_length <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "line_length must be positive, got {}",
                self.line_length
            )));
        }

        let spacings = [
            ("min_spacing_loose", self.min_spacing_loose),
            ("min_spacing_tight", self.min_spacing_tight),
            ("max_spacing", self.max_spacing),
            ("best_spacing", self.best_spacing),
            ("hanzi_western_spacing", self.hanzi_western_spacing),
            ("western_spacing", self.western_spacing),
            ("row_spacing", self.row_spacing),
            ("overflow_tolerance", self.overflow_tolerance),
        ];
        for (name, value) in spacings {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if self.min_spacing_tight > self.min_spacing_loose {
            return Err(Error::InvalidConfig(format!(
                "min_spacing_tight ({}) exceeds min_spacing_loose ({})",
                self.min_spacing_tight, self.min_spacing_loose
            )));
        }
        if self.min_spacing_loose > self.max_spacing {
            return Err(Error::InvalidConfig(format!(
                "min_spacing_loose ({}) exceeds max_spacing ({})",
                self.min_spacing_loose, self.max_spacing
            )));
        }
        if self.tab_width == 0 {
            return Err(Error::InvalidConfig("tab_width must be at least 1".into()));
        }

        Ok(())
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Self::parse(contents, "<string>")
    }

    /// Read and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents, &path.display().to_string())
    }

    /// Load `path` if it exists, falling back to defaults on any problem
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(Error::Io(err)) if err.kind() == ErrorKind::NotFound => Self::default(),
            Err(err) => {
                log::warn!("Using default layout config: {err}");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Per-user location of `layout.toml`
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    fn parse(contents: &str, origin: &str) -> Result<Self> {
        let config =
            toml::from_str::<LayoutConfig>(contents).map_err(|source| Error::ParseConfig {
                origin: origin.to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }
}
