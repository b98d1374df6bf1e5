use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything that can be wrong with a [`SimulationConfig`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidConfig {
    #[error("particle count must be greater than zero")]
    ParticleCount,

    #[error("size range {min}..{max} is empty or negative")]
    SizeRange { min: f32, max: f32 },

    #[error("base speed must be positive, got {0}")]
    BaseSpeed(f32),

    #[error("attraction strength must not be negative, got {0}")]
    AttractionStrength(f32),

    #[error("attraction range must be positive, got {0}")]
    AttractionRange(f32),

    #[error("the colour palette is empty")]
    EmptyPalette,

    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },
}

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("unable to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration is out of range")]
    Invalid(#[from] InvalidConfig),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{0}` is not a #rgb or #rrggbb colour")]
pub struct ColorParseError(String);

/// An opaque RGB colour token handed through to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticleColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ParticleColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for ParticleColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_owned());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| err());

        match hex.len() {
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            // #abc is shorthand for #aabbcc
            3 => Ok(Self::rgb(
                channel(&hex[0..1])? * 17,
                channel(&hex[1..2])? * 17,
                channel(&hex[2..3])? * 17,
            )),
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for ParticleColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ParticleColor> for String {
    fn from(color: ParticleColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for ParticleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeRange {
    pub min: f32,
    pub max: f32,
}

impl Default for SizeRange {
    fn default() -> Self {
        Self { min: 2.0, max: 6.0 }
    }
}

/// Tunables of a particle field. Immutable once a field has been built from
/// it; changing anything means building a new field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub particle_count: usize,
    pub size_range: SizeRange,
    pub base_speed: f32,
    pub attraction_strength: f32,
    /// Radius beyond which the pointer exerts no force.
    pub attraction_range: f32,
    pub colors: Vec<ParticleColor>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: 40,
            size_range: SizeRange::default(),
            base_speed: 0.5,
            attraction_strength: 0.3,
            attraction_range: 300.0,
            colors: vec![
                ParticleColor::rgb(0x60, 0xa5, 0xfa),
                ParticleColor::rgb(0xa7, 0x8b, 0xfa),
                ParticleColor::rgb(0xf4, 0x72, 0xb6),
                ParticleColor::rgb(0xf1, 0xf5, 0xf9),
            ],
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        for (field, value) in [
            ("size_range.min", self.size_range.min),
            ("size_range.max", self.size_range.max),
            ("base_speed", self.base_speed),
            ("attraction_strength", self.attraction_strength),
            ("attraction_range", self.attraction_range),
        ] {
            if !value.is_finite() {
                return Err(InvalidConfig::NonFinite { field });
            }
        }

        let SizeRange { min, max } = self.size_range;
        if self.particle_count == 0 {
            Err(InvalidConfig::ParticleCount)
        } else if min < 0.0 || min > max || max <= 0.0 {
            Err(InvalidConfig::SizeRange { min, max })
        } else if self.base_speed <= 0.0 {
            Err(InvalidConfig::BaseSpeed(self.base_speed))
        } else if self.attraction_strength < 0.0 {
            Err(InvalidConfig::AttractionStrength(self.attraction_strength))
        } else if self.attraction_range <= 0.0 {
            Err(InvalidConfig::AttractionRange(self.attraction_range))
        } else if self.colors.is_empty() {
            Err(InvalidConfig::EmptyPalette)
        } else {
            Ok(())
        }
    }

    /// Speed factor of a particle of the given size. Smaller particles move
    /// faster: the largest size moves at half the base speed.
    pub fn speed_for_size(&self, size: f32) -> f32 {
        self.base_speed * (1.0 - size / self.size_range.max * 0.5)
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and validate a JSON configuration file. Missing fields take their
    /// default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let json = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: display.clone(),
            source,
        })?;
        let config = Self::from_json_str(&json).map_err(|source| ConfigLoadError::Parse {
            path: display,
            source,
        })?;
        config.validate()?;

        Ok(config)
    }

    /// Like [`Self::from_json_file`], falling back to the defaults on any
    /// failure.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::from_json_file(&path) {
            Ok(config) => {
                log::info!("Loaded particle configuration from {}", path.as_ref().display());
                config
            }
            Err(err) => {
                log::warn!("{:#}, using the default particle configuration", anyhow::Error::new(err));
                Self::default()
            }
        }
    }
}
