//! Shared types and enums used across LSTPRO.
//! Includes `Sensor`, `AtmosphericCorrection`, `BaseBand`, `Product`
//! and the `Raster` grid alias.
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Floating-point grid; NaN marks invalid samples (sensor dropout).
pub type Raster = Array2<f64>;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Sensor {
    #[serde(rename = "Landsat_4")]
    Landsat4,
    #[serde(rename = "Landsat_5")]
    Landsat5,
    #[serde(rename = "Landsat_7")]
    Landsat7,
    #[serde(rename = "Landsat_8")]
    Landsat8,
}

impl Sensor {
    pub const ALL: [Sensor; 4] = [
        Sensor::Landsat4,
        Sensor::Landsat5,
        Sensor::Landsat7,
        Sensor::Landsat8,
    ];

    /// Identifier as used by callers and run files
    pub fn id(&self) -> &'static str {
        match self {
            Sensor::Landsat4 => "Landsat_4",
            Sensor::Landsat5 => "Landsat_5",
            Sensor::Landsat7 => "Landsat_7",
            Sensor::Landsat8 => "Landsat_8",
        }
    }
}

impl std::fmt::Display for Sensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for Sensor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sensor::ALL
            .into_iter()
            .find(|sensor| sensor.id() == s)
            .ok_or_else(|| Error::UnsupportedSensor(s.to_string()))
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum AtmosphericCorrection {
    #[default]
    None,
    /// Single dark-pixel Dark Object Subtraction
    Dos,
}

impl From<bool> for AtmosphericCorrection {
    fn from(dos_required: bool) -> Self {
        if dos_required {
            AtmosphericCorrection::Dos
        } else {
            AtmosphericCorrection::None
        }
    }
}

impl std::fmt::Display for AtmosphericCorrection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtmosphericCorrection::None => write!(f, "None"),
            AtmosphericCorrection::Dos => write!(f, "DOS"),
        }
    }
}

/// Band whose georeference is copied onto written rasters
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum BaseBand {
    #[default]
    Red,
    Thermal,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Product {
    RedRadiance,
    NirRadiance,
    ThermalRadiance,
    RedReflectance,
    NirReflectance,
    Ndvi,
    Emissivity,
    BrightnessTemperature,
    SurfaceTemperature,
}

impl Product {
    /// Thermal-domain products inherit the thermal band's georeference.
    pub fn default_base_band(&self) -> BaseBand {
        match self {
            Product::ThermalRadiance
            | Product::BrightnessTemperature
            | Product::SurfaceTemperature => BaseBand::Thermal,
            _ => BaseBand::Red,
        }
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Product::RedRadiance => "red_radiance",
            Product::NirRadiance => "nir_radiance",
            Product::ThermalRadiance => "thermal_radiance",
            Product::RedReflectance => "red_reflectance",
            Product::NirReflectance => "nir_reflectance",
            Product::Ndvi => "ndvi",
            Product::Emissivity => "emissivity",
            Product::BrightnessTemperature => "brightness_temperature",
            Product::SurfaceTemperature => "surface_temperature",
        };
        write!(f, "{}", s)
    }
}
