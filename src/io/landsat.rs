use chrono::{Datelike, NaiveDate, NaiveTime};
use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::io::mtl::MetadataFile;
use crate::types::{BaseBand, Sensor};

/// Where a sensor's Earth-Sun distance comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EarthSunDistanceSource {
    /// Read from the named metadata key
    Metadata(&'static str),
    /// Computed from the acquisition day of year
    DayOfYear,
}

/// Where a sensor's red/NIR exoatmospheric solar irradiance comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolarIrradianceSource {
    /// Fixed historical values, W/(m²·µm)
    Table { red: f64, nir: f64 },
    /// `π·d²·RADIANCE_MAXIMUM / REFLECTANCE_MAXIMUM` per band
    ReflectanceBounds,
}

/// Where a sensor's thermal Planck constants K1/K2 come from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThermalConstantsSource {
    Table { k1: f64, k2: f64 },
    /// `K1_CONSTANT_BAND_*` / `K2_CONSTANT_BAND_*` keys
    Metadata,
}

/// Static per-sensor description: band designators used to build metadata
/// keys, plus the constants the metadata file does not carry.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorProfile {
    pub instrument: &'static str,
    pub red_band: &'static str,
    pub nir_band: &'static str,
    pub thermal_band: &'static str,
    pub pan_band: Option<&'static str>,
    /// Thermal band central wavelength, µm
    pub thermal_wavelength: f64,
    pub solar_irradiance: SolarIrradianceSource,
    pub thermal_constants: ThermalConstantsSource,
    pub earth_sun_distance: EarthSunDistanceSource,
}

static LANDSAT_4: SensorProfile = SensorProfile {
    instrument: "TM",
    red_band: "3",
    nir_band: "4",
    thermal_band: "6",
    pan_band: None,
    thermal_wavelength: 11.45,
    solar_irradiance: SolarIrradianceSource::Table {
        red: 1557.0,
        nir: 1033.0,
    },
    thermal_constants: ThermalConstantsSource::Table {
        k1: 671.62,
        k2: 1284.30,
    },
    earth_sun_distance: EarthSunDistanceSource::DayOfYear,
};

static LANDSAT_5: SensorProfile = SensorProfile {
    instrument: "TM",
    red_band: "3",
    nir_band: "4",
    thermal_band: "6",
    pan_band: None,
    thermal_wavelength: 11.45,
    solar_irradiance: SolarIrradianceSource::Table {
        red: 1554.0,
        nir: 1036.0,
    },
    thermal_constants: ThermalConstantsSource::Table {
        k1: 607.76,
        k2: 1260.56,
    },
    earth_sun_distance: EarthSunDistanceSource::DayOfYear,
};

static LANDSAT_7: SensorProfile = SensorProfile {
    instrument: "ETM+",
    red_band: "3",
    nir_band: "4",
    // low-gain thermal channel
    thermal_band: "6_VCID_1",
    pan_band: Some("8"),
    thermal_wavelength: 11.45,
    solar_irradiance: SolarIrradianceSource::Table {
        red: 1547.0,
        nir: 1044.0,
    },
    thermal_constants: ThermalConstantsSource::Table {
        k1: 666.09,
        k2: 1282.71,
    },
    earth_sun_distance: EarthSunDistanceSource::DayOfYear,
};

static LANDSAT_8: SensorProfile = SensorProfile {
    instrument: "OLI_TIRS",
    red_band: "4",
    nir_band: "5",
    thermal_band: "11",
    pan_band: Some("8"),
    thermal_wavelength: 12.0,
    solar_irradiance: SolarIrradianceSource::ReflectanceBounds,
    thermal_constants: ThermalConstantsSource::Metadata,
    earth_sun_distance: EarthSunDistanceSource::Metadata("EARTH_SUN_DISTANCE"),
};

impl Sensor {
    pub fn profile(&self) -> &'static SensorProfile {
        match self {
            Sensor::Landsat4 => &LANDSAT_4,
            Sensor::Landsat5 => &LANDSAT_5,
            Sensor::Landsat7 => &LANDSAT_7,
            Sensor::Landsat8 => &LANDSAT_8,
        }
    }
}

fn band_key(prefix: &str, band: &str) -> String {
    format!("{}_BAND_{}", prefix, band)
}

/// Calibration and location of a single band
#[derive(Debug, Clone, PartialEq)]
pub struct BandCalibration {
    pub path: PathBuf,
    pub min_dn: f64,
    pub max_dn: f64,
    pub min_radiance: f64,
    pub max_radiance: f64,
    /// Radiance scale per DN
    pub mult: f64,
    /// Radiance offset
    pub add: f64,
}

impl BandCalibration {
    fn resolve(mtl: &MetadataFile, band: &str) -> Result<Self> {
        let file_name = mtl.lookup(&band_key("FILE_NAME", band))?;
        Ok(Self {
            path: mtl.directory().join(file_name),
            min_dn: mtl.lookup_f64(&band_key("QUANTIZE_CAL_MIN", band))?,
            max_dn: mtl.lookup_f64(&band_key("QUANTIZE_CAL_MAX", band))?,
            min_radiance: mtl.lookup_f64(&band_key("RADIANCE_MINIMUM", band))?,
            max_radiance: mtl.lookup_f64(&band_key("RADIANCE_MAXIMUM", band))?,
            mult: mtl.lookup_f64(&band_key("RADIANCE_MULT", band))?,
            add: mtl.lookup_f64(&band_key("RADIANCE_ADD", band))?,
        })
    }
}

/// Calibration parameters of one scene, resolved once per metadata file.
/// Angles are in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneMetadata {
    pub sensor: Sensor,
    pub metadata_path: PathBuf,
    pub acquisition_date: NaiveDate,
    pub acquisition_time: NaiveTime,

    pub red: BandCalibration,
    pub nir: BandCalibration,
    pub thermal: BandCalibration,
    pub pan: Option<BandCalibration>,

    pub sun_elevation: f64,
    pub sun_zenith: f64,
    pub sun_azimuth: f64,
    /// Astronomical units
    pub earth_sun_distance: f64,

    pub red_solar_irradiance: f64,
    pub nir_solar_irradiance: f64,
    pub thermal_k1: f64,
    pub thermal_k2: f64,
    /// µm
    pub thermal_wavelength: f64,
}

/// Resolve scene metadata for a sensor identifier such as `Landsat_8`.
pub fn resolve<P: AsRef<Path>>(path: P, sensor_id: &str) -> Result<SceneMetadata> {
    let sensor: Sensor = sensor_id.parse()?;
    SceneMetadata::open(path, sensor)
}

/// `1 - 0.01668·cos(2π·doy/365)`, astronomical units
pub fn earth_sun_distance_from_day_of_year(day_of_year: u32) -> f64 {
    1.0 - 0.01668 * (2.0 * PI * day_of_year as f64 / 365.0).cos()
}

fn parse_date(key: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| Error::invalid(key, value, e))
}

// SCENE_CENTER_TIME carries fractional seconds and a zone designator, e.g. 14:26:41.6510240Z
fn parse_time(key: &str, value: &str) -> Result<NaiveTime> {
    let whole = value.split('.').next().unwrap_or(value).trim_end_matches('Z');
    NaiveTime::parse_from_str(whole, "%H:%M:%S").map_err(|e| Error::invalid(key, value, e))
}

impl SceneMetadata {
    pub fn open<P: AsRef<Path>>(path: P, sensor: Sensor) -> Result<Self> {
        let mtl = MetadataFile::open(path)?;
        Self::from_metadata_file(&mtl, sensor)
    }

    pub fn from_metadata_file(mtl: &MetadataFile, sensor: Sensor) -> Result<Self> {
        info!("Reading {} metadata from {:?}", sensor, mtl.path());
        let profile = sensor.profile();

        let acquisition_date = parse_date("DATE_ACQUIRED", mtl.lookup("DATE_ACQUIRED")?)?;
        let acquisition_time =
            parse_time("SCENE_CENTER_TIME", mtl.lookup("SCENE_CENTER_TIME")?)?;

        let red = BandCalibration::resolve(mtl, profile.red_band)?;
        let nir = BandCalibration::resolve(mtl, profile.nir_band)?;
        let thermal = BandCalibration::resolve(mtl, profile.thermal_band)?;
        let pan = profile
            .pan_band
            .map(|band| BandCalibration::resolve(mtl, band))
            .transpose()?;

        let sun_elevation = mtl.lookup_f64("SUN_ELEVATION")?.to_radians();
        let sun_zenith = 90f64.to_radians() - sun_elevation;
        let sun_azimuth = mtl.lookup_f64("SUN_AZIMUTH")?.to_radians();

        let earth_sun_distance = match profile.earth_sun_distance {
            EarthSunDistanceSource::Metadata(key) => mtl.lookup_f64(key)?,
            EarthSunDistanceSource::DayOfYear => {
                earth_sun_distance_from_day_of_year(acquisition_date.ordinal())
            }
        };

        let (red_solar_irradiance, nir_solar_irradiance) = match profile.solar_irradiance {
            SolarIrradianceSource::Table { red, nir } => (red, nir),
            SolarIrradianceSource::ReflectanceBounds => {
                let scale = PI * earth_sun_distance * earth_sun_distance;
                let red_refl = mtl.lookup_f64(&band_key("REFLECTANCE_MAXIMUM", profile.red_band))?;
                let nir_refl = mtl.lookup_f64(&band_key("REFLECTANCE_MAXIMUM", profile.nir_band))?;
                (
                    scale * red.max_radiance / red_refl,
                    scale * nir.max_radiance / nir_refl,
                )
            }
        };

        let (thermal_k1, thermal_k2) = match profile.thermal_constants {
            ThermalConstantsSource::Table { k1, k2 } => (k1, k2),
            ThermalConstantsSource::Metadata => (
                mtl.lookup_f64(&band_key("K1_CONSTANT", profile.thermal_band))?,
                mtl.lookup_f64(&band_key("K2_CONSTANT", profile.thermal_band))?,
            ),
        };

        debug!(
            "{} {} {}: d={:.6} AU, sun elevation={:.4} rad, ESUN red={:.2} nir={:.2}, K1={} K2={}",
            sensor,
            acquisition_date,
            acquisition_time,
            earth_sun_distance,
            sun_elevation,
            red_solar_irradiance,
            nir_solar_irradiance,
            thermal_k1,
            thermal_k2
        );

        Ok(SceneMetadata {
            sensor,
            metadata_path: mtl.path().to_path_buf(),
            acquisition_date,
            acquisition_time,
            red,
            nir,
            thermal,
            pan,
            sun_elevation,
            sun_zenith,
            sun_azimuth,
            earth_sun_distance,
            red_solar_irradiance,
            nir_solar_irradiance,
            thermal_k1,
            thermal_k2,
            thermal_wavelength: profile.thermal_wavelength,
        })
    }

    pub fn band_path(&self, base: BaseBand) -> &Path {
        match base {
            BaseBand::Red => &self.red.path,
            BaseBand::Thermal => &self.thermal.path,
        }
    }
}
