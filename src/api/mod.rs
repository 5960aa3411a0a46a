//! High-level library API: the per-scene `LandsatProcessor` and a one-call
//! `process_to_path` helper. Every product is recomputed from the band files
//! on each call; stages take their inputs as arguments in
//! `core::processing` when finer control is needed.
use std::path::Path;

use ndarray::Array2;
use tracing::info;

use crate::core::params::ProcessingParams;
use crate::core::processing::radiometry::{self, SolarGeometry};
use crate::core::processing::save::save_raster;
use crate::core::processing::thermal;
use crate::error::Result;
use crate::io::gdal::read_band;
use crate::io::landsat::{BandCalibration, SceneMetadata, resolve};
use crate::io::writers::metadata::extract_metadata_fields;
use crate::types::{AtmosphericCorrection, BaseBand, Product};

/// Processing entry point for one scene
#[derive(Debug, Clone)]
pub struct LandsatProcessor {
    pub metadata: SceneMetadata,
    pub correction: AtmosphericCorrection,
}

fn band_radiance(band: &BandCalibration) -> Result<Array2<f64>> {
    let dn = read_band(&band.path)?;
    Ok(radiometry::radiance(&dn, band.mult, band.add))
}

impl LandsatProcessor {
    /// Resolve `metadata_file` for `sensor_id` (e.g. `Landsat_8`).
    pub fn new<P: AsRef<Path>>(
        metadata_file: P,
        sensor_id: &str,
        dos_required: bool,
    ) -> Result<Self> {
        Ok(Self::with_metadata(
            resolve(metadata_file, sensor_id)?,
            dos_required.into(),
        ))
    }

    pub fn from_params(params: &ProcessingParams) -> Result<Self> {
        let metadata = SceneMetadata::open(&params.metadata_path, params.sensor)?;
        Ok(Self::with_metadata(metadata, params.atmospheric_correction))
    }

    pub fn with_metadata(metadata: SceneMetadata, correction: AtmosphericCorrection) -> Self {
        Self {
            metadata,
            correction,
        }
    }

    fn geometry(&self) -> SolarGeometry {
        SolarGeometry::from(&self.metadata)
    }

    pub fn red_radiance(&self) -> Result<Array2<f64>> {
        info!("calculating red channel radiance...");
        band_radiance(&self.metadata.red)
    }

    pub fn nir_radiance(&self) -> Result<Array2<f64>> {
        info!("calculating NIR channel radiance...");
        band_radiance(&self.metadata.nir)
    }

    pub fn thermal_radiance(&self) -> Result<Array2<f64>> {
        info!("calculating thermal channel radiance...");
        band_radiance(&self.metadata.thermal)
    }

    pub fn red_reflectance(&self) -> Result<Array2<f64>> {
        let radiance = self.red_radiance()?;
        info!("calculating red channel reflectance ({})...", self.correction);
        Ok(radiometry::reflectance(
            &radiance,
            self.metadata.red_solar_irradiance,
            &self.geometry(),
            self.correction,
        ))
    }

    pub fn nir_reflectance(&self) -> Result<Array2<f64>> {
        let radiance = self.nir_radiance()?;
        info!("calculating NIR channel reflectance ({})...", self.correction);
        Ok(radiometry::reflectance(
            &radiance,
            self.metadata.nir_solar_irradiance,
            &self.geometry(),
            self.correction,
        ))
    }

    pub fn ndvi(&self) -> Result<Array2<f64>> {
        let red = self.red_reflectance()?;
        let nir = self.nir_reflectance()?;
        info!("calculating NDVI...");
        radiometry::ndvi(&nir, &red)
    }

    pub fn emissivity(&self) -> Result<Array2<f64>> {
        let ndvi = self.ndvi()?;
        info!("calculating land surface emissivity...");
        Ok(thermal::emissivity(&ndvi))
    }

    pub fn brightness_temperature(&self) -> Result<Array2<f64>> {
        let radiance = self.thermal_radiance()?;
        info!("calculating brightness temperature...");
        Ok(thermal::brightness_temperature(
            &radiance,
            self.metadata.thermal_k1,
            self.metadata.thermal_k2,
        ))
    }

    /// Land-surface temperature in °C, simplified single-channel model
    pub fn surface_temperature(&self) -> Result<Array2<f64>> {
        let lse = self.emissivity()?;
        let bt = self.brightness_temperature()?;
        info!("calculating land surface temperature (simplified model)...");
        thermal::surface_temperature(&bt, &lse, self.metadata.thermal_wavelength)
    }

    pub fn compute(&self, product: Product) -> Result<Array2<f64>> {
        match product {
            Product::RedRadiance => self.red_radiance(),
            Product::NirRadiance => self.nir_radiance(),
            Product::ThermalRadiance => self.thermal_radiance(),
            Product::RedReflectance => self.red_reflectance(),
            Product::NirReflectance => self.nir_reflectance(),
            Product::Ndvi => self.ndvi(),
            Product::Emissivity => self.emissivity(),
            Product::BrightnessTemperature => self.brightness_temperature(),
            Product::SurfaceTemperature => self.surface_temperature(),
        }
    }

    /// Write `raster` georeferenced like the selected base band.
    pub fn save(&self, raster: &Array2<f64>, output: &Path, base: BaseBand) -> Result<()> {
        let fields = extract_metadata_fields(&self.metadata, None, self.correction);
        save_raster(raster, output, self.metadata.band_path(base), Some(&fields))
    }

    /// Compute `product` and write it, tagging the file with its provenance.
    pub fn save_product(&self, product: Product, output: &Path) -> Result<()> {
        let raster = self.compute(product)?;
        let fields = extract_metadata_fields(&self.metadata, Some(product), self.correction);
        let base = self.metadata.band_path(product.default_base_band());
        save_raster(&raster, output, base, Some(&fields))
    }
}

/// Resolve the scene in `params`, compute `product` and write it to `output`.
pub fn process_to_path(params: &ProcessingParams, product: Product, output: &Path) -> Result<()> {
    LandsatProcessor::from_params(params)?.save_product(product, output)?;
    info!("Successfully processed {} -> {:?}", product, output);
    Ok(())
}
