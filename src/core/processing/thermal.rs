//! Thermal-domain stages: NDVI-based emissivity, brightness temperature and
//! single-channel land-surface temperature (Weng et al. 2004).
use ndarray::Array2;

use crate::core::processing::ops::{map_grid, zip_map};
use crate::error::Result;

/// `h·c/k` from the Planck, light-speed and Boltzmann constants, µm·K
pub const PLANCK_RATIO: f64 = 14380.0;

pub const KELVIN_OFFSET: f64 = 273.15;

/// Land-surface emissivity from an NDVI value.
/// NaN falls through to the last branch (0.995).
pub fn emissivity_from_ndvi(ndvi: f64) -> f64 {
    if ndvi > 0.727 {
        0.990
    } else if (0.157..=0.727).contains(&ndvi) {
        1.0094 + 0.047 * ndvi.ln()
    } else if (-0.185..0.157).contains(&ndvi) {
        0.970
    } else {
        0.995
    }
}

pub fn emissivity(ndvi: &Array2<f64>) -> Array2<f64> {
    map_grid(ndvi, emissivity_from_ndvi)
}

/// `K2 / ln(K1/L + 1)`, Kelvin
pub fn brightness_temperature(thermal_radiance: &Array2<f64>, k1: f64, k2: f64) -> Array2<f64> {
    map_grid(thermal_radiance, |l| k2 / (k1 / l + 1.0).ln())
}

/// Emissivity-corrected surface temperature in degrees Celsius.
/// `wavelength` in µm, `brightness_temperature` in Kelvin.
pub fn surface_temperature_value(brightness_temperature: f64, emissivity: f64, wavelength: f64) -> f64 {
    brightness_temperature
        / (1.0 + (wavelength * brightness_temperature / PLANCK_RATIO) * emissivity.ln())
        - KELVIN_OFFSET
}

pub fn surface_temperature(
    brightness_temperature: &Array2<f64>,
    emissivity: &Array2<f64>,
    wavelength: f64,
) -> Result<Array2<f64>> {
    zip_map(brightness_temperature, emissivity, |bt, lse| {
        surface_temperature_value(bt, lse, wavelength)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn emissivity_threshold_boundaries() {
        assert_eq!(emissivity_from_ndvi(0.727), 1.0094 + 0.047 * 0.727f64.ln());
        assert_eq!(emissivity_from_ndvi(0.7271), 0.990);
        assert_eq!(emissivity_from_ndvi(0.157), 1.0094 + 0.047 * 0.157f64.ln());
        assert_eq!(emissivity_from_ndvi(0.1569), 0.970);
        assert_eq!(emissivity_from_ndvi(-0.185), 0.970);
        assert_eq!(emissivity_from_ndvi(-0.186), 0.995);
    }

    #[test]
    fn emissivity_of_non_finite_ndvi() {
        assert_eq!(emissivity_from_ndvi(f64::NAN), 0.995);
        assert_eq!(emissivity_from_ndvi(f64::INFINITY), 0.990);
        assert_eq!(emissivity_from_ndvi(f64::NEG_INFINITY), 0.995);
    }

    #[test]
    fn emissivity_grid_maps_each_sample() {
        let ndvi = array![[0.8, 0.5], [0.0, -0.5]];
        let lse = emissivity(&ndvi);
        assert_eq!(lse[[0, 0]], 0.990);
        assert_eq!(lse[[0, 1]], 1.0094 + 0.047 * 0.5f64.ln());
        assert_eq!(lse[[1, 0]], 0.970);
        assert_eq!(lse[[1, 1]], 0.995);
    }

    #[test]
    fn brightness_temperature_inverts_planck() {
        let (k1, k2) = (607.76, 1260.56);
        let rad = array![[10.0, f64::NAN]];
        let bt = brightness_temperature(&rad, k1, k2);
        let expected = k2 / (k1 / 10.0 + 1.0).ln();
        assert!((bt[[0, 0]] - expected).abs() < 1e-9);
        assert!(bt[[0, 1]].is_nan());
        // roughly 305 K for a warm surface
        assert!((bt[[0, 0]] - 305.0).abs() < 5.0);
    }

    #[test]
    fn unit_emissivity_leaves_brightness_temperature() {
        let bt = array![[300.0, 273.15]];
        let lse = array![[1.0, 1.0]];
        let lst = surface_temperature(&bt, &lse, 11.45).unwrap();
        assert!((lst[[0, 0]] - 26.85).abs() < 1e-9);
        assert!(lst[[0, 1]].abs() < 1e-9);
    }

    #[test]
    fn lower_emissivity_raises_surface_temperature() {
        let lst = surface_temperature_value(300.0, 0.97, 11.45);
        let expected = 300.0 / (1.0 + (11.45 * 300.0 / 14380.0) * 0.97f64.ln()) - 273.15;
        assert!((lst - expected).abs() < 1e-12);
        assert!(lst > 26.85);
    }

    #[test]
    fn surface_temperature_requires_matching_shapes() {
        let bt = Array2::<f64>::zeros((2, 2));
        let lse = Array2::<f64>::zeros((1, 2));
        assert!(surface_temperature(&bt, &lse, 12.0).is_err());
    }
}
