//! Reflective-domain stages: DN to radiance, top-of-atmosphere or
//! DOS-corrected reflectance, and NDVI.
use ndarray::Array2;
use std::f64::consts::PI;
use tracing::{debug, warn};

use crate::core::processing::ops::{map_grid, nan_min, zip_map};
use crate::error::Result;
use crate::io::landsat::SceneMetadata;
use crate::types::AtmosphericCorrection;

/// Sun-Earth geometry entering the reflectance formulas. Angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarGeometry {
    pub earth_sun_distance: f64,
    pub sun_elevation: f64,
    pub sun_zenith: f64,
}

impl From<&SceneMetadata> for SolarGeometry {
    fn from(meta: &SceneMetadata) -> Self {
        Self {
            earth_sun_distance: meta.earth_sun_distance,
            sun_elevation: meta.sun_elevation,
            sun_zenith: meta.sun_zenith,
        }
    }
}

/// `mult·DN + add`; a DN of 0 is dropout and becomes NaN.
pub fn radiance(dn: &Array2<f64>, mult: f64, add: f64) -> Array2<f64> {
    map_grid(dn, |d| {
        let d = if d == 0.0 { f64::NAN } else { d };
        mult * d + add
    })
}

pub fn reflectance_value(radiance: f64, solar_irradiance: f64, geometry: &SolarGeometry) -> f64 {
    let d = geometry.earth_sun_distance;
    (PI * radiance * d * d) / (solar_irradiance * geometry.sun_elevation.sin())
}

/// Path radiance under the 1%-reflectance dark object assumption.
pub fn haze_radiance(dark_object: f64, solar_irradiance: f64, geometry: &SolarGeometry) -> f64 {
    let d = geometry.earth_sun_distance;
    let one_percent = (0.01 * geometry.sun_zenith.cos().powi(3) * solar_irradiance) / (PI * d * d);
    dark_object - one_percent
}

pub fn toa_reflectance(
    radiance: &Array2<f64>,
    solar_irradiance: f64,
    geometry: &SolarGeometry,
) -> Array2<f64> {
    map_grid(radiance, |l| reflectance_value(l, solar_irradiance, geometry))
}

/// Dark Object Subtraction using the darkest finite radiance of the band.
/// A band without finite samples yields an all-NaN result.
pub fn dos_reflectance(
    radiance: &Array2<f64>,
    solar_irradiance: f64,
    geometry: &SolarGeometry,
) -> Array2<f64> {
    let dark_object = nan_min(radiance).unwrap_or_else(|| {
        warn!("No finite radiance for dark object estimate");
        f64::NAN
    });
    let haze = haze_radiance(dark_object, solar_irradiance, geometry);
    debug!("DOS dark object {:.6}, haze radiance {:.6}", dark_object, haze);
    map_grid(radiance, |l| {
        reflectance_value(l - haze, solar_irradiance, geometry)
    })
}

pub fn reflectance(
    radiance: &Array2<f64>,
    solar_irradiance: f64,
    geometry: &SolarGeometry,
    correction: AtmosphericCorrection,
) -> Array2<f64> {
    match correction {
        AtmosphericCorrection::None => toa_reflectance(radiance, solar_irradiance, geometry),
        AtmosphericCorrection::Dos => dos_reflectance(radiance, solar_irradiance, geometry),
    }
}

/// `(nir - red) / (nir + red)`; zero sums follow IEEE division.
pub fn ndvi(nir_reflectance: &Array2<f64>, red_reflectance: &Array2<f64>) -> Result<Array2<f64>> {
    zip_map(nir_reflectance, red_reflectance, |nir, red| {
        (nir - red) / (nir + red)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn geometry() -> SolarGeometry {
        SolarGeometry {
            earth_sun_distance: 1.0,
            sun_elevation: 45f64.to_radians(),
            sun_zenith: 45f64.to_radians(),
        }
    }

    #[test]
    fn zero_dn_is_dropout() {
        let dn = array![[0.0, 100.0], [250.0, 0.0]];
        let rad = radiance(&dn, 0.5, 1.0);
        assert!(rad[[0, 0]].is_nan());
        assert!(rad[[1, 1]].is_nan());
        assert_eq!(rad[[0, 1]], 51.0);
        assert_eq!(rad[[1, 0]], 126.0);
    }

    #[test]
    fn radiance_is_linear_in_dn() {
        let dn = array![[1.0, 7.0, 65535.0]];
        let rad = radiance(&dn, 3.342e-4, 0.1);
        for (d, r) in dn.iter().zip(rad.iter()) {
            assert!((r - (3.342e-4 * d + 0.1)).abs() < 1e-12);
        }
    }

    #[test]
    fn toa_reflectance_matches_formula() {
        let geom = SolarGeometry {
            earth_sun_distance: 1.0134,
            sun_elevation: 60f64.to_radians(),
            sun_zenith: 30f64.to_radians(),
        };
        let rad = array![[80.0]];
        let refl = toa_reflectance(&rad, 1554.0, &geom);
        let expected = PI * 80.0 * 1.0134 * 1.0134 / (1554.0 * 60f64.to_radians().sin());
        assert!((refl[[0, 0]] - expected).abs() < 1e-12);
    }

    #[test]
    fn dos_on_uniform_band_is_fixed_offset() {
        let geom = geometry();
        let rad = Array2::from_elem((3, 4), 42.0);
        let corrected = dos_reflectance(&rad, 1000.0, &geom);
        let haze = haze_radiance(42.0, 1000.0, &geom);
        let expected = toa_reflectance(&rad.mapv(|l| l - haze), 1000.0, &geom);
        for (c, e) in corrected.iter().zip(expected.iter()) {
            assert!((c - e).abs() < 1e-12);
        }
        // the dark object maps to 1% reflectance scaled by cos³(zenith)/sin(elevation)
        let one_percent = 0.01 * geom.sun_zenith.cos().powi(3) / geom.sun_elevation.sin();
        assert!((corrected[[0, 0]] - one_percent).abs() < 1e-12);
    }

    #[test]
    fn dos_ignores_dropout_when_finding_dark_object() {
        let geom = geometry();
        let rad = array![[f64::NAN, 30.0], [20.0, 50.0]];
        let corrected = dos_reflectance(&rad, 1000.0, &geom);
        let haze = haze_radiance(20.0, 1000.0, &geom);
        assert!(corrected[[0, 0]].is_nan());
        let expected = reflectance_value(50.0 - haze, 1000.0, &geom);
        assert!((corrected[[1, 1]] - expected).abs() < 1e-12);
    }

    #[test]
    fn dos_without_finite_radiance_is_all_nan() {
        let rad = Array2::from_elem((2, 2), f64::NAN);
        let corrected = dos_reflectance(&rad, 1000.0, &geometry());
        assert!(corrected.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn correction_flag_selects_policy() {
        let geom = geometry();
        let rad = array![[10.0, 20.0]];
        assert_eq!(
            reflectance(&rad, 1000.0, &geom, AtmosphericCorrection::None),
            toa_reflectance(&rad, 1000.0, &geom)
        );
        assert_eq!(
            reflectance(&rad, 1000.0, &geom, AtmosphericCorrection::Dos),
            dos_reflectance(&rad, 1000.0, &geom)
        );
    }

    #[test]
    fn ndvi_passes_ieee_edge_cases_through() {
        let nir = array![[0.5, 0.0, 0.3, f64::NAN]];
        let red = array![[0.1, 0.0, -0.3, 0.2]];
        let out = ndvi(&nir, &red).unwrap();
        assert!((out[[0, 0]] - 0.4 / 0.6).abs() < 1e-12);
        assert!(out[[0, 1]].is_nan());
        assert!(out[[0, 2]].is_infinite());
        assert!(out[[0, 3]].is_nan());
    }
}
