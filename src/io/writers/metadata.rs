use gdal::Dataset;
use gdal::Metadata;
use std::collections::BTreeMap;
use tracing::debug;

use crate::io::gdal::GdalError;
use crate::io::landsat::SceneMetadata;
use crate::types::{AtmosphericCorrection, Product};

/// Extract provenance fields for a derived product into key/value pairs
pub fn extract_metadata_fields(
    meta: &SceneMetadata,
    product: Option<Product>,
    correction: AtmosphericCorrection,
) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();

    fields.insert("SENSOR".to_string(), meta.sensor.to_string());
    fields.insert(
        "INSTRUMENT".to_string(),
        meta.sensor.profile().instrument.to_string(),
    );
    fields.insert(
        "ACQUISITION_DATE".to_string(),
        meta.acquisition_date.to_string(),
    );
    fields.insert(
        "SCENE_CENTER_TIME".to_string(),
        meta.acquisition_time.to_string(),
    );
    if let Some(product) = product {
        fields.insert("PRODUCT".to_string(), product.to_string());
        if matches!(
            product,
            Product::RedReflectance
                | Product::NirReflectance
                | Product::Ndvi
                | Product::Emissivity
                | Product::SurfaceTemperature
        ) {
            fields.insert(
                "ATMOSPHERIC_CORRECTION".to_string(),
                correction.to_string(),
            );
        }
        let units = match product {
            Product::RedRadiance | Product::NirRadiance | Product::ThermalRadiance => {
                Some("W/(m2 sr um)")
            }
            Product::BrightnessTemperature => Some("K"),
            Product::SurfaceTemperature => Some("degC"),
            _ => None,
        };
        if let Some(units) = units {
            fields.insert("UNITS".to_string(), units.to_string());
        }
    }
    fields.insert(
        "EARTH_SUN_DISTANCE".to_string(),
        meta.earth_sun_distance.to_string(),
    );
    fields.insert(
        "SUN_ELEVATION".to_string(),
        meta.sun_elevation.to_degrees().to_string(),
    );
    fields.insert(
        "SUN_AZIMUTH".to_string(),
        meta.sun_azimuth.to_degrees().to_string(),
    );

    fields.insert("PROCESSING_SOFTWARE".to_string(), "lstpro".to_string());
    fields.insert(
        "PROCESSING_VERSION".to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    );
    fields.insert(
        "PROCESSING_TIMESTAMP".to_string(),
        chrono::Utc::now().to_rfc3339(),
    );

    fields
}

/// Set metadata items on the default domain of a dataset
pub fn embed_tiff_metadata(
    ds: &mut Dataset,
    fields: &BTreeMap<String, String>,
) -> Result<(), GdalError> {
    for (key, value) in fields {
        ds.set_metadata_item(key, value, "")?;
    }
    debug!("Embedded {} metadata items", fields.len());
    Ok(())
}
