use ndarray::Array2;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use crate::error::{Error, Result};
use crate::io::gdal::{GdalBandReader, GdalError};
use crate::io::writers::metadata::embed_tiff_metadata;
use crate::io::writers::tiff::write_tiff_f32;

/// Write `raster` as a single-band Float32 GeoTIFF georeferenced like the
/// band at `base_band`. The raster must have the base band's dimensions.
pub fn save_raster(
    raster: &Array2<f64>,
    output: &Path,
    base_band: &Path,
    metadata: Option<&BTreeMap<String, String>>,
) -> Result<()> {
    let base = GdalBandReader::open(base_band)?;
    let georef = base.georef;
    let expected = (georef.size_y, georef.size_x);
    if raster.dim() != expected {
        return Err(Error::DimensionMismatch {
            expected,
            actual: raster.dim(),
        });
    }

    // row-major order regardless of the array's memory layout
    let data: Vec<f32> = raster.iter().map(|&v| v as f32).collect();

    info!("Writing {:?} ({}x{})", output, georef.size_x, georef.size_y);
    let mut ds = write_tiff_f32(output, &georef, &data).map_err(|e| match e {
        GdalError::Gdal(source) => Error::Io(std::io::Error::other(format!(
            "cannot write {:?}: {}",
            output, source
        ))),
        other => Error::Gdal(other),
    })?;
    if let Some(fields) = metadata {
        embed_tiff_metadata(&mut ds, fields)?;
    }
    Ok(())
}
