use gdal::Dataset;
use gdal::DriverManager;
use gdal::raster::{Buffer, ColorInterpretation};
use std::path::Path;

use crate::io::gdal::{GdalError, GeoReference};

/// Create a single-band Float32 GeoTIFF carrying `georef`, with NaN as nodata.
/// `data` is row-major with `georef.size_x * georef.size_y` samples.
pub fn write_tiff_f32(
    output: &Path,
    georef: &GeoReference,
    data: &[f32],
) -> Result<Dataset, GdalError> {
    let (cols, rows) = (georef.size_x, georef.size_y);
    if data.len() != cols * rows {
        return Err(GdalError::DimensionMismatch(
            cols,
            rows,
            data.len() / rows.max(1),
            rows,
        ));
    }
    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let mut ds = driver.create_with_band_type::<f32, _>(output, cols, rows, 1)?;
    ds.set_geo_transform(&georef.geotransform)?;
    if !georef.projection.is_empty() {
        ds.set_projection(&georef.projection)?;
    }

    {
        let mut band = ds.rasterband(1)?;
        band.set_color_interpretation(ColorInterpretation::GrayIndex)?;
        band.set_no_data_value(Some(f64::NAN))?;
        let mut buf = Buffer::new((cols, rows), data.to_vec());
        band.write((0, 0), (cols, rows), &mut buf)?;
    }
    Ok(ds)
}
