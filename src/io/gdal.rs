use gdal::{Dataset, errors::GdalError as GdalCrateError};
use ndarray::Array2;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors encountered when using the GDAL band reader and writers
#[derive(Debug, Error)]
pub enum GdalError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] GdalCrateError),
    #[error("Cannot open raster {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: GdalCrateError,
    },
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Dimension mismatch: expected {0}x{1}, got {2}x{3}")]
    DimensionMismatch(usize, usize, usize, usize),
}

/// Spatial reference of a band: pixel dimensions, affine transform and projection
#[derive(Debug, Clone, PartialEq)]
pub struct GeoReference {
    /// Width (pixels) of the raster
    pub size_x: usize,
    /// Height (lines) of the raster
    pub size_y: usize,
    /// Affine geotransform coefficients ([origin_x, pixel_width, rot_x, origin_y, rot_y, pixel_height])
    pub geotransform: [f64; 6],
    /// Projection in WKT format
    pub projection: String,
}

/// Reader for a single-band Landsat GeoTIFF
pub struct GdalBandReader {
    pub dataset: Dataset,
    pub georef: GeoReference,
}

impl GdalBandReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GdalError> {
        let path = path.as_ref();
        let dataset = Dataset::open(path).map_err(|source| GdalError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let (size_x, size_y) = dataset.raster_size();
        if dataset.raster_count() == 0 {
            return Err(GdalError::UnsupportedFormat(format!(
                "No raster bands found in {:?}",
                path
            )));
        }
        let geotransform = match dataset.geo_transform() {
            Ok(gt) => gt,
            Err(_) => [0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        };
        let projection = dataset.projection();
        Ok(GdalBandReader {
            dataset,
            georef: GeoReference {
                size_x: size_x as usize,
                size_y: size_y as usize,
                geotransform,
                projection,
            },
        })
    }

    /// Read band 1 as an f64 ndarray of shape (height, width)
    pub fn read(&self) -> Result<Array2<f64>, GdalError> {
        let band = self.dataset.rasterband(1)?;
        let window = (self.georef.size_x, self.georef.size_y);
        let buf = band.read_as::<f64>((0, 0), window, window, None)?;
        let data_vec = buf.data().to_vec();
        let array = Array2::from_shape_vec((self.georef.size_y, self.georef.size_x), data_vec)
            .map_err(|_| {
                GdalError::DimensionMismatch(
                    self.georef.size_x,
                    self.georef.size_y,
                    self.georef.size_x,
                    self.georef.size_y,
                )
            })?;
        let bytes = array.len() * std::mem::size_of::<f64>();
        debug!(
            "Band read {}x{} ({:.2} MB)",
            self.georef.size_x,
            self.georef.size_y,
            bytes as f64 / 1024.0 / 1024.0
        );
        Ok(array)
    }
}

/// Open a band file and read its digital numbers.
pub fn read_band<P: AsRef<Path>>(path: P) -> Result<Array2<f64>, GdalError> {
    GdalBandReader::open(path)?.read()
}
