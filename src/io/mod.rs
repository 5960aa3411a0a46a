//! I/O layer: Landsat MTL metadata parsing and resolution, GDAL-backed band
//! reading, and GeoTIFF writers with embedded product metadata.
pub mod mtl;
pub use mtl::MetadataFile;

pub mod landsat;
pub use landsat::{BandCalibration, SceneMetadata, SensorProfile};

pub mod gdal;
pub use self::gdal::{GdalBandReader, GdalError, GeoReference};

pub mod writers;
