#![doc = r#"
LSTPRO — land-surface temperature retrieval for Landsat 4/5/7/8.

This crate turns Landsat Level-1 bands and their `_MTL.txt` metadata into derived
single-band Float32 GeoTIFFs: radiance, top-of-atmosphere or DOS-corrected
reflectance, NDVI, land-surface emissivity, brightness temperature and
land-surface temperature.

Requirements
------------
- GDAL development headers and runtime available on your system.
- Rust 2024 edition toolchain.

Quick start: surface temperature to a file
------------------------------------------
```rust,no_run
use std::path::Path;
use lstpro::{LandsatProcessor, BaseBand};

fn main() -> lstpro::Result<()> {
    let scene = LandsatProcessor::new(
        "/data/LC82310722016225LGN00/LC82310722016225LGN00_MTL.txt",
        "Landsat_8",
        false, // no DOS correction
    )?;

    let lst = scene.surface_temperature()?;
    scene.save(&lst, Path::new("/out/lst.tif"), BaseBand::Thermal)
}
```

Run files
---------
```rust,no_run
use std::path::Path;
use lstpro::{process_to_path, Product, ProcessingParams};

fn main() -> lstpro::Result<()> {
    let params = ProcessingParams::from_json_file("/data/run.json")?;
    process_to_path(&params, Product::Ndvi, Path::new("/out/ndvi.tif"))
}
```

Working with grids directly
---------------------------
Each stage in [`core::processing`] takes the grids it depends on and returns a
new one, so the chain can be driven without band files:

```rust
use ndarray::array;
use lstpro::core::processing::{radiometry, thermal};

let red = radiometry::radiance(&array![[100.0, 0.0]], 0.01, -5.0);
assert!(red[[0, 1]].is_nan());
let lse = thermal::emissivity(&array![[0.8, -0.5]]);
assert_eq!(lse, array![[0.990, 0.995]]);
```

Error handling
--------------
All public functions return `lstpro::Result<T>`; match on `lstpro::Error` to
separate unsupported sensors, unreadable files and missing metadata keys.
Numeric edge cases (dropout, zero denominators, log of non-positive values)
propagate as NaN or infinity rather than errors.

Useful modules
--------------
- [`api`] — `LandsatProcessor` and `process_to_path`.
- [`core`] — pipeline stages, persistence and run parameters.
- [`io`] — MTL lookup, sensor profiles and scene metadata, GDAL band reading and writers.
- [`types`] — `Sensor`, `Product`, `BaseBand`, `AtmosphericCorrection`.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
pub use crate::core::params::ProcessingParams;
pub use error::{Error, Result};
pub use types::{AtmosphericCorrection, BaseBand, Product, Raster, Sensor};

pub use io::gdal::{GdalBandReader, GdalError, GeoReference};
pub use io::landsat::{BandCalibration, SceneMetadata, SensorProfile, resolve};
pub use io::mtl::{MetadataFile, lookup};

pub use api::{LandsatProcessor, process_to_path};
