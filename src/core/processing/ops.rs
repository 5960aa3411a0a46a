use ndarray::{Array2, Zip};

use crate::error::{Error, Result};

/// Apply a scalar function to every sample.
pub fn map_grid<F>(grid: &Array2<f64>, f: F) -> Array2<f64>
where
    F: Fn(f64) -> f64,
{
    grid.mapv(f)
}

/// Element-wise combination of two equally shaped grids.
pub fn zip_map<F>(a: &Array2<f64>, b: &Array2<f64>, f: F) -> Result<Array2<f64>>
where
    F: Fn(f64, f64) -> f64,
{
    if a.dim() != b.dim() {
        return Err(Error::DimensionMismatch {
            expected: a.dim(),
            actual: b.dim(),
        });
    }
    let mut result = Array2::zeros(a.dim());
    Zip::from(&mut result)
        .and(a)
        .and(b)
        .for_each(|res, &a_val, &b_val| *res = f(a_val, b_val));
    Ok(result)
}

/// Minimum over finite samples; `None` when the grid has none.
pub fn nan_min(grid: &Array2<f64>) -> Option<f64> {
    grid.iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            Some(m) if m <= v => Some(m),
            _ => Some(v),
        })
}
