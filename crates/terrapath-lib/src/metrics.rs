use crate::error::{Error, Result};
use crate::raster::{Cell, ElevationRaster};

/// Total absolute elevation change along `path`.
///
/// Sums `|v[p[i]] - v[p[i-1]]|` over consecutive pairs; a path of one or
/// zero nodes scores `0`. Every coordinate must lie within the raster
/// bounds; a violation is reported as [`Error::OutOfBounds`].
pub fn elevation_change(raster: &ElevationRaster, path: &[Cell]) -> Result<i64> {
    let mut total = 0;
    let mut previous: Option<i64> = None;
    for &cell in path {
        let value = raster.get(cell).ok_or_else(|| Error::OutOfBounds {
            cell,
            rows: raster.rows(),
            cols: raster.cols(),
        })?;
        if let Some(previous) = previous {
            total += (value - previous).abs();
        }
        previous = Some(value);
    }
    Ok(total)
}
