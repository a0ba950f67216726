use crate::error::{Error, Result};
use crate::raster::{Cell, ElevationRaster};

/// Plan a comparison path without contacting the search service.
///
/// From `start` the planner advances exactly one column per step. Candidates
/// are considered in fixed priority order: straight `(row, col+1)`, up
/// `(row-1, col+1)`, down `(row+1, col+1)`. Out-of-bounds candidates are
/// excluded, and the first candidate minimizing the absolute elevation
/// change from the current cell wins. The path ends in the last column, or
/// earlier if no forward neighbour is in bounds.
pub fn greedy_path(raster: &ElevationRaster, start: Cell) -> Result<Vec<Cell>> {
    let Some(mut current_elevation) = raster.get(start) else {
        return Err(Error::OutOfBounds {
            cell: start,
            rows: raster.rows(),
            cols: raster.cols(),
        });
    };

    let mut path = vec![start];
    let mut current = start;

    while current.col + 1 < raster.cols() {
        let next = forward_neighbours(raster, current)
            .into_iter()
            .filter_map(|cell| raster.get(cell).map(|elevation| (cell, elevation)))
            .min_by_key(|(_, elevation)| (elevation - current_elevation).abs());
        let Some((cell, elevation)) = next else {
            break;
        };
        path.push(cell);
        current = cell;
        current_elevation = elevation;
    }

    Ok(path)
}

// Enumeration order doubles as the tie-break priority.
fn forward_neighbours(raster: &ElevationRaster, cell: Cell) -> Vec<Cell> {
    let col = cell.col + 1;
    let mut neighbours = Vec::with_capacity(3);
    if col < raster.cols() {
        neighbours.push(Cell::new(cell.row, col));
        if cell.row > 0 {
            neighbours.push(Cell::new(cell.row - 1, col));
        }
        if cell.row + 1 < raster.rows() {
            neighbours.push(Cell::new(cell.row + 1, col));
        }
    }
    neighbours
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster_3x3() -> ElevationRaster {
        ElevationRaster::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]])
            .expect("fixture raster builds")
    }

    #[test]
    fn follows_minimal_elevation_change() {
        let path = greedy_path(&raster_3x3(), Cell::new(0, 0)).expect("plans");
        assert_eq!(path, vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)]);
    }

    #[test]
    fn columns_increase_by_one_per_step() {
        let raster = ElevationRaster::from_rows(vec![
            vec![10, 3, 9, 2, 8],
            vec![1, 12, 4, 11, 5],
            vec![6, 7, 13, 0, 14],
        ])
        .expect("fixture raster builds");

        for row in 0..raster.rows() {
            let start = Cell::new(row, 0);
            let path = greedy_path(&raster, start).expect("plans");
            assert_eq!(path[0], start);
            assert_eq!(path.len(), raster.cols());
            for (step, pair) in path.windows(2).enumerate() {
                assert_eq!(pair[1].col, pair[0].col + 1, "step {}", step);
                assert!(raster.contains(pair[1]));
            }
        }
    }

    #[test]
    fn single_row_raster_stays_in_bounds() {
        let raster =
            ElevationRaster::from_rows(vec![vec![5, 1, 9, 2]]).expect("fixture raster builds");
        let path = greedy_path(&raster, Cell::new(0, 0)).expect("plans");
        assert_eq!(
            path,
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(0, 2),
                Cell::new(0, 3)
            ]
        );
    }

    #[test]
    fn start_in_last_column_yields_single_node_path() {
        let path = greedy_path(&raster_3x3(), Cell::new(1, 2)).expect("plans");
        assert_eq!(path, vec![Cell::new(1, 2)]);
    }

    #[test]
    fn ties_prefer_the_straight_neighbour() {
        // Straight and down both change elevation by 1; straight is listed
        // first and must win.
        let raster = ElevationRaster::from_rows(vec![vec![5, 6], vec![9, 4]])
            .expect("fixture raster builds");
        let path = greedy_path(&raster, Cell::new(0, 0)).expect("plans");
        assert_eq!(path, vec![Cell::new(0, 0), Cell::new(0, 1)]);
    }

    #[test]
    fn out_of_bounds_start_is_rejected() {
        let error = greedy_path(&raster_3x3(), Cell::new(3, 0)).expect_err("out of bounds");
        assert!(matches!(error, Error::OutOfBounds { .. }));
    }
}
