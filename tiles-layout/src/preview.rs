//! Grid preview - one rectangle per block, for debugging overlays.

use tiles_api::TileRect;

use crate::grid::GridParameters;
use crate::occupancy::CellRect;

/// Rows needed to cover `container_height`.
pub fn preview_row_count(params: &GridParameters, container_height: f64) -> usize {
    if !container_height.is_finite() || container_height <= 0.0 {
        return 0;
    }
    ((container_height + f64::from(params.gap_size)) / params.step()).ceil() as usize
}

/// Every block of the grid down to `container_height`, row by row.
pub fn preview_cells(params: &GridParameters, container_height: f64) -> Vec<TileRect> {
    let rows = preview_row_count(params, container_height);
    let mut cells = Vec::with_capacity(rows * params.column_count);
    for row in 0..rows {
        for col in 0..params.column_count {
            cells.push(params.cell_rect_to_px(CellRect::new(col, row, 1, 1)));
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_count() {
        let params = GridParameters::for_width(1000.0).unwrap();
        // (600 + 8) / 63 = 9.65
        assert_eq!(preview_row_count(&params, 600.0), 10);
        assert_eq!(preview_row_count(&params, 55.0), 1);
        assert_eq!(preview_row_count(&params, 0.0), 0);
        assert_eq!(preview_row_count(&params, f64::NAN), 0);
    }

    #[test]
    fn test_cells() {
        let params = GridParameters::for_width(1200.0).unwrap();
        let cells = preview_cells(&params, 100.0);

        // (100 + 8) / 81 -> 2 rows of 15 columns.
        assert_eq!(cells.len(), 30);
        assert_eq!(cells[0], TileRect::new(-3.0, 0.0, 73.0, 73.0));
        assert_eq!(cells[1].left, 78.0);
        assert_eq!(cells[15].top, 81.0);
    }
}
