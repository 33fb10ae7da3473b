//! Placeholder filler - covers the holes the packer left behind.
//!
//! Occupancy is rebuilt from the packed tiles' pixel geometry, then every row
//! except the last one reached by a tile is raster-scanned left to right. Each
//! free block starts a rectangle that grows as wide as the free run, then as
//! tall as the rows below stay free across that whole width. The last row is
//! left alone: it is usually incomplete and fills in as more photos arrive.

use tiles_api::{PhotoTile, PlaceholderTile};

use crate::grid::GridParameters;
use crate::occupancy::{CellRect, OccupancyGrid, ScanDirection};

/// Rebuild an occupancy grid from placed tiles.
///
/// The grid has exactly as many rows as the tiles reach.
pub fn occupancy_from_tiles(tiles: &[PhotoTile], params: &GridParameters) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(params.column_count);
    for tile in tiles {
        grid.claim(params.px_to_cell_rect(&tile.rect));
    }
    grid
}

/// Greedily cover every free block of the first `rows` rows.
///
/// Rectangles are emitted in discovery order and claimed in `grid`.
pub fn fill_rows(grid: &mut OccupancyGrid, rows: usize) -> Vec<CellRect> {
    grid.ensure_rows(rows);
    let cols = grid.cols();
    let mut filled = Vec::new();

    for row in 0..rows {
        let mut col = 0;
        while col < cols {
            if grid.is_occupied(col, row) {
                col += 1;
                continue;
            }

            let width = grid.free_run(row, col, ScanDirection::Forward, cols);
            let mut height = 1;
            while row + height < rows && grid.is_rect_free(CellRect::new(col, row + height, width, 1)) {
                height += 1;
            }

            let rect = CellRect::new(col, row, width, height);
            grid.claim(rect);
            filled.push(rect);
            col += width;
        }
    }

    filled
}

/// Placeholder tiles for a packed layout.
pub fn fill_placeholders(tiles: &[PhotoTile], params: &GridParameters) -> Vec<PlaceholderTile> {
    let mut grid = occupancy_from_tiles(tiles, params);
    let rows = grid.rows().saturating_sub(1);

    let placeholders: Vec<PlaceholderTile> = fill_rows(&mut grid, rows)
        .into_iter()
        .map(|cells| PlaceholderTile {
            rect: params.cell_rect_to_px(cells),
        })
        .collect();

    tracing::debug!(
        "Filled {} rows with {} placeholders",
        rows,
        placeholders.len()
    );

    placeholders
}
