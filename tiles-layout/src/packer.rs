//! Grid packer - places photos on the grid in snake order.
//!
//! Photos are placed strictly in input order. For each one the packer finds
//! the next free block (even rows scanned left to right, odd rows right to
//! left), measures the free run in the scan direction, estimates a span for
//! that room and claims the blocks. The row cursor only ever moves down.

use tiles_api::{Photo, PhotoTile};

use crate::grid::GridParameters;
use crate::occupancy::{CellRect, OccupancyGrid, ScanDirection};
use crate::span::{SpanBounds, estimate_span};
use crate::LayoutError;

/// One placement and the room it was measured in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub tile: PhotoTile,
    /// Block-space footprint.
    pub cells: CellRect,
    /// Free run measured at the slot, capped at the device max span.
    pub available_width: usize,
}

/// Packing state for one pass over a photo sequence.
///
/// The occupancy grid lives exactly as long as the packer.
pub struct GridPacker<'a> {
    params: &'a GridParameters,
    grid: OccupancyGrid,
    /// Current row; never decreases.
    row: usize,
}

impl<'a> GridPacker<'a> {
    pub fn new(params: &'a GridParameters) -> Self {
        Self {
            params,
            grid: OccupancyGrid::new(params.column_count),
            row: 0,
        }
    }

    /// The row the next slot search starts from.
    pub fn current_row(&self) -> usize {
        self.row
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Place one photo.
    pub fn place(&mut self, photo: &Photo) -> Result<Placement, LayoutError> {
        validate_photo(photo)?;

        let (row, found_col, direction) = self.locate_slot();
        let available_width = self.grid.free_run(row, found_col, direction, self.params.max_span);

        let bounds = SpanBounds::for_grid(self.params, available_width);
        let span = estimate_span(photo.aspect_ratio(), &bounds);

        // Reverse rows measured leftward from the slot; the tile still
        // extends rightward from its top-left block.
        let col = match direction {
            ScanDirection::Forward => found_col,
            ScanDirection::Reverse => found_col + 1 - span.horizontal,
        };

        let cells = CellRect::from_span(col, row, span);
        self.grid.claim(cells);

        let tile = PhotoTile {
            id: photo.id,
            rect: self.params.cell_rect_to_px(cells),
            span,
        };

        tracing::trace!(
            "Placed {} at ({}, {}) span {}x{} (available {})",
            photo.id,
            col,
            row,
            span.horizontal,
            span.vertical,
            available_width
        );

        Ok(Placement {
            tile,
            cells,
            available_width,
        })
    }

    /// Find the next free block at or below the cursor in snake order.
    fn locate_slot(&mut self) -> (usize, usize, ScanDirection) {
        loop {
            self.grid.ensure_rows(self.row + 1);
            let direction = ScanDirection::for_row(self.row);
            if let Some(col) = self.grid.first_free(self.row, direction) {
                return (self.row, col, direction);
            }
            self.row += 1;
        }
    }
}

/// Reject photos the span estimator cannot handle.
pub fn validate_photo(photo: &Photo) -> Result<(), LayoutError> {
    if photo.has_valid_dimensions() {
        Ok(())
    } else {
        Err(LayoutError::InvalidPhotoDimensions {
            id: photo.id,
            width: photo.width,
            height: photo.height,
        })
    }
}

/// Pack a whole photo sequence.
///
/// Every photo is validated before anything is placed, so an invalid photo
/// never yields a partial layout.
pub fn pack(photos: &[Photo], params: &GridParameters) -> Result<Vec<PhotoTile>, LayoutError> {
    photos.iter().try_for_each(validate_photo)?;

    let mut packer = GridPacker::new(params);
    let tiles = photos
        .iter()
        .map(|photo| packer.place(photo).map(|placement| placement.tile))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        "Packed {} photos into {} rows",
        tiles.len(),
        packer.grid().rows()
    );

    Ok(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiles_api::{PhotoId, Span};

    fn params() -> GridParameters {
        // 16 columns of 55px blocks with 8px gaps, no offset.
        GridParameters::for_width(1000.0).unwrap()
    }

    fn square(id: u64) -> Photo {
        Photo::new(id, 500.0, 500.0)
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(pack(&[], &params()), Ok(Vec::new()));
    }

    #[test]
    fn test_first_row_runs_left_to_right() {
        let params = params();
        let mut packer = GridPacker::new(&params);

        let a = packer.place(&square(1)).unwrap();
        let b = packer.place(&square(2)).unwrap();
        let c = packer.place(&square(3)).unwrap();

        assert_eq!(a.cells, CellRect::new(0, 0, 5, 5));
        assert_eq!(b.cells, CellRect::new(5, 0, 5, 5));
        assert_eq!(c.cells, CellRect::new(10, 0, 5, 5));
        assert_eq!(a.available_width, 8);
    }

    #[test]
    fn test_narrow_remainder_gets_narrow_tile() {
        let params = params();
        let mut packer = GridPacker::new(&params);
        for id in 1..=3 {
            packer.place(&square(id)).unwrap();
        }

        // One free column left in row 0.
        let d = packer.place(&square(4)).unwrap();
        assert_eq!(d.available_width, 1);
        assert_eq!(d.cells, CellRect::new(15, 0, 1, 2));
        assert_eq!(d.tile.span, Span::new(1, 2));
    }

    #[test]
    fn test_odd_rows_fill_right_to_left() {
        let params = params();
        let mut packer = GridPacker::new(&params);
        for id in 1..=4 {
            packer.place(&square(id)).unwrap();
        }

        // Rows 0 and 1 are full; the next free block is the right edge of row 2.
        let e = packer.place(&square(5)).unwrap();
        assert_eq!(packer.current_row(), 2);
        assert_eq!(e.cells, CellRect::new(15, 2, 1, 2));

        let f = packer.place(&square(6)).unwrap();
        assert_eq!(packer.current_row(), 4);
        assert_eq!(f.cells, CellRect::new(15, 4, 1, 2));

        // Row 5 is odd: the scan starts at the right and the run is measured
        // leftward from column 14.
        let g = packer.place(&square(7)).unwrap();
        assert_eq!(packer.current_row(), 5);
        assert_eq!(g.available_width, 8);
        assert_eq!(g.cells, CellRect::new(10, 5, 5, 5));

        let h = packer.place(&square(8)).unwrap();
        assert_eq!(h.cells, CellRect::new(5, 5, 5, 5));
    }

    #[test]
    fn test_reverse_row_anchor() {
        let params = GridParameters {
            device: crate::config::DeviceClass::Desktop,
            block_size: 10,
            gap_size: 2,
            column_count: 6,
            offset: 0.0,
            max_span: 8,
            min_span: 3,
        };
        let mut packer = GridPacker::new(&params);

        // Panorama: 6 wide, 3 tall, fills rows 0..3.
        let wide = packer.place(&Photo::new(1, 3000.0, 1000.0)).unwrap();
        assert_eq!(wide.cells, CellRect::new(0, 0, 6, 3));

        // Row 3 is odd: scan starts at the right edge.
        let next = packer.place(&square(2)).unwrap();
        assert_eq!(packer.current_row(), 3);
        assert_eq!(next.available_width, 6);
        // 5x5 tile anchored so its right edge sits on column 5.
        assert_eq!(next.cells, CellRect::new(1, 3, 5, 5));
        assert_eq!(next.tile.rect.left, 12.0);
        assert_eq!(next.tile.rect.top, 36.0);
        assert_eq!(next.tile.rect.width, 5.0 * 10.0 + 4.0 * 2.0);
    }

    #[test]
    fn test_geometry() {
        let params = params();
        let tiles = pack(&[square(1)], &params).unwrap();
        let tile = tiles[0];
        assert_eq!(tile.id, PhotoId(1));
        assert_eq!(tile.rect.left, 0.0);
        assert_eq!(tile.rect.top, 0.0);
        assert_eq!(tile.rect.width, 5.0 * 55.0 + 4.0 * 8.0);
        assert_eq!(tile.rect.height, 5.0 * 55.0 + 4.0 * 8.0);
    }

    #[test]
    fn test_invalid_photo_rejected_up_front() {
        let photos = vec![square(1), Photo::new(2, 0.0, 100.0), square(3)];
        assert_eq!(
            pack(&photos, &params()),
            Err(LayoutError::InvalidPhotoDimensions {
                id: PhotoId(2),
                width: 0.0,
                height: 100.0
            })
        );

        let photos = vec![Photo::new(9, 100.0, -1.0)];
        assert!(pack(&photos, &params()).is_err());
    }

    #[test]
    fn test_cursor_never_decreases() {
        let params = params();
        let mut packer = GridPacker::new(&params);
        let mut last = 0;
        for id in 0..60u64 {
            let ratio = 0.3 + (id % 7) as f64 * 0.4;
            packer.place(&Photo::new(id, 1000.0 * ratio, 1000.0)).unwrap();
            assert!(packer.current_row() >= last);
            last = packer.current_row();
        }
    }
}
