//! Occupancy grid - a growable 2D array of claimed blocks.

use std::fmt;

use tiles_api::Span;

/// A rectangle in block coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRect {
    pub col: usize,
    pub row: usize,
    pub width: usize,
    pub height: usize,
}

impl CellRect {
    #[inline]
    pub const fn new(col: usize, row: usize, width: usize, height: usize) -> Self {
        Self { col, row, width, height }
    }

    /// A rectangle covering `span` with its top-left block at (`col`, `row`).
    #[inline]
    pub const fn from_span(col: usize, row: usize, span: Span) -> Self {
        Self::new(col, row, span.horizontal, span.vertical)
    }

    /// One past the last row.
    #[inline]
    pub fn row_end(&self) -> usize {
        self.row + self.height
    }

    /// One past the last column.
    #[inline]
    pub fn col_end(&self) -> usize {
        self.col + self.width
    }
}

/// Scan direction along a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    /// Left to right.
    Forward,
    /// Right to left.
    Reverse,
}

impl ScanDirection {
    /// Snake order: even rows forward, odd rows reverse.
    #[inline]
    pub fn for_row(row: usize) -> Self {
        if row % 2 == 0 { Self::Forward } else { Self::Reverse }
    }
}

/// Which blocks of a fixed-width, unbounded-height grid are claimed.
///
/// Rows past the end are implicitly free; they are materialized on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyGrid {
    /// The cells, stored row-major.
    cells: Vec<bool>,
    /// Number of columns.
    cols: usize,
    /// Number of materialized rows.
    rows: usize,
}

impl OccupancyGrid {
    /// Create an empty grid with the given column count.
    pub fn new(cols: usize) -> Self {
        Self::with_rows(cols, 0)
    }

    /// Create a grid with `rows` free rows.
    pub fn with_rows(cols: usize, rows: usize) -> Self {
        Self {
            cells: vec![false; cols * rows],
            cols,
            rows,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Grow to at least `rows` rows. New rows are free.
    pub fn ensure_rows(&mut self, rows: usize) {
        if rows > self.rows {
            self.cells.resize(rows * self.cols, false);
            self.rows = rows;
        }
    }

    /// Whether a block is claimed. Out-of-range blocks read as free.
    #[inline]
    pub fn is_occupied(&self, col: usize, row: usize) -> bool {
        col < self.cols && row < self.rows && self.cells[row * self.cols + col]
    }

    /// Whether a block inside the column range is unclaimed.
    #[inline]
    pub fn is_free(&self, col: usize, row: usize) -> bool {
        col < self.cols && !self.is_occupied(col, row)
    }

    /// Claim every block of `rect`, growing the grid as needed.
    ///
    /// Columns beyond the grid width are ignored.
    pub fn claim(&mut self, rect: CellRect) {
        self.ensure_rows(rect.row_end());
        let col_end = rect.col_end().min(self.cols);
        for row in rect.row..rect.row_end() {
            for col in rect.col..col_end {
                let idx = row * self.cols + col;
                debug_assert!(!self.cells[idx], "block ({col}, {row}) claimed twice");
                self.cells[idx] = true;
            }
        }
    }

    /// First free column of `row` in scan order.
    pub fn first_free(&self, row: usize, direction: ScanDirection) -> Option<usize> {
        match direction {
            ScanDirection::Forward => (0..self.cols).find(|&col| self.is_free(col, row)),
            ScanDirection::Reverse => (0..self.cols).rev().find(|&col| self.is_free(col, row)),
        }
    }

    /// Count consecutive free blocks of `row` starting at `col` and moving in
    /// `direction`, stopping at `limit`.
    pub fn free_run(&self, row: usize, col: usize, direction: ScanDirection, limit: usize) -> usize {
        if col >= self.cols {
            return 0;
        }
        match direction {
            ScanDirection::Forward => (col..self.cols)
                .take_while(|&c| self.is_free(c, row))
                .take(limit)
                .count(),
            ScanDirection::Reverse => (0..=col)
                .rev()
                .take_while(|&c| self.is_free(c, row))
                .take(limit)
                .count(),
        }
    }

    /// Whether every block of `rect` is free and inside the column range.
    pub fn is_rect_free(&self, rect: CellRect) -> bool {
        rect.col_end() <= self.cols
            && (rect.row..rect.row_end())
                .all(|row| (rect.col..rect.col_end()).all(|col| !self.is_occupied(col, row)))
    }

    /// Iterate over materialized rows.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[bool]> {
        // chunks() panics on zero; a zero-column grid has no cells anyway.
        self.cells.chunks(self.cols.max(1))
    }

    /// Number of claimed blocks.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }
}

impl fmt::Display for OccupancyGrid {
    /// One line per row, `#` for claimed blocks and `.` for free ones.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows_iter() {
            for &cell in row {
                f.write_str(if cell { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
