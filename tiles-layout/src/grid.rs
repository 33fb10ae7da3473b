//! Grid parameters - block size, gap, column count and centering offset.
//!
//! The block size is picked from a small range around the device's suggested
//! size so that a whole number of `block + gap` steps overshoots the container
//! by as little as possible. Half of that overshoot becomes the left offset,
//! centering the grid.

use serde::{Deserialize, Serialize};
use tiles_api::TileRect;

use crate::config::{DeviceClass, DeviceProfile, LayoutConfig};
use crate::occupancy::CellRect;
use crate::LayoutError;

/// Grid geometry derived from a container width.
///
/// Invariant: `column_count * (block_size + gap_size) >= container_width + gap_size`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridParameters {
    pub device: DeviceClass,
    pub block_size: u32,
    pub gap_size: u32,
    pub column_count: usize,
    /// Pixels the grid is shifted left to center it.
    pub offset: f64,
    /// Device maximum span, in blocks.
    pub max_span: usize,
    /// Minimum span, in blocks.
    pub min_span: usize,
}

impl GridParameters {
    /// Compute parameters with the default config.
    pub fn for_width(container_width: f64) -> Result<Self, LayoutError> {
        Self::for_width_with(container_width, &LayoutConfig::default())
    }

    /// Compute parameters for `container_width` under `config`.
    pub fn for_width_with(container_width: f64, config: &LayoutConfig) -> Result<Self, LayoutError> {
        if !container_width.is_finite() || container_width <= 0.0 {
            return Err(LayoutError::InvalidContainerWidth(container_width));
        }
        config.validate()?;

        let device = config.device_class(container_width);
        let profile = config.profile(device);
        let choice = select_block_size(container_width, profile);

        let gap = f64::from(profile.gap_size);
        let step = f64::from(choice.block_size) + gap;
        let column_count = ((container_width + gap) / step).ceil() as usize;

        let params = Self {
            device,
            block_size: choice.block_size,
            gap_size: profile.gap_size,
            column_count,
            offset: choice.offset,
            max_span: profile.max_span,
            min_span: config.min_span,
        };

        tracing::debug!(
            "Grid for width {}: {:?} block={} gap={} columns={} offset={}",
            container_width,
            device,
            params.block_size,
            params.gap_size,
            params.column_count,
            params.offset
        );

        Ok(params)
    }

    /// Distance between the left edges of adjacent columns.
    #[inline]
    pub fn step(&self) -> f64 {
        f64::from(self.block_size) + f64::from(self.gap_size)
    }

    /// Pixel length of `span` blocks and the gaps between them.
    #[inline]
    pub fn span_length(&self, span: usize) -> f64 {
        if span == 0 {
            return 0.0;
        }
        span as f64 * f64::from(self.block_size) + (span - 1) as f64 * f64::from(self.gap_size)
    }

    /// Left edge of a column.
    #[inline]
    pub fn column_left(&self, col: usize) -> f64 {
        col as f64 * self.step() - self.offset
    }

    /// Top edge of a row.
    #[inline]
    pub fn row_top(&self, row: usize) -> f64 {
        row as f64 * self.step()
    }

    /// Pixel rectangle covered by a block-space rectangle.
    pub fn cell_rect_to_px(&self, cells: CellRect) -> TileRect {
        TileRect::new(
            self.column_left(cells.col),
            self.row_top(cells.row),
            self.span_length(cells.width),
            self.span_length(cells.height),
        )
    }

    /// Recover the block-space rectangle of a pixel rectangle on this grid.
    pub fn px_to_cell_rect(&self, rect: &TileRect) -> CellRect {
        let step = self.step();
        let gap = f64::from(self.gap_size);
        let to_cells = |px: f64| (px / step).round().max(0.0) as usize;
        CellRect {
            col: to_cells(rect.left + self.offset),
            row: to_cells(rect.top),
            width: to_cells(rect.width + gap),
            height: to_cells(rect.height + gap),
        }
    }

    /// Total pixel height of `rows` grid rows.
    #[inline]
    pub fn rows_height(&self, rows: usize) -> f64 {
        self.span_length(rows)
    }
}

/// Outcome of the block size search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockChoice {
    pub block_size: u32,
    /// Overshoot of the winning row width past `container_width + gap`.
    pub slack: f64,
    pub offset: f64,
}

/// Scan candidate block sizes in ascending order and keep the one with the
/// smallest slack.
///
/// The comparison is strict, so among equal slacks the smallest block wins.
/// The search starts from a bound of `suggested + gap`; if nothing beats it
/// the suggested size is kept with no offset.
pub fn select_block_size(container_width: f64, profile: &DeviceProfile) -> BlockChoice {
    let gap = f64::from(profile.gap_size);
    let fit_width = container_width + gap;

    let mut choice = BlockChoice {
        block_size: profile.suggested_block_size,
        slack: f64::from(profile.suggested_block_size) + gap,
        offset: 0.0,
    };

    for candidate in profile.min_block_size()..=profile.max_block_size() {
        let step = f64::from(candidate) + gap;
        let row_width = (fit_width / step).ceil() * step;
        let slack = row_width - fit_width;

        if slack < choice.slack {
            choice = BlockChoice {
                block_size: candidate,
                slack,
                offset: (slack / 2.0).floor(),
            };
        }
    }

    choice
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(width: f64) -> GridParameters {
        GridParameters::for_width(width).unwrap()
    }

    #[test]
    fn test_desktop_1000() {
        let p = params(1000.0);
        assert_eq!(p.device, DeviceClass::Desktop);
        assert_eq!(p.block_size, 55);
        assert_eq!(p.gap_size, 8);
        assert_eq!(p.column_count, 16);
        assert_eq!(p.offset, 0.0);
        assert_eq!(p.max_span, 8);
    }

    #[test]
    fn test_desktop_1200() {
        let p = params(1200.0);
        assert_eq!(p.block_size, 73);
        assert_eq!(p.column_count, 15);
        assert_eq!(p.offset, 3.0);
    }

    #[test]
    fn test_mobile_375() {
        let p = params(375.0);
        assert_eq!(p.device, DeviceClass::Mobile);
        assert_eq!(p.block_size, 34);
        assert_eq!(p.gap_size, 4);
        assert_eq!(p.column_count, 10);
        assert_eq!(p.offset, 0.0);
        assert_eq!(p.max_span, 5);
    }

    #[test]
    fn test_mobile_breakpoint_768() {
        let p = params(768.0);
        assert_eq!(p.device, DeviceClass::Mobile);
        assert_eq!(p.block_size, 39);
        assert_eq!(p.column_count, 18);
        assert_eq!(p.offset, 1.0);

        assert_eq!(params(769.0).device, DeviceClass::Desktop);
    }

    #[test]
    fn test_ties_favor_smaller_block() {
        // Oracle: the first candidate in ascending order with the minimum slack.
        for width in 1..=2000 {
            let width = f64::from(width);
            let p = params(width);
            let profile = LayoutConfig::default().profile(p.device).to_owned();
            let gap = f64::from(profile.gap_size);
            let slack_of = |c: u32| {
                let step = f64::from(c) + gap;
                ((width + gap) / step).ceil() * step - (width + gap)
            };
            let range = profile.min_block_size()..=profile.max_block_size();
            let best = range.clone().map(slack_of).fold(f64::INFINITY, f64::min);
            let first = range.clone().find(|&c| slack_of(c) == best).unwrap();
            assert_eq!(p.block_size, first, "width {width}");
        }
    }

    #[test]
    fn test_bounds_and_invariant() {
        for width in (1..=3000).step_by(7) {
            let width = f64::from(width);
            let p = params(width);
            let profile = *LayoutConfig::default().profile(p.device);
            assert!(p.block_size >= profile.min_block_size());
            assert!(p.block_size <= profile.max_block_size());
            assert!(p.offset >= 0.0 && p.offset < p.step(), "width {width}");
            assert!(p.column_count >= 1);
            assert!(p.column_count as f64 * p.step() >= width + f64::from(p.gap_size));
        }
    }

    #[test]
    fn test_invalid_width() {
        assert_eq!(
            GridParameters::for_width(0.0),
            Err(LayoutError::InvalidContainerWidth(0.0))
        );
        assert!(GridParameters::for_width(-10.0).is_err());
        assert!(GridParameters::for_width(f64::NAN).is_err());
        assert!(GridParameters::for_width(f64::INFINITY).is_err());
    }

    #[test]
    fn test_custom_config() {
        let mut config = LayoutConfig::default();
        config.desktop.gap_size = 0;
        let p = GridParameters::for_width_with(1000.0, &config).unwrap();
        assert_eq!(p.gap_size, 0);
        // 17 * 59 = 1003 is the tightest fit in [52, 76].
        assert_eq!(p.block_size, 59);
        assert_eq!(p.column_count, 17);
        assert_eq!(p.offset, 1.0);
    }

    #[test]
    fn test_geometry_helpers() {
        let p = params(1000.0);
        assert_eq!(p.step(), 63.0);
        assert_eq!(p.span_length(1), 55.0);
        assert_eq!(p.span_length(3), 3.0 * 55.0 + 2.0 * 8.0);
        assert_eq!(p.span_length(0), 0.0);

        let cells = CellRect { col: 2, row: 1, width: 3, height: 4 };
        let px = p.cell_rect_to_px(cells);
        assert_eq!(px.left, 126.0);
        assert_eq!(px.top, 63.0);
        assert_eq!(p.px_to_cell_rect(&px), cells);
    }

    #[test]
    fn test_px_round_trip_with_offset() {
        let p = params(1200.0);
        assert_eq!(p.offset, 3.0);
        let cells = CellRect { col: 0, row: 0, width: 5, height: 3 };
        let px = p.cell_rect_to_px(cells);
        assert_eq!(px.left, -3.0);
        assert_eq!(p.px_to_cell_rect(&px), cells);
    }
}
