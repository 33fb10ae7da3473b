//! Tiles Layout - deterministic mosaic layout for photo grids.
//!
//! Arranges photos of any aspect ratio on a grid of square blocks, then fills
//! the holes left behind with placeholder rectangles.
//!
//! # Architecture
//!
//! ```text
//! container width -> GridParameters -> pack(photos) -> fill_placeholders -> MosaicLayout
//! ```
//!
//! Every stage is a pure function of its inputs. Nothing outlives a call
//! except what the caller chooses to keep (see [`LayoutCache`]).

pub mod cache;
pub mod config;
pub mod grid;
pub mod occupancy;
pub mod packer;
pub mod placeholder;
pub mod preview;
pub mod span;

mod error;

use serde::{Deserialize, Serialize};
use tiles_api::{Photo, PhotoTile, PlaceholderTile};

pub use cache::{LayoutCache, LayoutCacheKey};
pub use config::{DeviceClass, DeviceProfile, LayoutConfig};
pub use error::LayoutError;
pub use grid::GridParameters;
pub use occupancy::{CellRect, OccupancyGrid, ScanDirection};
pub use packer::{GridPacker, Placement};
pub use span::{SpanBounds, estimate_span};

/// The complete result of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MosaicLayout {
    pub grid: GridParameters,
    /// Photo tiles, in input order.
    pub photos: Vec<PhotoTile>,
    /// Placeholder tiles, in raster discovery order.
    pub placeholders: Vec<PlaceholderTile>,
    /// Grid rows reached by any photo.
    pub rows: usize,
}

impl MosaicLayout {
    /// Pixel height from the top of the first row to the bottom of the last.
    pub fn content_height(&self) -> f64 {
        self.grid.rows_height(self.rows)
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

/// Lay out `photos` in a container of `container_width` pixels.
pub fn compute_layout(photos: &[Photo], container_width: f64) -> Result<MosaicLayout, LayoutError> {
    compute_layout_with(photos, container_width, &LayoutConfig::default())
}

/// Lay out `photos` under a custom config.
pub fn compute_layout_with(
    photos: &[Photo],
    container_width: f64,
    config: &LayoutConfig,
) -> Result<MosaicLayout, LayoutError> {
    let grid = GridParameters::for_width_with(container_width, config)?;
    let photo_tiles = packer::pack(photos, &grid)?;
    let placeholders = placeholder::fill_placeholders(&photo_tiles, &grid);
    let rows = photo_tiles
        .iter()
        .map(|tile| grid.px_to_cell_rect(&tile.rect).row_end())
        .max()
        .unwrap_or(0);

    Ok(MosaicLayout {
        grid,
        photos: photo_tiles,
        placeholders,
        rows,
    })
}
