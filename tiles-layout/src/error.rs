//! Layout error types.

use thiserror::Error;
use tiles_api::PhotoId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("invalid dimensions for photo {id}: {width}x{height}")]
    InvalidPhotoDimensions { id: PhotoId, width: f64, height: f64 },

    #[error("invalid container width: {0}")]
    InvalidContainerWidth(f64),

    #[error("invalid layout config: {0}")]
    InvalidConfig(String),
}
