//! Photo records supplied by the data-fetch layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(pub u64);

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for PhotoId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A photo and its intrinsic pixel dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    pub width: f64,
    pub height: f64,
    /// Alternative text, passed through untouched for renderers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl Photo {
    pub fn new(id: impl Into<PhotoId>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            alt: None,
        }
    }

    /// Attach alternative text.
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// Width over height.
    ///
    /// Only meaningful when [`Photo::has_valid_dimensions`] holds.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Both dimensions are finite and strictly positive.
    #[inline]
    pub fn has_valid_dimensions(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}
