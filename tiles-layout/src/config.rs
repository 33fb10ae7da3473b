//! Layout configuration.
//!
//! The defaults are the tuned constants of the mosaic grid; a config file only
//! needs to name the values it overrides.

use serde::{Deserialize, Serialize};

use crate::LayoutError;

/// Containers at or below this width use the mobile profile.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Smallest span a tile is given when space allows.
pub const MIN_SPAN: usize = 3;

/// Device class, chosen from the container width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

/// Grid constants for one device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// Block size the calculator searches around (±20%).
    pub suggested_block_size: u32,
    /// Pixel gap between adjacent blocks.
    pub gap_size: u32,
    /// Largest span, in blocks, along either axis.
    pub max_span: usize,
}

impl DeviceProfile {
    pub const MOBILE: Self = Self {
        suggested_block_size: 36,
        gap_size: 4,
        max_span: 5,
    };

    pub const DESKTOP: Self = Self {
        suggested_block_size: 64,
        gap_size: 8,
        max_span: 8,
    };

    /// Smallest candidate block size, `ceil(0.8 * suggested)`.
    #[inline]
    pub fn min_block_size(&self) -> u32 {
        (f64::from(self.suggested_block_size) * 0.8).ceil() as u32
    }

    /// Largest candidate block size, `floor(1.2 * suggested)`.
    #[inline]
    pub fn max_block_size(&self) -> u32 {
        (f64::from(self.suggested_block_size) * 1.2).floor() as u32
    }
}

/// Engine-wide configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub mobile_breakpoint: f64,
    pub min_span: usize,
    pub mobile: DeviceProfile,
    pub desktop: DeviceProfile,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: MOBILE_BREAKPOINT,
            min_span: MIN_SPAN,
            mobile: DeviceProfile::MOBILE,
            desktop: DeviceProfile::DESKTOP,
        }
    }
}

impl LayoutConfig {
    /// Classify a container width.
    #[inline]
    pub fn device_class(&self, container_width: f64) -> DeviceClass {
        if container_width <= self.mobile_breakpoint {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    #[inline]
    pub fn profile(&self, device: DeviceClass) -> &DeviceProfile {
        match device {
            DeviceClass::Mobile => &self.mobile,
            DeviceClass::Desktop => &self.desktop,
        }
    }

    /// Reject configs the engine cannot lay out with.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.mobile_breakpoint.is_finite() || self.mobile_breakpoint < 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "mobile_breakpoint must be a finite, non-negative width, got {}",
                self.mobile_breakpoint
            )));
        }
        if self.min_span == 0 {
            return Err(LayoutError::InvalidConfig("min_span must be at least 1".into()));
        }
        for (name, profile) in [("mobile", &self.mobile), ("desktop", &self.desktop)] {
            if profile.suggested_block_size == 0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{name}.suggested_block_size must be positive"
                )));
            }
            if profile.max_span < self.min_span {
                return Err(LayoutError::InvalidConfig(format!(
                    "{name}.max_span ({}) is below min_span ({})",
                    profile.max_span, self.min_span
                )));
            }
        }
        Ok(())
    }
}
