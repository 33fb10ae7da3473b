//! Span estimation - how many blocks a photo covers.
//!
//! A fixed pipeline of small corrective steps turns an aspect ratio into an
//! integer footprint:
//!
//! ```text
//! seed -> clamp -> cap_height -> scale_up -> correct_extreme_ratio -> limit_narrow
//! ```
//!
//! Each step is a pure function of the previous span. The order is part of
//! the result: reordering the steps changes layouts.

use tiles_api::Span;

use crate::grid::GridParameters;

/// Ratio deviation below which a uniform scale-up is accepted.
const SCALE_TOLERANCE: f64 = 0.2;

/// Limits for one estimate, taken from the grid and the local scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanBounds {
    /// Free blocks measured at the slot.
    pub available_width: usize,
    /// `min(available_width, device_max)`.
    pub max_span: usize,
    pub device_max: usize,
    pub min_span: usize,
}

impl SpanBounds {
    /// At least one block is always available at a located slot.
    pub fn new(available_width: usize, device_max: usize, min_span: usize) -> Self {
        let available_width = available_width.max(1);
        Self {
            available_width,
            max_span: available_width.min(device_max),
            device_max,
            min_span,
        }
    }

    pub fn for_grid(params: &GridParameters, available_width: usize) -> Self {
        Self::new(available_width, params.max_span, params.min_span)
    }

    /// Lower bound for the horizontal span.
    ///
    /// Normally `min_span`, but never wider than the free run: a slot narrower
    /// than `min_span` gets a narrow tile rather than an overlapping one.
    #[inline]
    pub fn min_horizontal(&self) -> usize {
        self.min_span.min(self.max_span)
    }
}

/// Estimate a photo's footprint.
pub fn estimate_span(aspect_ratio: f64, bounds: &SpanBounds) -> Span {
    let span = seed(aspect_ratio, bounds);
    let span = clamp(span, bounds);
    let span = cap_height(span);
    let span = scale_up(span, aspect_ratio, bounds);
    let span = correct_extreme_ratio(span, aspect_ratio, bounds);
    limit_narrow(span)
}

/// Ratio-preserving starting point around a `min_span`-sized square.
pub fn seed(aspect_ratio: f64, bounds: &SpanBounds) -> Span {
    let min = bounds.min_span as f64;
    let ideal_width = (aspect_ratio * min).sqrt();
    let ideal_height = (min / aspect_ratio).sqrt();
    Span::new(
        (ideal_width * min).round() as usize,
        (ideal_height * min).round() as usize,
    )
}

/// Horizontal into `[min_horizontal, max_span]`, vertical into
/// `[min_span, device_max]`.
pub fn clamp(span: Span, bounds: &SpanBounds) -> Span {
    Span::new(
        span.horizontal.max(bounds.min_horizontal()).min(bounds.max_span),
        span.vertical.max(bounds.min_span).min(bounds.device_max),
    )
}

/// Keep narrow tiles from becoming towers.
pub fn cap_height(span: Span) -> Span {
    let Span { horizontal, mut vertical } = span;
    if horizontal <= 2 {
        vertical = vertical.min(horizontal * 2);
    } else if horizontal == 3 {
        vertical = vertical.min((horizontal as f64 * 1.5).ceil() as usize);
    }
    Span::new(horizontal, vertical)
}

/// Grow small tiles by a whole factor when there is room and the shape stays
/// close to the photo's ratio.
pub fn scale_up(span: Span, aspect_ratio: f64, bounds: &SpanBounds) -> Span {
    let Span { horizontal, vertical } = span;
    if horizontal > 4 || vertical > 4 || horizontal == 0 || vertical == 0 {
        return span;
    }

    let scale = (bounds.max_span / horizontal).min(bounds.device_max / vertical);
    if scale <= 1 {
        return span;
    }

    let scaled_ratio = (horizontal * scale) as f64 / (vertical * scale) as f64;
    if (scaled_ratio - aspect_ratio).abs() / aspect_ratio < SCALE_TOLERANCE {
        Span::new(horizontal * scale, vertical * scale)
    } else {
        span
    }
}

/// Push panoramas wider and tall portraits taller.
pub fn correct_extreme_ratio(span: Span, aspect_ratio: f64, bounds: &SpanBounds) -> Span {
    let Span { horizontal, vertical } = span;
    if aspect_ratio > 2.0 {
        Span::new(
            (horizontal + 1).min(bounds.max_span),
            vertical.saturating_sub(1).max(bounds.min_span),
        )
    } else if aspect_ratio < 0.5 {
        Span::new(
            horizontal.saturating_sub(1).max(bounds.min_horizontal()),
            (vertical + 1).min(bounds.device_max),
        )
    } else {
        span
    }
}

/// Final guard: a tile at most two blocks wide is at most twice as tall.
pub fn limit_narrow(span: Span) -> Span {
    if span.horizontal <= 2 {
        Span::new(span.horizontal, span.vertical.min(span.horizontal * 2))
    } else {
        span
    }
}
