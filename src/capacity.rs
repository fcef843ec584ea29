//! Estimates how many characters of logical text fit on one rendered page.
//!
//! No real text shaping happens here: an average-glyph-width fraction of
//! the font size stands in for measurement, and a safety margin absorbs
//! what word wrap loses at line ends. The estimate only has to be stable
//! enough that pagination looks consistent across reflows.

/// Average glyph advance as a fraction of the font size, calibrated
/// against the desktop renderer's default book face.
const AVG_CHAR_WIDTH_RATIO: f32 = 0.6;

/// Fraction of the raw character-grid product kept after word wrap loses
/// partial lines.
const WRAP_SAFETY_MARGIN: f32 = 0.85;

/// Floor on the estimate so the paginator always makes progress, even for
/// a collapsed or absurdly zoomed window. Not a usable reading size.
pub const MIN_PAGE_CAPACITY: usize = 30;

/// Characters of logical text that fit in the viewport at the given font
/// metrics. Deterministic and cheap; callers re-run it on every resize or
/// zoom change.
pub fn estimate_capacity(
    viewport_width: f32,
    viewport_height: f32,
    font_size_px: f32,
    line_height: f32,
) -> usize {
    let char_width = font_size_px * AVG_CHAR_WIDTH_RATIO;
    let line_px = font_size_px * line_height;
    if char_width <= 0.0 || line_px <= 0.0 {
        return MIN_PAGE_CAPACITY;
    }

    let chars_per_line = (viewport_width / char_width).floor();
    let lines_per_page = (viewport_height / line_px).floor();
    let raw = chars_per_line * lines_per_page;

    // NaN or negative geometry casts to 0 and lands on the floor.
    let estimate = (raw * WRAP_SAFETY_MARGIN) as usize;
    estimate.max(MIN_PAGE_CAPACITY)
}
