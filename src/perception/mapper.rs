// CSS viewport geometry → physical screen pixels.
//
// Browsers do not expose the exact size of their chrome (title bar, tabs,
// toolbars, window borders), so it is estimated from the gap between the
// outer window and the inner viewport:
//
//   - Left/right borders are assumed symmetric: one side is half the width gap.
//   - Everything left of the height gap after removing one border is treated
//     as toolbar above the viewport. This mixes a horizontal border estimate
//     into the vertical axis; the formula is kept as is for compatibility.
//
// The result is a heuristic. Synthetic inputs map exactly; real browsers may
// be off by a few pixels.
use crate::perception::types::{DisplayBounds, ScreenPoint, ViewportInfo};

/// Estimated browser chrome around the viewport, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeOffsets {
    pub border_x: f64,
    pub toolbar_y: f64,
}

impl ChromeOffsets {
    pub fn estimate(info: &ViewportInfo) -> Self {
        let border_x = ((info.outer_width - info.inner_width) / 2.0).max(0.0);
        let toolbar_y = (info.outer_height - info.inner_height - border_x).max(0.0);
        Self { border_x, toolbar_y }
    }
}

/// Element centre in screen-absolute CSS pixels.
pub fn css_center(info: &ViewportInfo) -> (f64, f64) {
    let chrome = ChromeOffsets::estimate(info);
    let rect = &info.rect;
    let x = info.screen_x + chrome.border_x + rect.left + rect.width / 2.0;
    let y = info.screen_y + chrome.toolbar_y + rect.top + rect.height / 2.0;
    (x, y)
}

/// Element centre in physical pixels, before clamping.
pub fn physical_center(info: &ViewportInfo) -> (f64, f64) {
    let (x, y) = css_center(info);
    let dpr = info.device_pixel_ratio;
    (x * dpr, y * dpr)
}

/// Maps a [`ViewportInfo`] snapshot onto a [`ScreenPoint`] inside the display.
///
/// Points that land off-screen (element scrolled away, bogus chrome estimate)
/// are clamped to the nearest edge rather than reported as errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateMapper {
    debug: bool,
}

impl CoordinateMapper {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    pub fn map(&self, info: &ViewportInfo, display: DisplayBounds) -> ScreenPoint {
        let (raw_x, raw_y) = physical_center(info);
        let point = display.clamp(raw_x, raw_y);

        let dpr = info.device_pixel_ratio;
        if self.debug {
            tracing::info!(dpr, x = point.x, y = point.y, "element screen centre");
        } else {
            tracing::trace!(dpr, raw_x, raw_y, x = point.x, y = point.y, "element screen centre");
        }
        point
    }
}
