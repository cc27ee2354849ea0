use serde::{Deserialize, Serialize};

/// Element bounding box in CSS pixels, relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Snapshot of an element's box plus the window geometry around it,
/// exactly as reported by the browser. All lengths are CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportInfo {
    pub rect: ElementRect,
    pub screen_x: f64,
    pub screen_y: f64,
    pub outer_width: f64,
    pub outer_height: f64,
    pub inner_width: f64,
    pub inner_height: f64,
    /// CSS → physical scale factor. Browsers report >= 1, nothing enforces it.
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,
}

fn default_device_pixel_ratio() -> f64 {
    1.0
}

/// Final cursor target in physical screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: u32,
    pub y: u32,
}

impl ScreenPoint {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Physical size of the display the cursor lives on. Both sides are >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBounds {
    width: u32,
    height: u32,
}

impl DisplayBounds {
    /// Returns `None` for a degenerate (zero-sized) display.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Clamp a physical coordinate pair into the display and truncate.
    pub fn clamp(&self, x: f64, y: f64) -> ScreenPoint {
        ScreenPoint {
            x: clamp_axis(x, self.width),
            y: clamp_axis(y, self.height),
        }
    }
}

fn clamp_axis(value: f64, bound: u32) -> u32 {
    let max = f64::from(bound - 1);
    // NaN falls through both comparisons and saturates to 0 on the cast.
    value.max(0.0).min(max) as u32
}
