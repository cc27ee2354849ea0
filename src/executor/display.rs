use enigo::{Enigo, Mouse, Settings};

use crate::errors::{PagePointerError, PagePointerResult};
use crate::perception::types::DisplayBounds;

/// Source of the current physical display size. Implementations must query
/// every time; monitors can change between calls.
pub trait DisplayQuery: Send + Sync {
    fn bounds(&self) -> PagePointerResult<DisplayBounds>;
}

/// The OS main display, as reported by the input backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimaryDisplay;

impl DisplayQuery for PrimaryDisplay {
    fn bounds(&self) -> PagePointerResult<DisplayBounds> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| PagePointerError::Display(format!("input backend: {e}")))?;
        let (w, h) = enigo
            .main_display()
            .map_err(|e| PagePointerError::Display(format!("main_display: {e}")))?;
        let bounds = bounds_from(w, h)?;
        tracing::debug!(width = bounds.width(), height = bounds.height(), "display size");
        Ok(bounds)
    }
}

fn bounds_from(width: i32, height: i32) -> PagePointerResult<DisplayBounds> {
    u32::try_from(width)
        .ok()
        .zip(u32::try_from(height).ok())
        .and_then(|(w, h)| DisplayBounds::new(w, h))
        .ok_or_else(|| PagePointerError::Display(format!("unusable display size {width}x{height}")))
}
