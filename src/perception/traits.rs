use async_trait::async_trait;

use crate::errors::PagePointerResult;
use crate::perception::types::ViewportInfo;

/// Anything that can report the current geometry of a live page element.
///
/// Implementations must not retry: a stale or detached element surfaces as
/// `ElementUnavailable`, a transport or script failure as `GeometryQuery`.
#[async_trait]
pub trait GeometrySource: Send + Sync {
    /// Handle identifying one element in the session.
    type Handle: Send + Sync;

    async fn viewport_info(&self, element: &Self::Handle) -> PagePointerResult<ViewportInfo>;
}
