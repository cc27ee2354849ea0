// Element → physical screen point.
use crate::errors::PagePointerResult;
use crate::executor::display::DisplayQuery;
use crate::perception::mapper::CoordinateMapper;
use crate::perception::traits::GeometrySource;
use crate::perception::types::ScreenPoint;

/// Centre of `element` in physical screen pixels, clamped to the display.
///
/// One geometry query, one fresh display query, then pure arithmetic.
/// Query failures are returned unchanged; nothing is retried.
pub async fn element_screen_center<S, D>(
    source: &S,
    element: &S::Handle,
    display: &D,
    mapper: &CoordinateMapper,
) -> PagePointerResult<ScreenPoint>
where
    S: GeometrySource,
    D: DisplayQuery,
{
    let info = source.viewport_info(element).await?;
    let bounds = display.bounds()?;
    Ok(mapper.map(&info, bounds))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::errors::PagePointerError;
    use crate::perception::types::{DisplayBounds, ElementRect, ViewportInfo};

    struct FakePage {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GeometrySource for FakePage {
        type Handle = &'static str;

        async fn viewport_info(&self, element: &&'static str) -> PagePointerResult<ViewportInfo> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match *element {
                "h1" => Ok(ViewportInfo {
                    rect: ElementRect { left: 100.0, top: 50.0, width: 200.0, height: 40.0 },
                    screen_x: 10.0,
                    screen_y: 20.0,
                    outer_width: 1000.0,
                    outer_height: 800.0,
                    inner_width: 984.0,
                    inner_height: 750.0,
                    device_pixel_ratio: 2.0,
                }),
                "stale" => Err(PagePointerError::ElementUnavailable("stale element".into())),
                _ => Err(PagePointerError::GeometryQuery("script error".into())),
            }
        }
    }

    struct FakeDisplay {
        size: (u32, u32),
        queries: AtomicUsize,
    }

    impl FakeDisplay {
        fn new(width: u32, height: u32) -> Self {
            Self { size: (width, height), queries: AtomicUsize::new(0) }
        }
    }

    impl DisplayQuery for FakeDisplay {
        fn bounds(&self) -> PagePointerResult<DisplayBounds> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            DisplayBounds::new(self.size.0, self.size.1)
                .ok_or_else(|| PagePointerError::Display("zero".into()))
        }
    }

    fn page() -> FakePage {
        FakePage { calls: AtomicUsize::new(0) }
    }

    #[tokio::test]
    async fn maps_element_through_fresh_display() {
        let page = page();
        let display = FakeDisplay::new(1920, 1080);
        let mapper = CoordinateMapper::default();

        let point = element_screen_center(&page, &"h1", &display, &mapper).await.unwrap();
        assert_eq!(point, ScreenPoint::new(436, 264));

        element_screen_center(&page, &"h1", &display, &mapper).await.unwrap();
        assert_eq!(display.queries.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn small_display_clamps() {
        let display = FakeDisplay::new(400, 200);
        let point = element_screen_center(&page(), &"h1", &display, &CoordinateMapper::default())
            .await
            .unwrap();
        assert_eq!(point, ScreenPoint::new(399, 199));
    }

    #[tokio::test]
    async fn unavailable_element_propagates_without_retry() {
        let page = page();
        let display = FakeDisplay::new(1920, 1080);
        let err = element_screen_center(&page, &"stale", &display, &CoordinateMapper::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PagePointerError::ElementUnavailable(_)));
        assert_eq!(page.calls.load(Ordering::SeqCst), 1);
        assert_eq!(display.queries.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn query_failure_propagates() {
        let err = element_screen_center(
            &page(),
            &"broken",
            &FakeDisplay::new(1920, 1080),
            &CoordinateMapper::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PagePointerError::GeometryQuery(_)));
    }

    #[tokio::test]
    async fn display_failure_propagates() {
        let err = element_screen_center(&page(), &"h1", &FakeDisplay::new(0, 0), &CoordinateMapper::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PagePointerError::Display(_)));
    }
}
