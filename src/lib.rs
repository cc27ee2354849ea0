pub mod browser;
pub mod cli;
pub mod config;
pub mod errors;
pub mod executor;
pub mod perception;

use std::time::Duration;

use crate::browser::session::{PageSession, WebDriverSession};
use crate::cli::Cli;
use crate::config::{AppConfig, HoverConfig, PointerConfig};
use crate::errors::{PagePointerError, PagePointerResult};
use crate::executor::coordinator::element_screen_center;
use crate::executor::display::{DisplayQuery, PrimaryDisplay};
use crate::executor::input::{self, EnigoPointer, Hover, Motion};
use crate::perception::mapper::CoordinateMapper;
use crate::perception::types::ScreenPoint;

pub async fn run(cli: Cli) -> PagePointerResult<()> {
    // Load .env file if present (ignore error if not found)
    let _ = dotenvy::dotenv();

    // Resolved before the subscriber exists so `debug = true` in the file
    // can raise the log level; its own log lines are emitted afterwards.
    let loaded = config::load_config(cli.config.as_deref());
    let resolved = build_config(&cli, loaded);

    let debug = resolved.as_ref().map_or(cli.debug, |(cfg, _)| cfg.debug);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_log_level(debug))),
        )
        .init();

    let (config, fallback) = resolved?;
    match fallback {
        Some(e) => tracing::warn!(error = %e, "no usable config; using defaults"),
        None => tracing::info!(url = %config.target.url, "config loaded"),
    }

    let session = WebDriverSession::connect(&config.browser).await?;
    let point = drive(session, &config, &PrimaryDisplay, move_pointer).await?;
    tracing::info!(x = point.x, y = point.y, "cursor on target");
    Ok(())
}

fn default_log_level(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info"
    }
}

/// Layers env and CLI over the loaded file. A missing or broken file falls
/// back to defaults (returned alongside) unless it was named explicitly.
fn build_config(
    cli: &Cli,
    loaded: PagePointerResult<AppConfig>,
) -> PagePointerResult<(AppConfig, Option<PagePointerError>)> {
    let (mut config, fallback) = match loaded {
        Ok(cfg) => (cfg, None),
        Err(e) if cli.config.is_some() => return Err(e),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    config.apply_env()?;
    cli.apply(&mut config)?;
    Ok((config, fallback))
}

/// Point at the configured target, then close the session whatever the
/// outcome was.
pub async fn drive<S, D, M>(
    session: S,
    config: &AppConfig,
    display: &D,
    mover: M,
) -> PagePointerResult<ScreenPoint>
where
    S: PageSession,
    D: DisplayQuery,
    M: FnOnce(ScreenPoint, Motion, Option<Hover>) -> PagePointerResult<()> + Send + 'static,
{
    let outcome = point_at_target(&session, config, display, mover).await;
    if let Err(e) = session.close().await {
        tracing::warn!(error = %e, "failed to close browser session");
    }
    outcome
}

async fn point_at_target<S, D, M>(
    session: &S,
    config: &AppConfig,
    display: &D,
    mover: M,
) -> PagePointerResult<ScreenPoint>
where
    S: PageSession,
    D: DisplayQuery,
    M: FnOnce(ScreenPoint, Motion, Option<Hover>) -> PagePointerResult<()> + Send + 'static,
{
    session.goto(&config.target.url).await?;
    tokio::time::sleep(Duration::from_millis(config.target.settle_ms)).await;

    let element = session.find(&config.target.selector).await?;
    let mapper = CoordinateMapper::new(config.debug);
    let point = element_screen_center(session, &element, display, &mapper).await?;

    let motion = motion_from(&config.pointer);
    let hover = config.hover.enabled.then(|| hover_from(&config.hover));
    tokio::task::spawn_blocking(move || mover(point, motion, hover))
        .await
        .map_err(|e| PagePointerError::Pointer(format!("join: {e}")))??;
    Ok(point)
}

/// Runs on a blocking thread: OS input handles are not async-safe.
fn move_pointer(target: ScreenPoint, motion: Motion, hover: Option<Hover>) -> PagePointerResult<()> {
    let display = PrimaryDisplay.bounds()?;
    let mut pointer = EnigoPointer::new()?;
    input::glide_to(&mut pointer, target, motion, display)?;
    if let Some(hover) = hover {
        input::hover_around(&mut pointer, target, &hover, display)?;
    }
    Ok(())
}

fn motion_from(cfg: &PointerConfig) -> Motion {
    Motion {
        duration: Duration::from_millis(cfg.duration_ms),
        steps: cfg.glide_steps,
    }
}

fn hover_from(cfg: &HoverConfig) -> Hover {
    Hover {
        radius: cfg.radius,
        loops: cfg.loops,
        steps_per_loop: cfg.steps_per_loop,
        loop_duration: Duration::from_millis(cfg.loop_ms),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use clap::Parser;

    use super::*;
    use crate::browser::selector::Selector;
    use crate::perception::traits::GeometrySource;
    use crate::perception::types::{DisplayBounds, ElementRect, ViewportInfo};

    struct FakeSession {
        closed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl GeometrySource for FakeSession {
        type Handle = ();

        async fn viewport_info(&self, _element: &()) -> PagePointerResult<ViewportInfo> {
            Ok(ViewportInfo {
                rect: ElementRect { left: 100.0, top: 50.0, width: 200.0, height: 40.0 },
                screen_x: 10.0,
                screen_y: 20.0,
                outer_width: 1000.0,
                outer_height: 800.0,
                inner_width: 984.0,
                inner_height: 750.0,
                device_pixel_ratio: 1.0,
            })
        }
    }

    #[async_trait]
    impl PageSession for FakeSession {
        async fn goto(&self, _url: &str) -> PagePointerResult<()> {
            Ok(())
        }

        async fn find(&self, selector: &Selector) -> PagePointerResult<()> {
            match selector {
                Selector::TagName(tag) if tag == "h1" => Ok(()),
                other => Err(PagePointerError::ElementUnavailable(format!("no {other}"))),
            }
        }

        async fn close(self) -> PagePointerResult<()> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FullHd;

    impl DisplayQuery for FullHd {
        fn bounds(&self) -> PagePointerResult<DisplayBounds> {
            DisplayBounds::new(1920, 1080).ok_or_else(|| PagePointerError::Display("zero".into()))
        }
    }

    fn quick_config(selector: &str) -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.target.settle_ms = 0;
        cfg.target.selector = selector.parse().unwrap();
        cfg
    }

    #[tokio::test]
    async fn moves_pointer_and_closes_session() {
        let closed = Arc::new(AtomicBool::new(false));
        let moved = Arc::new(Mutex::new(None));
        let seen = Arc::clone(&moved);
        let session = FakeSession { closed: Arc::clone(&closed) };

        let point = drive(session, &quick_config("h1"), &FullHd, move |target, _, hover| {
            *seen.lock().unwrap() = Some((target, hover.is_some()));
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(point, ScreenPoint::new(218, 132));
        assert_eq!(*moved.lock().unwrap(), Some((ScreenPoint::new(218, 132), true)));
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn missing_element_still_closes_session() {
        let closed = Arc::new(AtomicBool::new(false));
        let session = FakeSession { closed: Arc::clone(&closed) };

        let err = drive(session, &quick_config("id:nope"), &FullHd, |_, _, _| {
            panic!("pointer must not move")
        })
        .await
        .unwrap_err();

        assert!(matches!(err, PagePointerError::ElementUnavailable(_)));
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn pointer_failure_still_closes_session() {
        let closed = Arc::new(AtomicBool::new(false));
        let session = FakeSession { closed: Arc::clone(&closed) };

        let err = drive(session, &quick_config("h1"), &FullHd, |_, _, _| {
            Err(PagePointerError::Pointer("no input backend".into()))
        })
        .await
        .unwrap_err();

        assert!(matches!(err, PagePointerError::Pointer(_)));
        assert!(closed.load(Ordering::SeqCst));
    }

    #[test]
    fn debug_in_file_raises_log_level() {
        let cli = Cli::parse_from(["pagepointer"]);
        let file = config::parse_config("debug = true");
        let (cfg, fallback) = build_config(&cli, file).unwrap();
        assert!(cfg.debug);
        assert!(fallback.is_none());
        assert_eq!(default_log_level(cfg.debug), "debug");
    }

    #[test]
    fn missing_default_file_falls_back() {
        let cli = Cli::parse_from(["pagepointer"]);
        let missing = Err(PagePointerError::Config("config.toml not found".into()));
        let (cfg, fallback) = build_config(&cli, missing).unwrap();
        assert!(!cfg.debug);
        assert!(fallback.is_some());
        assert_eq!(default_log_level(cfg.debug), "info");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let cli = Cli::parse_from(["pagepointer", "--config", "/nonexistent/config.toml"]);
        let missing = Err(PagePointerError::Config("not found".into()));
        assert!(build_config(&cli, missing).is_err());
    }
}
