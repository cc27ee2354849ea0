// WebDriver browser session (fantoccini).
//
// Thin glue around the automation transport: connect, navigate, find one
// element, ask it for its geometry, close. No retries anywhere; every
// failure goes straight back to the caller.
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::{CmdError, ErrorStatus};
use fantoccini::{Client, ClientBuilder};
use serde_json::json;

use crate::browser::script::VIEWPORT_INFO_JS;
use crate::browser::selector::Selector;
use crate::config::{BrowserConfig, BrowserKind};
use crate::errors::{PagePointerError, PagePointerResult};
use crate::perception::traits::GeometrySource;
use crate::perception::types::ViewportInfo;

/// A live page the target element can be looked up in.
#[async_trait]
pub trait PageSession: GeometrySource + Sized {
    async fn goto(&self, url: &str) -> PagePointerResult<()>;

    async fn find(&self, selector: &Selector) -> PagePointerResult<Self::Handle>;

    /// Ends the browser session. Consumes the handle; nothing can follow.
    async fn close(self) -> PagePointerResult<()>;
}

pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    pub async fn connect(config: &BrowserConfig) -> PagePointerResult<Self> {
        tracing::info!(url = %config.webdriver_url, kind = ?config.kind, "connecting to WebDriver");

        let client = ClientBuilder::native()
            .capabilities(capabilities(config))
            .connect(&config.webdriver_url)
            .await
            .map_err(|e| PagePointerError::Session(format!("connect {}: {e}", config.webdriver_url)))?;

        if config.start_maximized && !config.headless {
            // Chrome honours --start-maximized; other drivers need the command.
            if let Err(e) = client.maximize_window().await {
                tracing::debug!(error = %e, "maximize_window not supported, continuing");
            }
        }

        Ok(Self { client })
    }
}

#[async_trait]
impl PageSession for WebDriverSession {
    async fn goto(&self, url: &str) -> PagePointerResult<()> {
        tracing::debug!(url, "navigating");
        self.client
            .goto(url)
            .await
            .map_err(|e| PagePointerError::Session(format!("navigate to {url}: {e}")))
    }

    async fn find(&self, selector: &Selector) -> PagePointerResult<Element> {
        tracing::debug!(%selector, "locating element");
        self.client
            .find(selector.locator())
            .await
            .map_err(|e| classify(e, &format!("find {selector}")))
    }

    async fn close(self) -> PagePointerResult<()> {
        self.client
            .close()
            .await
            .map_err(|e| PagePointerError::Session(format!("close: {e}")))
    }
}

#[async_trait]
impl GeometrySource for WebDriverSession {
    type Handle = Element;

    async fn viewport_info(&self, element: &Element) -> PagePointerResult<ViewportInfo> {
        let arg = serde_json::to_value(element)?;
        let raw = self
            .client
            .execute(VIEWPORT_INFO_JS, vec![arg])
            .await
            .map_err(|e| classify(e, "geometry script"))?;
        tracing::trace!(record = %raw, "geometry record");
        serde_json::from_value(raw)
            .map_err(|e| PagePointerError::GeometryQuery(format!("malformed geometry record: {e}")))
    }
}

fn capabilities(config: &BrowserConfig) -> serde_json::Map<String, serde_json::Value> {
    let mut args = Vec::new();
    let mut caps = serde_json::Map::new();
    match config.kind {
        BrowserKind::Chrome => {
            if config.start_maximized {
                args.push("--start-maximized");
            }
            if config.headless {
                args.push("--headless=new");
            }
            caps.insert("goog:chromeOptions".into(), json!({ "args": args }));
        }
        BrowserKind::Firefox => {
            if config.headless {
                args.push("--headless");
            }
            caps.insert("moz:firefoxOptions".into(), json!({ "args": args }));
        }
    }
    caps
}

/// Missing/stale elements and dead sessions are `ElementUnavailable`;
/// everything else is a failed query.
fn classify(err: CmdError, what: &str) -> PagePointerError {
    let unavailable = match &err {
        CmdError::Lost(_) => true,
        CmdError::Standard(wd) => matches!(
            wd.error,
            ErrorStatus::NoSuchElement
                | ErrorStatus::StaleElementReference
                | ErrorStatus::NoSuchWindow
                | ErrorStatus::InvalidSessionId
        ),
        _ => false,
    };
    if unavailable {
        PagePointerError::ElementUnavailable(format!("{what}: {err}"))
    } else {
        PagePointerError::GeometryQuery(format!("{what}: {err}"))
    }
}
