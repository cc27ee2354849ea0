use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::browser::selector::Selector;
use crate::errors::{PagePointerError, PagePointerResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log the device pixel ratio and final coordinates of every mapping.
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub pointer: PointerConfig,
    #[serde(default)]
    pub hover: HoverConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserKind {
    #[default]
    Chrome,
    Firefox,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// chromedriver listens on 9515, geckodriver on 4444.
    pub webdriver_url: String,
    pub kind: BrowserKind,
    pub start_maximized: bool,
    /// Headless windows have no screen position; only useful for smoke runs.
    pub headless: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".into(),
            kind: BrowserKind::Chrome,
            start_maximized: true,
            headless: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub url: String,
    pub selector: Selector,
    /// Fixed wait after navigation before the element is looked up.
    pub settle_ms: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: "https://example.com".into(),
            selector: Selector::default(),
            settle_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// 0 jumps straight to the target.
    pub duration_ms: u64,
    pub glide_steps: u32,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            duration_ms: 600,
            glide_steps: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    pub enabled: bool,
    /// Physical pixels.
    pub radius: f64,
    pub loops: u32,
    pub steps_per_loop: u32,
    pub loop_ms: u64,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 12.0,
            loops: 2,
            steps_per_loop: 24,
            loop_ms: 400,
        }
    }
}

impl AppConfig {
    /// `PAGEPOINTER_URL`, `PAGEPOINTER_SELECTOR` and `PAGEPOINTER_WEBDRIVER`
    /// take precedence over the file.
    pub fn apply_env(&mut self) -> PagePointerResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> PagePointerResult<()> {
        if let Some(url) = lookup("PAGEPOINTER_URL") {
            self.target.url = url;
        }
        if let Some(selector) = lookup("PAGEPOINTER_SELECTOR") {
            self.target.selector = selector.parse()?;
        }
        if let Some(webdriver) = lookup("PAGEPOINTER_WEBDRIVER") {
            self.browser.webdriver_url = webdriver;
        }
        Ok(())
    }
}

fn resolve_config_path() -> PagePointerResult<PathBuf> {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            let candidate = parent.join("config.toml");
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "config found next to executable");
                return Ok(candidate);
            }
        }
    }

    let cwd = std::env::current_dir()?;
    let candidate = cwd.join("config.toml");
    if candidate.exists() {
        tracing::debug!(path = %candidate.display(), "config found in working directory");
        return Ok(candidate);
    }

    Err(PagePointerError::Config(
        "config.toml not found next to executable or in working directory".into(),
    ))
}

/// Reads `path` if given, otherwise the first `config.toml` found.
pub fn load_config(path: Option<&Path>) -> PagePointerResult<AppConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => resolve_config_path()?,
    };
    let content = std::fs::read_to_string(&path)?;
    let config = parse_config(&content)?;
    tracing::info!(path = %path.display(), url = %config.target.url, "config loaded");
    Ok(config)
}

pub fn parse_config(content: &str) -> PagePointerResult<AppConfig> {
    Ok(toml::from_str(content)?)
}
