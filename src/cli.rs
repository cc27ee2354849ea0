use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;
use crate::errors::PagePointerResult;

/// Move the real mouse cursor onto an element of a web page.
#[derive(Debug, Default, Parser)]
#[command(name = "pagepointer", version, about)]
pub struct Cli {
    /// Path to config.toml (default: next to the executable, then the working directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Page to open
    #[arg(long)]
    pub url: Option<String>,

    /// Element to target: `tag:h1`, `css:...`, `id:...`, `xpath:...`, `link:...`
    #[arg(long)]
    pub selector: Option<String>,

    /// WebDriver endpoint
    #[arg(long)]
    pub webdriver: Option<String>,

    /// Glide duration in milliseconds (0 = jump)
    #[arg(long)]
    pub duration_ms: Option<u64>,

    /// Circle around the element after arriving
    #[arg(long)]
    pub hover: bool,

    #[arg(long)]
    pub no_hover: bool,

    /// Log device pixel ratio and final coordinates
    #[arg(long)]
    pub debug: bool,

    #[arg(long)]
    pub headless: bool,
}

impl Cli {
    /// Flags win over both the file and the environment.
    pub fn apply(&self, config: &mut AppConfig) -> PagePointerResult<()> {
        if let Some(url) = &self.url {
            config.target.url.clone_from(url);
        }
        if let Some(selector) = &self.selector {
            config.target.selector = selector.parse()?;
        }
        if let Some(webdriver) = &self.webdriver {
            config.browser.webdriver_url.clone_from(webdriver);
        }
        if let Some(ms) = self.duration_ms {
            config.pointer.duration_ms = ms;
        }
        if self.hover {
            config.hover.enabled = true;
        }
        if self.no_hover {
            config.hover.enabled = false;
        }
        config.debug |= self.debug;
        config.browser.headless |= self.headless;
        Ok(())
    }
}
