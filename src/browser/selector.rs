use std::fmt;
use std::str::FromStr;

use fantoccini::Locator;
use serde::{Deserialize, Serialize};

use crate::errors::PagePointerError;

/// How to find the target element on the page.
///
/// Written as `strategy:value` (e.g. `css:#login > button`); a bare value
/// is a tag name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Selector {
    TagName(String),
    Css(String),
    Id(String),
    XPath(String),
    LinkText(String),
}

impl Selector {
    /// WebDriver has no tag-name strategy; a tag is a valid CSS selector.
    pub fn locator(&self) -> Locator<'_> {
        match self {
            Selector::TagName(v) | Selector::Css(v) => Locator::Css(v),
            Selector::Id(v) => Locator::Id(v),
            Selector::XPath(v) => Locator::XPath(v),
            Selector::LinkText(v) => Locator::LinkText(v),
        }
    }
}

impl Default for Selector {
    fn default() -> Self {
        Selector::TagName("h1".into())
    }
}

impl FromStr for Selector {
    type Err = PagePointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (strategy, value) = match s.split_once(':') {
            Some((strategy, value)) if is_strategy(strategy) => (strategy, value.trim()),
            _ => ("tag", s),
        };
        if value.is_empty() {
            return Err(PagePointerError::Config(format!("empty selector: {s:?}")));
        }
        let value = value.to_string();
        Ok(match strategy.to_ascii_lowercase().as_str() {
            "css" => Selector::Css(value),
            "id" => Selector::Id(value),
            "xpath" => Selector::XPath(value),
            "link" => Selector::LinkText(value),
            _ => Selector::TagName(value),
        })
    }
}

// Anything else before a ':' (e.g. `a:hover`) is part of the value.
fn is_strategy(prefix: &str) -> bool {
    matches!(
        prefix.to_ascii_lowercase().as_str(),
        "tag" | "css" | "id" | "xpath" | "link"
    )
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::TagName(v) => write!(f, "tag:{v}"),
            Selector::Css(v) => write!(f, "css:{v}"),
            Selector::Id(v) => write!(f, "id:{v}"),
            Selector::XPath(v) => write!(f, "xpath:{v}"),
            Selector::LinkText(v) => write!(f, "link:{v}"),
        }
    }
}

impl TryFrom<String> for Selector {
    type Error = PagePointerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.to_string()
    }
}
