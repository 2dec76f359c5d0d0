//! Browser-automation seam.
//!
//! The traversal engine only ever talks to these traits; the concrete
//! WebDriver client lives behind [`webdriver::WebDriverBrowser`]. Tests
//! drive the engine with an in-memory fake instead of a real browser.

pub mod webdriver;

use std::fmt;

use async_trait::async_trait;

use crate::error::DriverError;

/// Declarative element selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector.
    Css(String),
    /// Element id.
    Id(String),
    /// XPath expression, relative when resolved within an element.
    XPath(String),
}

impl Selector {
    pub fn css(value: impl Into<String>) -> Self {
        Self::Css(value.into())
    }

    pub fn id(value: impl Into<String>) -> Self {
        Self::Id(value.into())
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Self::XPath(value.into())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(css) => write!(f, "css {css:?}"),
            Self::Id(id) => write!(f, "id {id:?}"),
            Self::XPath(xpath) => write!(f, "xpath {xpath:?}"),
        }
    }
}

/// A handle to a located page element.
///
/// Handles are snapshots of a volatile UI: any operation may fail with
/// [`DriverError::Stale`] if the page re-rendered underneath the handle.
#[async_trait]
pub trait Element: Send + Sync {
    /// Visible text content.
    async fn text(&self) -> Result<String, DriverError>;

    /// Attribute value, `None` if the attribute is absent.
    async fn attr(&self, name: &str) -> Result<Option<String>, DriverError>;

    async fn click(&self) -> Result<(), DriverError>;

    async fn send_keys(&self, text: &str) -> Result<(), DriverError>;

    /// Locate a single descendant. Absence is [`DriverError::NotFound`].
    async fn find(&self, selector: &Selector) -> Result<Box<dyn Element>, DriverError>;

    /// Locate all matching descendants; an empty result is not an error.
    async fn find_all(&self, selector: &Selector) -> Result<Vec<Box<dyn Element>>, DriverError>;
}

/// An authenticated-or-not browser session.
#[async_trait]
pub trait Browser: Send + Sync {
    async fn goto(&self, url: &str) -> Result<(), DriverError>;

    async fn current_url(&self) -> Result<String, DriverError>;

    /// Locate a single element. Absence is [`DriverError::NotFound`],
    /// distinct from transport or session failures.
    async fn find(&self, selector: &Selector) -> Result<Box<dyn Element>, DriverError>;

    /// Locate all matching elements; an empty result is not an error.
    async fn find_all(&self, selector: &Selector) -> Result<Vec<Box<dyn Element>>, DriverError>;

    /// Tear the session down. Idempotent.
    async fn quit(&mut self) -> Result<(), DriverError>;
}
