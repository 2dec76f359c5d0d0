//! WebDriver-backed implementation of the browser seam.

use async_trait::async_trait;
use thirtyfour::error::{WebDriverError, WebDriverErrorInner};
use thirtyfour::prelude::*;
use thirtyfour::{By, DesiredCapabilities, WebDriver, WebElement};
use tracing::debug;

use crate::config::SweepConfig;
use crate::driver::{Browser, Element, Selector};
use crate::error::DriverError;

/// A live Chrome session behind the [`Browser`] trait.
pub struct WebDriverBrowser {
    driver: Option<WebDriver>,
}

impl WebDriverBrowser {
    /// Start a browser session against the configured WebDriver server.
    ///
    /// Headless with the sandbox disabled, matching how the sweep is run
    /// unattended; the implicit wait is applied up front so every element
    /// lookup tolerates slow rendering without busy-polling.
    pub async fn connect(config: &SweepConfig) -> Result<Self, DriverError> {
        let mut caps = DesiredCapabilities::chrome();
        if config.headless {
            caps.set_headless().map_err(map_err)?;
        }
        caps.add_arg("--no-sandbox").map_err(map_err)?;
        caps.add_arg("--disable-dev-shm-usage").map_err(map_err)?;

        let driver = WebDriver::new(&config.webdriver_url, caps)
            .await
            .map_err(map_err)?;
        driver
            .set_implicit_wait_timeout(config.implicit_wait)
            .await
            .map_err(map_err)?;

        debug!(server = %config.webdriver_url, "WebDriver session established");
        Ok(Self {
            driver: Some(driver),
        })
    }

    fn driver(&self) -> Result<&WebDriver, DriverError> {
        self.driver
            .as_ref()
            .ok_or_else(|| DriverError::Other("session already quit".to_string()))
    }
}

#[async_trait]
impl Browser for WebDriverBrowser {
    async fn goto(&self, url: &str) -> Result<(), DriverError> {
        self.driver()?.goto(url).await.map_err(map_err)
    }

    async fn current_url(&self) -> Result<String, DriverError> {
        Ok(self.driver()?.current_url().await.map_err(map_err)?.to_string())
    }

    async fn find(&self, selector: &Selector) -> Result<Box<dyn Element>, DriverError> {
        let element = self
            .driver()?
            .find(to_by(selector))
            .await
            .map_err(|e| map_find_err(selector, e))?;
        Ok(Box::new(WebDriverElement { inner: element }))
    }

    async fn find_all(&self, selector: &Selector) -> Result<Vec<Box<dyn Element>>, DriverError> {
        let elements = self
            .driver()?
            .find_all(to_by(selector))
            .await
            .map_err(map_err)?;
        Ok(elements
            .into_iter()
            .map(|inner| Box::new(WebDriverElement { inner }) as Box<dyn Element>)
            .collect())
    }

    async fn quit(&mut self) -> Result<(), DriverError> {
        if let Some(driver) = self.driver.take() {
            driver.quit().await.map_err(map_err)?;
        }
        Ok(())
    }
}

struct WebDriverElement {
    inner: WebElement,
}

#[async_trait]
impl Element for WebDriverElement {
    async fn text(&self) -> Result<String, DriverError> {
        self.inner.text().await.map_err(map_err)
    }

    async fn attr(&self, name: &str) -> Result<Option<String>, DriverError> {
        self.inner.attr(name).await.map_err(map_err)
    }

    async fn click(&self) -> Result<(), DriverError> {
        self.inner.click().await.map_err(map_err)
    }

    async fn send_keys(&self, text: &str) -> Result<(), DriverError> {
        self.inner.send_keys(text).await.map_err(map_err)
    }

    async fn find(&self, selector: &Selector) -> Result<Box<dyn Element>, DriverError> {
        let element = self
            .inner
            .find(to_by(selector))
            .await
            .map_err(|e| map_find_err(selector, e))?;
        Ok(Box::new(WebDriverElement { inner: element }))
    }

    async fn find_all(&self, selector: &Selector) -> Result<Vec<Box<dyn Element>>, DriverError> {
        let elements = self
            .inner
            .find_all(to_by(selector))
            .await
            .map_err(map_err)?;
        Ok(elements
            .into_iter()
            .map(|inner| Box::new(WebDriverElement { inner }) as Box<dyn Element>)
            .collect())
    }
}

fn to_by(selector: &Selector) -> By {
    match selector {
        Selector::Css(css) => By::Css(css.clone()),
        Selector::Id(id) => By::Id(id.clone()),
        Selector::XPath(xpath) => By::XPath(xpath.clone()),
    }
}

fn map_err(e: WebDriverError) -> DriverError {
    match &*e {
        WebDriverErrorInner::NoSuchElement(_) => DriverError::NotFound {
            selector: e.to_string(),
        },
        WebDriverErrorInner::StaleElementReference(_) => DriverError::Stale(e.to_string()),
        WebDriverErrorInner::SessionNotCreated(_) => DriverError::SessionNotCreated(e.to_string()),
        _ => DriverError::Other(e.to_string()),
    }
}

/// Like [`map_err`], but a missing element is reported under the selector
/// that was being resolved.
fn map_find_err(selector: &Selector, e: WebDriverError) -> DriverError {
    match &*e {
        WebDriverErrorInner::NoSuchElement(_) => DriverError::NotFound {
            selector: selector.to_string(),
        },
        _ => map_err(e),
    }
}
