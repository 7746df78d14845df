//! Real browser control via the Chrome DevTools Protocol.
//!
//! Compiled only with the `browser` feature. All element work goes through
//! JavaScript evaluation of the locator-generated queries, which is the only
//! way to honor text-scoped and row-scoped selectors uniformly.

use crate::config::SuiteConfig;
use crate::driver::UiDriver;
use crate::locator::Locator;
use crate::result::{VitrinaError, VitrinaResult};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams,
};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::Mutex;

fn driver_error(e: impl std::fmt::Display) -> VitrinaError {
    VitrinaError::Driver {
        message: e.to_string(),
    }
}

/// JS expression: is the located element rendered visible?
fn visibility_script(locator: &Locator) -> String {
    format!(
        "(() => {{ const el = {query}; if (el === null) return false; \
         const r = el.getBoundingClientRect(); \
         const s = window.getComputedStyle(el); \
         return r.width > 0 && r.height > 0 && s.visibility !== 'hidden' && s.display !== 'none'; }})()",
        query = locator.selector().to_query()
    )
}

/// JS expression: does the located element accept interaction?
fn enabled_script(locator: &Locator) -> String {
    format!(
        "(() => {{ const el = {query}; return el !== null && !el.disabled; }})()",
        query = locator.selector().to_query()
    )
}

/// JS expression: text content, or null when nothing matched
fn text_script(locator: &Locator) -> String {
    format!(
        "(() => {{ const el = {query}; return el === null ? null : el.textContent; }})()",
        query = locator.selector().to_query()
    )
}

/// JS expression: click the element; false when nothing matched
fn click_script(locator: &Locator) -> String {
    format!(
        "(() => {{ const el = {query}; if (el === null) return false; el.click(); return true; }})()",
        query = locator.selector().to_query()
    )
}

/// JS expression: replace the element's value and notify the framework.
///
/// The value is written through the native prototype setter so controlled
/// inputs (React) observe the change.
fn fill_script(locator: &Locator, text: &str) -> String {
    format!(
        "(() => {{ const el = {query}; if (el === null) return false; \
         const proto = el instanceof HTMLTextAreaElement \
             ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype; \
         Object.getOwnPropertyDescriptor(proto, 'value').set.call(el, {text:?}); \
         el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
         el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
         return true; }})()",
        query = locator.selector().to_query()
    )
}

/// CDP-backed driver owning one browser and one page.
#[derive(Debug)]
pub struct ChromiumDriver {
    browser: Arc<Mutex<CdpBrowser>>,
    page: Arc<Mutex<CdpPage>>,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
}

impl ChromiumDriver {
    /// Launch a browser and open a blank page.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser cannot be launched or the page
    /// cannot be created.
    pub async fn launch(config: &SuiteConfig) -> VitrinaResult<Self> {
        let mut builder = CdpConfig::builder();
        if !config.headless {
            builder = builder.with_head();
        }
        let cdp_config = builder.build().map_err(driver_error)?;

        let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(driver_error)?;

        // Drive the CDP message stream for the browser's lifetime
        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await.map_err(driver_error)?;

        Ok(Self {
            browser: Arc::new(Mutex::new(browser)),
            page: Arc::new(Mutex::new(page)),
            handle,
        })
    }

    async fn eval<T: serde::de::DeserializeOwned>(&self, expr: String) -> VitrinaResult<T> {
        let page = self.page.lock().await;
        let result = page.evaluate(expr).await.map_err(driver_error)?;
        result.into_value().map_err(driver_error)
    }
}

#[async_trait]
impl UiDriver for ChromiumDriver {
    async fn navigate(&self, url: &str) -> VitrinaResult<()> {
        let page = self.page.lock().await;
        page.goto(url).await.map_err(driver_error)?;
        Ok(())
    }

    async fn current_url(&self) -> VitrinaResult<String> {
        self.eval("window.location.href".to_string()).await
    }

    async fn query_count(&self, locator: &Locator) -> VitrinaResult<usize> {
        let count: u64 = self.eval(locator.selector().to_count_query()).await?;
        Ok(count as usize)
    }

    async fn is_visible(&self, locator: &Locator) -> VitrinaResult<bool> {
        self.eval(visibility_script(locator)).await
    }

    async fn is_enabled(&self, locator: &Locator) -> VitrinaResult<bool> {
        self.eval(enabled_script(locator)).await
    }

    async fn text_content(&self, locator: &Locator) -> VitrinaResult<Option<String>> {
        self.eval(text_script(locator)).await
    }

    async fn click(&self, locator: &Locator) -> VitrinaResult<()> {
        let clicked: bool = self.eval(click_script(locator)).await?;
        if clicked {
            Ok(())
        } else {
            Err(VitrinaError::Driver {
                message: format!("no element matched {locator} at click time"),
            })
        }
    }

    async fn fill(&self, locator: &Locator, text: &str) -> VitrinaResult<()> {
        let filled: bool = self.eval(fill_script(locator, text)).await?;
        if filled {
            Ok(())
        } else {
            Err(VitrinaError::Driver {
                message: format!("no element matched {locator} at fill time"),
            })
        }
    }

    async fn screenshot(&self) -> VitrinaResult<Vec<u8>> {
        let page = self.page.lock().await;
        let params = CaptureScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();
        let screenshot = page.execute(params).await.map_err(driver_error)?;

        use base64::Engine;
        base64::engine::general_purpose::STANDARD
            .decode(&screenshot.data)
            .map_err(driver_error)
    }

    async fn close(&self) -> VitrinaResult<()> {
        let mut browser = self.browser.lock().await;
        browser.close().await.map_err(driver_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_script_shape() {
        let script = visibility_script(&Locator::css(".title"));
        assert!(script.contains("getBoundingClientRect"));
        assert!(script.contains("getComputedStyle"));
        assert!(script.contains(".title"));
    }

    #[test]
    fn test_click_script_guards_null() {
        let script = click_script(&Locator::css("#checkout"));
        assert!(script.contains("if (el === null) return false"));
        assert!(script.contains("el.click()"));
    }

    #[test]
    fn test_fill_script_dispatches_framework_events() {
        let script = fill_script(&Locator::css("#user-name"), "standard_user");
        assert!(script.contains("standard_user"));
        assert!(script.contains("new Event('input'"));
        assert!(script.contains("new Event('change'"));
        assert!(script.contains("getOwnPropertyDescriptor"));
    }

    #[test]
    fn test_fill_script_escapes_text() {
        let script = fill_script(&Locator::css("#first-name"), "O\"Brien");
        assert!(script.contains("O\\\"Brien"));
    }
}
