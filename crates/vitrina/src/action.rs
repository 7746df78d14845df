//! Resilient UI action layer.
//!
//! [`Actions`] wraps every primitive interaction with bounded waiting,
//! verification logging, and failure-time diagnostics. The failure sequence
//! is invariant: log the failure event, capture a best-effort snapshot of
//! the page as it was at failure time, then propagate the error. The log
//! entry exists even when the snapshot itself fails.
//!
//! Visibility checks are the one deliberate exception: they are queries,
//! not assertions, and degrade to `false` with a warning instead of
//! aborting the flow.

use crate::config::SuiteConfig;
use crate::driver::UiDriver;
use crate::locator::Locator;
use crate::logger::VerificationLog;
use crate::result::{VitrinaError, VitrinaResult};
use crate::snapshot::SnapshotSink;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
enum ReadyState {
    Visible,
    Actionable,
}

/// One UI interaction at a time, with bounded waiting and guaranteed
/// diagnostic capture on failure.
///
/// Page abstractions hold an `Arc<Actions>` and build their composite
/// operations from these primitives; they never reach the driver directly.
pub struct Actions {
    driver: Arc<dyn UiDriver>,
    log: Arc<dyn VerificationLog>,
    snapshots: SnapshotSink,
    wait_timeout: Duration,
    navigation_timeout: Duration,
    poll_interval: Duration,
}

impl std::fmt::Debug for Actions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actions")
            .field("snapshots", &self.snapshots)
            .field("wait_timeout", &self.wait_timeout)
            .field("navigation_timeout", &self.navigation_timeout)
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

impl Actions {
    /// Create the action layer over a driver and logger
    #[must_use]
    pub fn new(
        driver: Arc<dyn UiDriver>,
        log: Arc<dyn VerificationLog>,
        config: &SuiteConfig,
    ) -> Self {
        let snapshots = if config.capture_snapshots {
            SnapshotSink::new(config.snapshot_dir.clone())
        } else {
            SnapshotSink::disabled()
        };
        Self {
            driver,
            log,
            snapshots,
            wait_timeout: config.wait_timeout(),
            navigation_timeout: config.navigation_timeout(),
            poll_interval: config.poll_interval(),
        }
    }

    /// The verification logger, for composite operations layered above
    #[must_use]
    pub fn log(&self) -> &dyn VerificationLog {
        self.log.as_ref()
    }

    /// A shareable handle to the verification logger
    #[must_use]
    pub fn log_handle(&self) -> Arc<dyn VerificationLog> {
        self.log.clone()
    }

    /// Load a URL, bounded by the navigation timeout
    pub async fn navigate(&self, url: &str) -> VitrinaResult<()> {
        self.log.step(&format!("Navigating to {url}"));
        let settled = tokio::time::timeout(self.navigation_timeout, self.driver.navigate(url)).await;
        match settled {
            Ok(Ok(())) => {
                self.log.pass(&format!("Navigated to {url}"));
                Ok(())
            }
            Ok(Err(e)) => {
                let err = VitrinaError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                };
                Err(self.fail_with_snapshot("navigation-error", err).await)
            }
            Err(_) => {
                let err = VitrinaError::Navigation {
                    url: url.to_string(),
                    message: format!(
                        "load did not settle within {}ms",
                        self.navigation_timeout.as_millis()
                    ),
                };
                Err(self.fail_with_snapshot("navigation-error", err).await)
            }
        }
    }

    /// Wait for actionability, then click
    pub async fn click(&self, locator: &Locator) -> VitrinaResult<()> {
        self.log.step(&format!("Clicking {locator}"));
        let timeout = locator.timeout().unwrap_or(self.wait_timeout);

        match self.await_ready(locator, ReadyState::Actionable, timeout).await {
            Ok(true) => {}
            Ok(false) => {
                let err = self.interaction_error(
                    locator,
                    "click",
                    format!("element not clickable within {}ms", timeout.as_millis()),
                );
                return Err(self.fail_with_snapshot("click-error", err).await);
            }
            Err(e) => {
                let err = self.interaction_error(locator, "click", e.to_string());
                return Err(self.fail_with_snapshot("click-error", err).await);
            }
        }

        match self.driver.click(locator).await {
            Ok(()) => {
                self.log.pass(&format!("Clicked {locator}"));
                Ok(())
            }
            Err(e) => {
                let err = self.interaction_error(locator, "click", e.to_string());
                Err(self.fail_with_snapshot("click-error", err).await)
            }
        }
    }

    /// Wait for editability, then replace the element's value
    pub async fn fill(&self, locator: &Locator, text: &str) -> VitrinaResult<()> {
        self.log.step(&format!("Filling {locator} with: {text}"));
        let timeout = locator.timeout().unwrap_or(self.wait_timeout);

        match self.await_ready(locator, ReadyState::Actionable, timeout).await {
            Ok(true) => {}
            Ok(false) => {
                let err = self.interaction_error(
                    locator,
                    "fill",
                    format!("element not editable within {}ms", timeout.as_millis()),
                );
                return Err(self.fail_with_snapshot("fill-error", err).await);
            }
            Err(e) => {
                let err = self.interaction_error(locator, "fill", e.to_string());
                return Err(self.fail_with_snapshot("fill-error", err).await);
            }
        }

        match self.driver.fill(locator, text).await {
            Ok(()) => {
                self.log.pass(&format!("Filled {locator}"));
                Ok(())
            }
            Err(e) => {
                let err = self.interaction_error(locator, "fill", e.to_string());
                Err(self.fail_with_snapshot("fill-error", err).await)
            }
        }
    }

    /// Wait until the element is visible, bounded by the default timeout
    pub async fn wait_for_visible(&self, locator: &Locator) -> VitrinaResult<()> {
        let timeout = locator.timeout().unwrap_or(self.wait_timeout);
        self.wait_for_visible_within(locator, timeout).await
    }

    /// Wait until the element is visible, bounded by an explicit timeout
    pub async fn wait_for_visible_within(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> VitrinaResult<()> {
        self.log.step(&format!("Waiting for {locator}"));

        match self.await_ready(locator, ReadyState::Visible, timeout).await {
            Ok(true) => {
                self.log.pass(&format!("Element visible: {locator}"));
                Ok(())
            }
            Ok(false) => {
                let err = VitrinaError::Timeout {
                    selector: locator.describe(),
                    ms: timeout.as_millis() as u64,
                };
                Err(self.fail_with_snapshot("element-wait-error", err).await)
            }
            Err(e) => Err(self.fail_with_snapshot("element-wait-error", e).await),
        }
    }

    /// Read trimmed text content; fails when zero elements resolve
    pub async fn text(&self, locator: &Locator) -> VitrinaResult<String> {
        self.log.step(&format!("Reading text from {locator}"));
        match self.driver.text_content(locator).await {
            Ok(Some(text)) => {
                let text = text.trim().to_string();
                self.log.pass(&format!("Text retrieved from {locator}: {text}"));
                Ok(text)
            }
            Ok(None) => {
                let err = VitrinaError::NotFound {
                    selector: locator.describe(),
                };
                Err(self.fail_with_snapshot("text-error", err).await)
            }
            Err(e) => Err(self.fail_with_snapshot("text-error", e).await),
        }
    }

    /// Visibility query: never fails, degrades to `false` with a warning
    pub async fn is_visible(&self, locator: &Locator) -> bool {
        match self.driver.is_visible(locator).await {
            Ok(visible) => {
                self.log
                    .info(&format!("Element {locator} visible: {visible}"));
                visible
            }
            Err(e) => {
                self.log
                    .warn(&format!("Visibility check failed for {locator}: {e}"));
                false
            }
        }
    }

    /// Count query: never fails, degrades to `0` with a warning
    pub async fn count(&self, locator: &Locator) -> usize {
        match self.driver.query_count(locator).await {
            Ok(count) => count,
            Err(e) => {
                self.log
                    .warn(&format!("Count query failed for {locator}: {e}"));
                0
            }
        }
    }

    /// The page's current location.
    ///
    /// A query, not an assertion: driver failure degrades to `None` with a
    /// warning so route predicates never abort a flow.
    pub async fn current_url(&self) -> Option<String> {
        match self.driver.current_url().await {
            Ok(url) => {
                self.log.info(&format!("Current URL: {url}"));
                Some(url)
            }
            Err(e) => {
                self.log.warn(&format!("Could not read current URL: {e}"));
                None
            }
        }
    }

    /// Best-effort diagnostic snapshot.
    ///
    /// Returns the artifact path when one was written. Capture or write
    /// failures are logged as warnings and never propagated: diagnostics
    /// must not mask the failure being diagnosed.
    pub async fn capture_snapshot(&self, label: &str) -> Option<PathBuf> {
        if !self.snapshots.is_enabled() {
            return None;
        }
        let data = match self.driver.screenshot().await {
            Ok(data) => data,
            Err(e) => {
                self.log.warn(&format!("Failed to capture snapshot: {e}"));
                return None;
            }
        };
        match self.snapshots.write(label, &data).await {
            Ok(path) => {
                self.log
                    .info(&format!("Snapshot saved: {}", path.display()));
                Some(path)
            }
            Err(e) => {
                self.log.warn(&format!("Failed to save snapshot: {e}"));
                None
            }
        }
    }

    /// Close the underlying session
    pub async fn close(&self) -> VitrinaResult<()> {
        self.driver.close().await
    }

    /// Failure log entry, then best-effort snapshot, then hand the error
    /// back for propagation. Order must not change.
    async fn fail_with_snapshot(&self, label: &str, err: VitrinaError) -> VitrinaError {
        self.log.fail(&err.to_string());
        let _ = self.capture_snapshot(label).await;
        err
    }

    fn interaction_error(
        &self,
        locator: &Locator,
        operation: &str,
        message: String,
    ) -> VitrinaError {
        VitrinaError::Interaction {
            selector: locator.describe(),
            operation: operation.to_string(),
            message,
        }
    }

    async fn await_ready(
        &self,
        locator: &Locator,
        state: ReadyState,
        timeout: Duration,
    ) -> VitrinaResult<bool> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let ready = match state {
                ReadyState::Visible => self.driver.is_visible(locator).await?,
                ReadyState::Actionable => {
                    self.driver.is_visible(locator).await?
                        && self.driver.is_enabled(locator).await?
                }
            };
            if ready {
                return Ok(true);
            }
            if tokio::time::Instant::now() >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
