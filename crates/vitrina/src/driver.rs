//! Abstract browser capability.
//!
//! The action layer talks to the browser only through the [`UiDriver`]
//! trait, so the resilience semantics can be tested against a scripted
//! in-memory driver and the real CDP implementation can be swapped without
//! touching the page abstractions.

use crate::locator::Locator;
use crate::result::{VitrinaError, VitrinaResult};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Abstract driver trait for browser automation.
///
/// Every method is a single raw capability call with no waiting, logging, or
/// snapshot behavior — resilience lives one layer up, in
/// [`crate::action::Actions`].
///
/// # Implementations
///
/// - `ChromiumDriver` — CDP via chromiumoxide (requires the `browser` feature)
/// - [`MockDriver`] — scriptable state for unit tests
#[async_trait]
pub trait UiDriver: Send + Sync {
    /// Load a URL in the page
    async fn navigate(&self, url: &str) -> VitrinaResult<()>;

    /// Get the page's current location
    async fn current_url(&self) -> VitrinaResult<String>;

    /// Count elements matching the locator
    async fn query_count(&self, locator: &Locator) -> VitrinaResult<usize>;

    /// Check whether the located element is rendered visible
    async fn is_visible(&self, locator: &Locator) -> VitrinaResult<bool>;

    /// Check whether the located element accepts interaction
    async fn is_enabled(&self, locator: &Locator) -> VitrinaResult<bool>;

    /// Read the element's text content; `None` when zero elements match
    async fn text_content(&self, locator: &Locator) -> VitrinaResult<Option<String>>;

    /// Click the located element
    async fn click(&self, locator: &Locator) -> VitrinaResult<()>;

    /// Replace the located element's value with `text`
    async fn fill(&self, locator: &Locator, text: &str) -> VitrinaResult<()>;

    /// Capture a full-page screenshot as PNG bytes
    async fn screenshot(&self) -> VitrinaResult<Vec<u8>>;

    /// Close the underlying session
    async fn close(&self) -> VitrinaResult<()>;
}

#[derive(Debug, Default)]
struct MockState {
    current_url: String,
    visible: HashSet<String>,
    disabled: HashSet<String>,
    texts: HashMap<String, String>,
    fills: HashMap<String, String>,
    reject_clicks: HashSet<String>,
    fail_queries: bool,
    screenshot_data: Option<Vec<u8>>,
    fail_screenshot: bool,
    call_history: Vec<String>,
}

/// Scriptable driver for unit tests.
///
/// Elements are keyed by [`Locator::describe`]. An element is invisible
/// until marked visible and enabled unless marked disabled; text reads
/// resolve against the scripted text map.
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create a new mock driver with no scripted elements
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an element visible
    pub fn show(&self, key: &str) {
        let mut state = self.state.lock().unwrap();
        state.visible.insert(key.to_string());
    }

    /// Mark an element invisible again
    pub fn hide(&self, key: &str) {
        let mut state = self.state.lock().unwrap();
        state.visible.remove(key);
    }

    /// Mark an element as refusing interaction
    pub fn disable(&self, key: &str) {
        let mut state = self.state.lock().unwrap();
        state.disabled.insert(key.to_string());
    }

    /// Script an element's text content (and make it resolvable)
    pub fn set_text(&self, key: &str, text: &str) {
        let mut state = self.state.lock().unwrap();
        state.texts.insert(key.to_string(), text.to_string());
    }

    /// Remove an element's text so reads resolve to zero elements
    pub fn clear_text(&self, key: &str) {
        let mut state = self.state.lock().unwrap();
        state.texts.remove(key);
    }

    /// Make clicks on an element fail
    pub fn reject_clicks(&self, key: &str) {
        let mut state = self.state.lock().unwrap();
        state.reject_clicks.insert(key.to_string());
    }

    /// Make every element query fail at the driver level
    pub fn fail_queries(&self, fail: bool) {
        let mut state = self.state.lock().unwrap();
        state.fail_queries = fail;
    }

    /// Script the screenshot payload
    pub fn set_screenshot(&self, data: Vec<u8>) {
        let mut state = self.state.lock().unwrap();
        state.screenshot_data = Some(data);
    }

    /// Make screenshot capture fail
    pub fn fail_screenshot(&self, fail: bool) {
        let mut state = self.state.lock().unwrap();
        state.fail_screenshot = fail;
    }

    /// Get the recorded value of the last fill on an element
    #[must_use]
    pub fn filled_value(&self, key: &str) -> Option<String> {
        self.state.lock().unwrap().fills.get(key).cloned()
    }

    /// Get the recorded call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state.lock().unwrap().call_history.clone()
    }

    /// Check whether a call with the given prefix was recorded
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .call_history
            .iter()
            .any(|c| c.starts_with(prefix))
    }

    /// Count calls with the given prefix
    #[must_use]
    pub fn call_count(&self, prefix: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .call_history
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn guard_queries(state: &MockState) -> VitrinaResult<()> {
        if state.fail_queries {
            return Err(VitrinaError::Driver {
                message: "scripted query failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UiDriver for MockDriver {
    async fn navigate(&self, url: &str) -> VitrinaResult<()> {
        let mut state = self.state.lock().unwrap();
        state.call_history.push(format!("navigate:{url}"));
        state.current_url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> VitrinaResult<String> {
        Ok(self.state.lock().unwrap().current_url.clone())
    }

    async fn query_count(&self, locator: &Locator) -> VitrinaResult<usize> {
        let state = self.state.lock().unwrap();
        Self::guard_queries(&state)?;
        let key = locator.describe();
        if state.texts.contains_key(&key) || state.visible.contains(&key) {
            Ok(1)
        } else {
            Ok(0)
        }
    }

    async fn is_visible(&self, locator: &Locator) -> VitrinaResult<bool> {
        let state = self.state.lock().unwrap();
        Self::guard_queries(&state)?;
        Ok(state.visible.contains(&locator.describe()))
    }

    async fn is_enabled(&self, locator: &Locator) -> VitrinaResult<bool> {
        let state = self.state.lock().unwrap();
        Self::guard_queries(&state)?;
        Ok(!state.disabled.contains(&locator.describe()))
    }

    async fn text_content(&self, locator: &Locator) -> VitrinaResult<Option<String>> {
        let state = self.state.lock().unwrap();
        Self::guard_queries(&state)?;
        Ok(state.texts.get(&locator.describe()).cloned())
    }

    async fn click(&self, locator: &Locator) -> VitrinaResult<()> {
        let key = locator.describe();
        let mut state = self.state.lock().unwrap();
        state.call_history.push(format!("click:{key}"));
        if state.reject_clicks.contains(&key) {
            return Err(VitrinaError::Driver {
                message: format!("scripted click rejection on {key}"),
            });
        }
        Ok(())
    }

    async fn fill(&self, locator: &Locator, text: &str) -> VitrinaResult<()> {
        let key = locator.describe();
        let mut state = self.state.lock().unwrap();
        state.call_history.push(format!("fill:{key}={text}"));
        state.fills.insert(key, text.to_string());
        Ok(())
    }

    async fn screenshot(&self) -> VitrinaResult<Vec<u8>> {
        let mut state = self.state.lock().unwrap();
        state.call_history.push("screenshot".to_string());
        if state.fail_screenshot {
            return Err(VitrinaError::Driver {
                message: "scripted screenshot failure".to_string(),
            });
        }
        Ok(state.screenshot_data.clone().unwrap_or_default())
    }

    async fn close(&self) -> VitrinaResult<()> {
        let mut state = self.state.lock().unwrap();
        state.call_history.push("close".to_string());
        Ok(())
    }
}
