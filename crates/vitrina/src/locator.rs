//! Locator abstraction for element selection.
//!
//! Locators are immutable descriptors, not live handles: resolution happens
//! at action time, inside the browser. Each selector knows how to render
//! itself as a JavaScript query expression for CDP evaluation.
//!
//! Item rows in inventory/cart/overview listings are near-identical, so item
//! reads are always scoped to the container whose name field matches the
//! requested product name exactly (trimmed, full-string equality). Substring
//! matching is deliberately not offered for item lookup: it is ambiguous
//! whenever one product name is a prefix of another.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g. `".shopping_cart_badge"`)
    Css(String),
    /// CSS selector narrowed to the element whose trimmed text equals `text`
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Exact trimmed text content to match
        text: String,
    },
    /// Sub-field of an item row, scoped by the row's exact item name
    Item {
        /// Row container selector (e.g. `".cart_item"`)
        container: String,
        /// Selector of the name element inside the row
        name_field: String,
        /// Exact trimmed item name identifying the row
        name: String,
        /// Selector of the target element inside the row; `None` targets the
        /// row container itself
        target: Option<String>,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a CSS selector with an exact-text filter
    #[must_use]
    pub fn css_with_text(css: impl Into<String>, text: impl Into<String>) -> Self {
        Self::CssWithText {
            css: css.into(),
            text: text.into(),
        }
    }

    /// JavaScript expression selecting the matching item rows.
    ///
    /// Shared by the element and count queries so both see the same rows.
    fn item_rows_expr(container: &str, name_field: &str, name: &str) -> String {
        format!(
            "Array.from(document.querySelectorAll({container:?})).filter(row => {{ \
             const n = row.querySelector({name_field:?}); \
             return n !== null && n.textContent.trim() === {name:?}; }})"
        )
    }

    /// Convert to a JavaScript expression yielding the element or `null`
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::CssWithText { css, text } => format!(
                "(Array.from(document.querySelectorAll({css:?}))\
                 .find(el => el.textContent.trim() === {text:?}) || null)"
            ),
            Self::Item {
                container,
                name_field,
                name,
                target,
            } => {
                let rows = Self::item_rows_expr(container, name_field, name);
                match target {
                    Some(target) => format!(
                        "({rows}.map(row => row.querySelector({target:?}))\
                         .find(el => el !== null) || null)"
                    ),
                    None => format!("({rows}[0] || null)"),
                }
            }
        }
    }

    /// Convert to a JavaScript expression yielding the match count
    #[must_use]
    pub fn to_count_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelectorAll({s:?}).length"),
            Self::CssWithText { css, text } => format!(
                "Array.from(document.querySelectorAll({css:?}))\
                 .filter(el => el.textContent.trim() === {text:?}).length"
            ),
            Self::Item {
                container,
                name_field,
                name,
                target,
            } => {
                let rows = Self::item_rows_expr(container, name_field, name);
                match target {
                    Some(target) => format!(
                        "{rows}.filter(row => row.querySelector({target:?}) !== null).length"
                    ),
                    None => format!("{rows}.length"),
                }
            }
        }
    }

    /// Short human-readable label for logs and diagnostics
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Css(s) => s.clone(),
            Self::CssWithText { css, text } => format!("{css}[text={text:?}]"),
            Self::Item {
                container,
                name_field: _,
                name,
                target,
            } => match target {
                Some(target) => format!("{container}[name={name:?}] {target}"),
                None => format!("{container}[name={name:?}]"),
            },
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// A locator for finding and interacting with elements.
///
/// Carries an optional per-locator wait override; the action layer falls
/// back to the configured default when unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    selector: Selector,
    timeout: Option<Duration>,
}

impl Locator {
    /// Create a new locator from a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            selector: Selector::Css(selector.into()),
            timeout: None,
        }
    }

    /// Create a locator from a selector
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            timeout: None,
        }
    }

    /// Create an item-row locator scoped by exact item name
    #[must_use]
    pub fn item(
        container: impl Into<String>,
        name_field: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::from_selector(Selector::Item {
            container: container.into(),
            name_field: name_field.into(),
            name: name.into(),
            target: None,
        })
    }

    /// Narrow an item-row locator to a sub-field of the row.
    ///
    /// No-op on non-item locators.
    #[must_use]
    pub fn field(self, target: impl Into<String>) -> Self {
        let selector = match self.selector {
            Selector::Item {
                container,
                name_field,
                name,
                ..
            } => Selector::Item {
                container,
                name_field,
                name,
                target: Some(target.into()),
            },
            other => other,
        };
        Self {
            selector,
            timeout: self.timeout,
        }
    }

    /// Set a per-locator wait override
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the wait override, if any
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Short human-readable label for logs and diagnostics
    #[must_use]
    pub fn describe(&self) -> String {
        self.selector.describe()
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}
