//! Login page.

use crate::action::Actions;
use crate::config::SuiteConfig;
use crate::locator::Locator;
use crate::result::{VitrinaError, VitrinaResult};
use std::sync::Arc;

/// The storefront login form.
#[derive(Debug)]
pub struct LoginPage {
    actions: Arc<Actions>,
    url: String,
    username_input: Locator,
    password_input: Locator,
    login_button: Locator,
    error_banner: Locator,
}

impl LoginPage {
    /// Bind the login page to the action layer
    #[must_use]
    pub fn new(actions: Arc<Actions>, config: &SuiteConfig) -> Self {
        Self {
            actions,
            url: config.url_for("/"),
            username_input: Locator::css("#user-name"),
            password_input: Locator::css("#password"),
            login_button: Locator::css("#login-button"),
            error_banner: Locator::css("[data-test=\"error\"]"),
        }
    }

    /// Navigate to the login route
    pub async fn open(&self) -> VitrinaResult<()> {
        self.actions.navigate(&self.url).await
    }

    /// Composite verification: the full login form is visible.
    ///
    /// Returns a boolean so callers choose whether to assert; inner wait
    /// failures are converted, not rethrown.
    pub async fn verify_loaded(&self) -> bool {
        self.actions.log().step("Verifying login page is visible");
        if self
            .actions
            .wait_for_visible(&self.login_button)
            .await
            .is_err()
        {
            self.actions.log().fail("Login page did not load");
            return false;
        }

        let username = self.actions.is_visible(&self.username_input).await;
        let password = self.actions.is_visible(&self.password_input).await;
        if username && password {
            self.actions.log().pass("Login page is visible and loaded");
            true
        } else {
            self.actions.log().fail("Login form elements not visible");
            false
        }
    }

    /// Fill credentials and submit.
    ///
    /// Rejects blank credentials up front: a blank fill would "succeed" and
    /// leave the flow failing somewhere far less informative.
    pub async fn login(&self, username: &str, password: &str) -> VitrinaResult<()> {
        if username.trim().is_empty() || password.trim().is_empty() {
            let err = VitrinaError::InvalidInput {
                message: "username/password is missing; check the data source".to_string(),
            };
            self.actions.log().fail(&err.to_string());
            return Err(err);
        }

        self.actions
            .log()
            .step(&format!("Logging in as {username}"));
        self.actions.fill(&self.username_input, username).await?;
        self.actions.fill(&self.password_input, password).await?;
        self.actions.click(&self.login_button).await?;
        self.actions.log().pass("Login submitted");
        Ok(())
    }

    /// Whether the login error banner is showing
    pub async fn has_error(&self) -> bool {
        self.actions.is_visible(&self.error_banner).await
    }

    /// Text of the login error banner
    pub async fn error_message(&self) -> VitrinaResult<String> {
        self.actions.text(&self.error_banner).await
    }
}
