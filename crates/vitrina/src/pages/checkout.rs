//! Checkout flow pages: information entry, order overview, completion.

use super::{read_item_details, ItemDetails, CART_ITEM, TITLE};
use crate::action::Actions;
use crate::locator::Locator;
use crate::price::{parse_price, OrderSummary, Reconciler};
use crate::result::{VitrinaError, VitrinaResult};
use std::sync::Arc;

const INFO_ROUTE: &str = "/checkout-step-one.html";
const OVERVIEW_ROUTE: &str = "/checkout-step-two.html";
const COMPLETE_ROUTE: &str = "/checkout-complete.html";

/// Confirmation banner text shown on a completed order
pub const ORDER_CONFIRMATION: &str = "Thank you for your order!";

/// Checkout step one: buyer information form.
#[derive(Debug)]
pub struct CheckoutInfoPage {
    actions: Arc<Actions>,
    title: Locator,
    info_form: Locator,
    first_name_input: Locator,
    last_name_input: Locator,
    postal_code_input: Locator,
    continue_button: Locator,
    cancel_button: Locator,
}

impl CheckoutInfoPage {
    /// Bind the information form to the action layer
    #[must_use]
    pub fn new(actions: Arc<Actions>) -> Self {
        Self {
            actions,
            title: Locator::css(TITLE),
            info_form: Locator::css("#checkout_info_container"),
            first_name_input: Locator::css("#first-name"),
            last_name_input: Locator::css("#last-name"),
            postal_code_input: Locator::css("#postal-code"),
            continue_button: Locator::css("#continue"),
            cancel_button: Locator::css("#cancel"),
        }
    }

    /// State predicate: the current location is the information route
    pub async fn is_on(&self) -> bool {
        match self.actions.current_url().await {
            Some(url) => url.contains(INFO_ROUTE),
            None => false,
        }
    }

    /// Composite verification: information form is visible
    pub async fn verify_loaded(&self) -> bool {
        self.actions
            .log()
            .step("Verifying checkout information page is visible");
        if self.actions.wait_for_visible(&self.info_form).await.is_err() {
            self.actions
                .log()
                .fail("Checkout information page did not load");
            return false;
        }

        if self.actions.is_visible(&self.title).await {
            self.actions
                .log()
                .pass("Checkout information page is visible and loaded");
            true
        } else {
            self.actions
                .log()
                .fail("Checkout information title not visible");
            false
        }
    }

    /// Fill the buyer information form and continue.
    ///
    /// On partial failure the already-filled fields keep their values; the
    /// caller re-verifies page state rather than assuming a reset form.
    pub async fn fill_information(
        &self,
        first_name: &str,
        last_name: &str,
        postal_code: &str,
    ) -> VitrinaResult<()> {
        self.actions.log().step(&format!(
            "Filling checkout information for {first_name} {last_name}"
        ));
        self.actions.fill(&self.first_name_input, first_name).await?;
        self.actions.fill(&self.last_name_input, last_name).await?;
        self.actions
            .fill(&self.postal_code_input, postal_code)
            .await?;
        self.actions.click(&self.continue_button).await?;
        self.actions.log().pass("Checkout information submitted");
        Ok(())
    }

    /// Abandon checkout and return to the cart
    pub async fn cancel(&self) -> VitrinaResult<()> {
        self.actions.click(&self.cancel_button).await
    }
}

/// Checkout step two: order overview with totals.
#[derive(Debug)]
pub struct CheckoutOverviewPage {
    actions: Arc<Actions>,
    reconciler: Reconciler,
    title: Locator,
    summary_container: Locator,
    subtotal_label: Locator,
    tax_label: Locator,
    total_label: Locator,
    finish_button: Locator,
    cancel_button: Locator,
}

impl CheckoutOverviewPage {
    /// Bind the overview page to the action layer
    #[must_use]
    pub fn new(actions: Arc<Actions>) -> Self {
        let reconciler = Reconciler::new(actions.log_handle());
        Self {
            actions,
            reconciler,
            title: Locator::css(TITLE),
            summary_container: Locator::css("#checkout_summary_container"),
            subtotal_label: Locator::css(".summary_subtotal_label"),
            tax_label: Locator::css(".summary_tax_label"),
            total_label: Locator::css(".summary_total_label"),
            finish_button: Locator::css("#finish"),
            cancel_button: Locator::css("#cancel"),
        }
    }

    /// State predicate: the current location is the overview route
    pub async fn is_on(&self) -> bool {
        match self.actions.current_url().await {
            Some(url) => url.contains(OVERVIEW_ROUTE),
            None => false,
        }
    }

    /// Composite verification: overview summary is visible
    pub async fn verify_loaded(&self) -> bool {
        self.actions
            .log()
            .step("Verifying checkout overview page is visible");
        if self
            .actions
            .wait_for_visible(&self.summary_container)
            .await
            .is_err()
        {
            self.actions.log().fail("Checkout overview did not load");
            return false;
        }

        if self.actions.is_visible(&self.title).await {
            self.actions
                .log()
                .pass("Checkout overview is visible and loaded");
            true
        } else {
            self.actions.log().fail("Checkout overview title not visible");
            false
        }
    }

    /// Details of one overview row, scoped by exact name (quantity included)
    pub async fn item_details(&self, name: &str) -> VitrinaResult<ItemDetails> {
        read_item_details(&self.actions, CART_ITEM, name, true).await
    }

    /// Read the displayed subtotal/tax/total labels into a summary
    pub async fn summary(&self) -> VitrinaResult<OrderSummary> {
        let subtotal_text = self.actions.text(&self.subtotal_label).await?;
        let tax_text = self.actions.text(&self.tax_label).await?;
        let total_text = self.actions.text(&self.total_label).await?;

        let parse = |label: &str, text: &str| -> VitrinaResult<f64> {
            parse_price(text).ok_or_else(|| VitrinaError::InvalidInput {
                message: format!("unparsable {label} label: {text:?}"),
            })
        };
        Ok(OrderSummary::new(
            parse("subtotal", &subtotal_text)?,
            parse("tax", &tax_text)?,
            parse("total", &total_text)?,
        ))
    }

    /// Verification query: do the displayed totals satisfy the tax
    /// arithmetic? Degrades to `false` on any read failure.
    pub async fn verify_totals(&self) -> bool {
        let subtotal = self.actions.text(&self.subtotal_label).await;
        let tax = self.actions.text(&self.tax_label).await;
        let total = self.actions.text(&self.total_label).await;

        match (subtotal, tax, total) {
            (Ok(subtotal), Ok(tax), Ok(total)) => {
                self.reconciler.reconcile_labels(&subtotal, &tax, &total)
            }
            _ => {
                self.actions
                    .log()
                    .warn("Could not read all summary labels for reconciliation");
                false
            }
        }
    }

    /// Complete the purchase
    pub async fn finish(&self) -> VitrinaResult<()> {
        self.actions.log().step("Finishing checkout");
        self.actions.click(&self.finish_button).await
    }

    /// Abandon checkout and return to the inventory
    pub async fn cancel(&self) -> VitrinaResult<()> {
        self.actions.click(&self.cancel_button).await
    }
}

/// Checkout completion page.
#[derive(Debug)]
pub struct CheckoutCompletePage {
    actions: Arc<Actions>,
    title: Locator,
    complete_container: Locator,
    confirmation_banner: Locator,
    complete_icon: Locator,
    back_home_button: Locator,
}

impl CheckoutCompletePage {
    /// Bind the completion page to the action layer
    #[must_use]
    pub fn new(actions: Arc<Actions>) -> Self {
        Self {
            actions,
            title: Locator::css(TITLE),
            complete_container: Locator::css("#checkout_complete_container"),
            confirmation_banner: Locator::css(".complete-header"),
            complete_icon: Locator::css(".pony_express"),
            back_home_button: Locator::css("#back-to-products"),
        }
    }

    /// State predicate: the current location is the completion route
    pub async fn is_on(&self) -> bool {
        match self.actions.current_url().await {
            Some(url) => url.contains(COMPLETE_ROUTE),
            None => false,
        }
    }

    /// Composite verification: completion banner is visible
    pub async fn verify_loaded(&self) -> bool {
        self.actions
            .log()
            .step("Verifying checkout complete page is visible");
        if self
            .actions
            .wait_for_visible(&self.complete_container)
            .await
            .is_err()
        {
            self.actions.log().fail("Checkout complete page did not load");
            return false;
        }

        if self.actions.is_visible(&self.title).await {
            self.actions
                .log()
                .pass("Checkout complete page is visible and loaded");
            true
        } else {
            self.actions
                .log()
                .fail("Checkout complete title not visible");
            false
        }
    }

    /// Whether the dispatch icon is showing
    pub async fn has_dispatch_icon(&self) -> bool {
        self.actions.is_visible(&self.complete_icon).await
    }

    /// The confirmation banner text (expected: [`ORDER_CONFIRMATION`])
    pub async fn confirmation_text(&self) -> VitrinaResult<String> {
        self.actions.text(&self.confirmation_banner).await
    }

    /// Return to the inventory listing
    pub async fn back_home(&self) -> VitrinaResult<()> {
        self.actions.click(&self.back_home_button).await
    }
}
