//! Shopping cart page.

use super::{read_item_details, ItemDetails, CART_ITEM, ITEM_NAME, TITLE};
use crate::action::Actions;
use crate::locator::Locator;
use crate::result::VitrinaResult;
use std::sync::Arc;

const ROUTE: &str = "/cart.html";
const ITEM_BUTTON: &str = "button.cart_button";

/// The cart listing with per-row quantity and remove controls.
#[derive(Debug)]
pub struct CartPage {
    actions: Arc<Actions>,
    title: Locator,
    cart_list: Locator,
    cart_item: Locator,
    checkout_button: Locator,
    continue_shopping_button: Locator,
}

impl CartPage {
    /// Bind the cart page to the action layer
    #[must_use]
    pub fn new(actions: Arc<Actions>) -> Self {
        Self {
            actions,
            title: Locator::css(TITLE),
            cart_list: Locator::css(".cart_list"),
            cart_item: Locator::css(CART_ITEM),
            checkout_button: Locator::css("#checkout"),
            continue_shopping_button: Locator::css("#continue-shopping"),
        }
    }

    fn item_row(name: &str) -> Locator {
        Locator::item(CART_ITEM, ITEM_NAME, name)
    }

    /// State predicate: the current location is the cart route
    pub async fn is_on(&self) -> bool {
        match self.actions.current_url().await {
            Some(url) => url.contains(ROUTE),
            None => false,
        }
    }

    /// Composite verification: title and cart list are visible
    pub async fn verify_loaded(&self) -> bool {
        self.actions.log().step("Verifying cart page is visible");
        if self.actions.wait_for_visible(&self.cart_list).await.is_err() {
            self.actions.log().fail("Cart page did not load");
            return false;
        }

        if self.actions.is_visible(&self.title).await {
            self.actions.log().pass("Cart page is visible and loaded");
            true
        } else {
            self.actions.log().fail("Cart page title not visible");
            false
        }
    }

    /// Number of rows in the cart
    pub async fn item_count(&self) -> usize {
        self.actions.count(&self.cart_item).await
    }

    /// Whether a row with this exact item name exists
    pub async fn contains_item(&self, name: &str) -> bool {
        self.actions.count(&Self::item_row(name)).await > 0
    }

    /// Details of one cart row, scoped by exact name (quantity included)
    pub async fn item_details(&self, name: &str) -> VitrinaResult<ItemDetails> {
        read_item_details(&self.actions, CART_ITEM, name, true).await
    }

    /// Remove one item via its row's Remove button
    pub async fn remove_item(&self, name: &str) -> VitrinaResult<()> {
        self.actions
            .log()
            .step(&format!("Removing {name:?} from cart"));
        self.actions
            .click(&Self::item_row(name).field(ITEM_BUTTON))
            .await
    }

    /// Proceed to checkout information
    pub async fn checkout(&self) -> VitrinaResult<()> {
        self.actions.click(&self.checkout_button).await
    }

    /// Return to the inventory listing
    pub async fn continue_shopping(&self) -> VitrinaResult<()> {
        self.actions.click(&self.continue_shopping_button).await
    }
}
