//! Inventory (product listing) page.

use super::{read_item_details, ItemDetails, ITEM_NAME, TITLE};
use crate::action::Actions;
use crate::locator::Locator;
use crate::result::VitrinaResult;
use std::sync::Arc;

const ROUTE: &str = "/inventory.html";
const ITEM_CONTAINER: &str = ".inventory_item";
const ITEM_BUTTON: &str = "button.btn_inventory";

/// The product listing shown after login.
#[derive(Debug)]
pub struct InventoryPage {
    actions: Arc<Actions>,
    title: Locator,
    inventory_list: Locator,
    inventory_item: Locator,
    cart_link: Locator,
    cart_badge: Locator,
}

impl InventoryPage {
    /// Bind the inventory page to the action layer
    #[must_use]
    pub fn new(actions: Arc<Actions>) -> Self {
        Self {
            actions,
            title: Locator::css(TITLE),
            inventory_list: Locator::css(".inventory_list"),
            inventory_item: Locator::css(ITEM_CONTAINER),
            cart_link: Locator::css(".shopping_cart_link"),
            cart_badge: Locator::css(".shopping_cart_badge"),
        }
    }

    fn item_row(name: &str) -> Locator {
        Locator::item(ITEM_CONTAINER, ITEM_NAME, name)
    }

    /// State predicate: the current location is the inventory route
    pub async fn is_on(&self) -> bool {
        match self.actions.current_url().await {
            Some(url) => url.contains(ROUTE),
            None => false,
        }
    }

    /// Composite verification: title and product grid are visible
    pub async fn verify_loaded(&self) -> bool {
        self.actions
            .log()
            .step("Verifying inventory page is visible");
        if self
            .actions
            .wait_for_visible(&self.inventory_list)
            .await
            .is_err()
        {
            self.actions.log().fail("Inventory page did not load");
            return false;
        }

        if self.actions.is_visible(&self.title).await {
            self.actions
                .log()
                .pass("Inventory page is visible and loaded");
            true
        } else {
            self.actions.log().fail("Inventory page title not visible");
            false
        }
    }

    /// The page title text (expected: "Products")
    pub async fn title_text(&self) -> VitrinaResult<String> {
        self.actions.text(&self.title).await
    }

    /// Number of product cards displayed
    pub async fn product_count(&self) -> usize {
        self.actions.count(&self.inventory_item).await
    }

    /// Whether a product with this exact name is listed
    pub async fn is_product_listed(&self, name: &str) -> bool {
        self.actions.count(&Self::item_row(name)).await > 0
    }

    /// Click the card button for this product (labelled "Add to cart")
    pub async fn add_to_cart(&self, name: &str) -> VitrinaResult<()> {
        self.actions
            .log()
            .step(&format!("Adding {name:?} to cart"));
        self.actions
            .click(&Self::item_row(name).field(ITEM_BUTTON))
            .await
    }

    /// Click the card button for this product (labelled "Remove")
    pub async fn remove_from_cart(&self, name: &str) -> VitrinaResult<()> {
        self.actions
            .log()
            .step(&format!("Removing {name:?} from cart"));
        self.actions
            .click(&Self::item_row(name).field(ITEM_BUTTON))
            .await
    }

    /// Current label of the product's card button ("Add to cart" / "Remove")
    pub async fn item_button_label(&self, name: &str) -> VitrinaResult<String> {
        self.actions
            .text(&Self::item_row(name).field(ITEM_BUTTON))
            .await
    }

    /// Cart badge count; the badge is absent at zero
    pub async fn cart_badge_count(&self) -> u32 {
        if !self.actions.is_visible(&self.cart_badge).await {
            return 0;
        }
        match self.actions.text(&self.cart_badge).await {
            Ok(text) => text.parse().unwrap_or_else(|_| {
                self.actions
                    .log()
                    .warn(&format!("Unparsable cart badge text: {text:?}"));
                0
            }),
            Err(_) => 0,
        }
    }

    /// Details of one product card, scoped by exact name
    pub async fn item_details(&self, name: &str) -> VitrinaResult<ItemDetails> {
        read_item_details(&self.actions, ITEM_CONTAINER, name, false).await
    }

    /// Open the cart page via the cart icon
    pub async fn open_cart(&self) -> VitrinaResult<()> {
        self.actions.click(&self.cart_link).await
    }
}
