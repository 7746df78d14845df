//! Page abstractions for the demo storefront.
//!
//! Each page object binds the shared action layer to a fixed set of
//! locators for one page type, and exposes only semantically named
//! operations — raw locators never leave this module. Pages compose the
//! action layer rather than inheriting from it, so a fake driver or a
//! capturing logger can stand in underneath any page without subclassing.
//!
//! Mutating operations perform their sub-actions in sequence and do not
//! roll back on partial failure: browser UI state has no transactions, so a
//! failure leaves the page wherever the last successful sub-action put it.
//! Callers re-verify state instead of assuming a clean slate.

mod cart;
mod checkout;
mod inventory;
mod login;

pub use cart::CartPage;
pub use checkout::{
    CheckoutCompletePage, CheckoutInfoPage, CheckoutOverviewPage, ORDER_CONFIRMATION,
};
pub use inventory::InventoryPage;
pub use login::LoginPage;

use crate::action::Actions;
use crate::locator::Locator;
use crate::result::VitrinaResult;
use serde::{Deserialize, Serialize};

// Element classes shared across the inventory, cart, and overview listings.
pub(crate) const TITLE: &str = ".title";
pub(crate) const ITEM_NAME: &str = ".inventory_item_name";
pub(crate) const ITEM_DESC: &str = ".inventory_item_desc";
pub(crate) const ITEM_PRICE: &str = ".inventory_item_price";
pub(crate) const CART_ITEM: &str = ".cart_item";
pub(crate) const CART_QTY: &str = ".cart_quantity";

/// Snapshot of one rendered item row, immutable once returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetails {
    /// Item name as displayed
    pub name: String,
    /// Item description as displayed
    pub description: String,
    /// Price string as displayed (e.g. `"$49.99"`)
    pub price: String,
    /// Quantity as displayed; `None` on listings without a quantity column
    pub quantity: Option<String>,
}

impl ItemDetails {
    /// Compare the fields shared by every listing (name and price).
    ///
    /// Used across pages that disagree on whether a quantity column exists.
    #[must_use]
    pub fn same_listing(&self, other: &Self) -> bool {
        self.name == other.name && self.price == other.price
    }
}

/// Read one item row's fields, scoped to the row whose name matches exactly.
pub(crate) async fn read_item_details(
    actions: &Actions,
    container: &str,
    name: &str,
    with_quantity: bool,
) -> VitrinaResult<ItemDetails> {
    actions
        .log()
        .step(&format!("Getting details for item {name:?}"));

    let row = Locator::item(container, ITEM_NAME, name);
    let item_name = actions.text(&row.clone().field(ITEM_NAME)).await?;
    let description = actions.text(&row.clone().field(ITEM_DESC)).await?;
    let price = actions.text(&row.clone().field(ITEM_PRICE)).await?;
    let quantity = if with_quantity {
        Some(actions.text(&row.field(CART_QTY)).await?)
    } else {
        None
    };

    let details = ItemDetails {
        name: item_name,
        description,
        price,
        quantity,
    };
    actions
        .log()
        .pass(&format!("Retrieved details for {name:?}"));
    Ok(details)
}
