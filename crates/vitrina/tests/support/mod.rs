//! Shared test support: an in-memory storefront standing in for the real
//! site, driven through the same `UiDriver` seam the CDP driver uses.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use vitrina::{
    Actions, CapturingLogger, Locator, Selector, SuiteConfig, UiDriver, VitrinaError,
    VitrinaResult,
};

const BASE_URL: &str = "https://www.saucedemo.com";

const LOGIN_ROUTE: &str = "/";
const INVENTORY_ROUTE: &str = "/inventory.html";
const CART_ROUTE: &str = "/cart.html";
const INFO_ROUTE: &str = "/checkout-step-one.html";
const OVERVIEW_ROUTE: &str = "/checkout-step-two.html";
const COMPLETE_ROUTE: &str = "/checkout-complete.html";

const VALID_USER: &str = "standard_user";
const VALID_PASSWORD: &str = "secret_sauce";

#[derive(Debug, Clone)]
struct CatalogEntry {
    name: String,
    description: String,
    price: f64,
}

#[derive(Debug, Default)]
struct ShopState {
    route: String,
    logged_in: bool,
    login_error: bool,
    fills: HashMap<String, String>,
    cart: Vec<String>,
    catalog: Vec<CatalogEntry>,
}

/// Scripted model of the demo storefront.
///
/// Routes, the product catalog, the cart badge, checkout arithmetic, and
/// the add/remove button toggle behave like the live site, so the page
/// objects can be exercised end-to-end without a browser.
#[derive(Debug)]
pub struct FakeStorefront {
    state: Mutex<ShopState>,
}

impl Default for FakeStorefront {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeStorefront {
    pub fn new() -> Self {
        let catalog = vec![
            ("Sauce Labs Backpack", "Streamlined sling pack", 29.99),
            ("Sauce Labs Bike Light", "Water-resistant LED", 9.99),
            ("Sauce Labs Bolt T-Shirt", "Ridiculously soft tee", 15.99),
            ("Sauce Labs Fleece Jacket", "Quarter-zip midweight fleece", 49.99),
            ("Sauce Labs Onesie", "Rib snap infant onesie", 7.99),
            ("Test.allTheThings() T-Shirt (Red)", "Superior attention to detail", 15.99),
        ]
        .into_iter()
        .map(|(name, description, price)| CatalogEntry {
            name: name.to_string(),
            description: description.to_string(),
            price,
        })
        .collect();

        Self {
            state: Mutex::new(ShopState {
                route: LOGIN_ROUTE.to_string(),
                catalog,
                ..ShopState::default()
            }),
        }
    }

    /// Add a product to the listing (for disambiguation scenarios)
    pub fn add_product(&self, name: &str, description: &str, price: f64) {
        let mut state = self.state.lock().unwrap();
        state.catalog.push(CatalogEntry {
            name: name.to_string(),
            description: description.to_string(),
            price,
        });
    }

    /// Item names currently in the cart
    pub fn cart_contents(&self) -> Vec<String> {
        self.state.lock().unwrap().cart.clone()
    }

    fn on_listing_route(route: &str) -> bool {
        route == CART_ROUTE || route == OVERVIEW_ROUTE
    }

    fn page_title(route: &str) -> Option<&'static str> {
        match route {
            INVENTORY_ROUTE => Some("Products"),
            CART_ROUTE => Some("Your Cart"),
            INFO_ROUTE => Some("Checkout: Your Information"),
            OVERVIEW_ROUTE => Some("Checkout: Overview"),
            COMPLETE_ROUTE => Some("Checkout: Complete!"),
            _ => None,
        }
    }

    fn subtotal(state: &ShopState) -> f64 {
        state
            .cart
            .iter()
            .filter_map(|name| state.catalog.iter().find(|p| &p.name == name))
            .map(|p| p.price)
            .sum()
    }

    fn css_visible(state: &ShopState, css: &str) -> bool {
        let route = state.route.as_str();
        match css {
            "#user-name" | "#password" | "#login-button" => route == LOGIN_ROUTE,
            "[data-test=\"error\"]" => route == LOGIN_ROUTE && state.login_error,
            ".title" => Self::page_title(route).is_some(),
            ".inventory_list" | ".inventory_item" => route == INVENTORY_ROUTE,
            ".shopping_cart_link" => state.logged_in && route != LOGIN_ROUTE,
            ".shopping_cart_badge" => {
                state.logged_in && route != LOGIN_ROUTE && !state.cart.is_empty()
            }
            ".cart_list" | "#checkout" | "#continue-shopping" => route == CART_ROUTE,
            ".cart_item" => Self::on_listing_route(route) && !state.cart.is_empty(),
            "#checkout_info_container" | "#first-name" | "#last-name" | "#postal-code"
            | "#continue" => route == INFO_ROUTE,
            "#cancel" => route == INFO_ROUTE || route == OVERVIEW_ROUTE,
            "#checkout_summary_container" | ".summary_subtotal_label" | ".summary_tax_label"
            | ".summary_total_label" | "#finish" => route == OVERVIEW_ROUTE,
            "#checkout_complete_container" | ".complete-header" | ".pony_express"
            | "#back-to-products" => route == COMPLETE_ROUTE,
            _ => false,
        }
    }

    fn item_present(state: &ShopState, container: &str, name: &str) -> bool {
        match container {
            ".inventory_item" => {
                state.route == INVENTORY_ROUTE && state.catalog.iter().any(|p| p.name == name)
            }
            ".cart_item" => {
                Self::on_listing_route(&state.route) && state.cart.iter().any(|n| n == name)
            }
            _ => false,
        }
    }

    fn css_text(state: &ShopState, css: &str) -> Option<String> {
        let route = state.route.as_str();
        match css {
            ".title" => Self::page_title(route).map(String::from),
            ".shopping_cart_badge" => {
                if Self::css_visible(state, css) {
                    Some(state.cart.len().to_string())
                } else {
                    None
                }
            }
            ".complete-header" => {
                (route == COMPLETE_ROUTE).then(|| "Thank you for your order!".to_string())
            }
            "[data-test=\"error\"]" => (route == LOGIN_ROUTE && state.login_error).then(|| {
                "Epic sadface: Username and password do not match any user in this service"
                    .to_string()
            }),
            ".summary_subtotal_label" => (route == OVERVIEW_ROUTE)
                .then(|| format!("Item total: ${:.2}", Self::subtotal(state))),
            ".summary_tax_label" => (route == OVERVIEW_ROUTE).then(|| {
                let tax = (Self::subtotal(state) * 0.08 * 100.0).round() / 100.0;
                format!("Tax: ${tax:.2}")
            }),
            ".summary_total_label" => (route == OVERVIEW_ROUTE).then(|| {
                let subtotal = Self::subtotal(state);
                let tax = (subtotal * 0.08 * 100.0).round() / 100.0;
                let total = ((subtotal + tax) * 100.0).round() / 100.0;
                format!("Total: ${total:.2}")
            }),
            _ => None,
        }
    }

    fn item_text(state: &ShopState, container: &str, name: &str, target: &str) -> Option<String> {
        if !Self::item_present(state, container, name) {
            return None;
        }
        let product = state.catalog.iter().find(|p| p.name == name)?;
        match target {
            ".inventory_item_name" => Some(product.name.clone()),
            ".inventory_item_desc" => Some(product.description.clone()),
            ".inventory_item_price" => Some(format!("${:.2}", product.price)),
            ".cart_quantity" => Some("1".to_string()),
            "button.btn_inventory" => {
                if state.cart.iter().any(|n| n == &product.name) {
                    Some("Remove".to_string())
                } else {
                    Some("Add to cart".to_string())
                }
            }
            "button.cart_button" => Some("Remove".to_string()),
            _ => None,
        }
    }

    fn handle_css_click(state: &mut ShopState, css: &str) -> bool {
        match css {
            "#login-button" => {
                let username = state.fills.get("#user-name").map(String::as_str);
                let password = state.fills.get("#password").map(String::as_str);
                if username == Some(VALID_USER) && password == Some(VALID_PASSWORD) {
                    state.logged_in = true;
                    state.login_error = false;
                    state.route = INVENTORY_ROUTE.to_string();
                } else {
                    state.login_error = true;
                }
                true
            }
            ".shopping_cart_link" => {
                state.route = CART_ROUTE.to_string();
                true
            }
            "#checkout" => {
                state.route = INFO_ROUTE.to_string();
                true
            }
            "#continue" => {
                let filled = ["#first-name", "#last-name", "#postal-code"]
                    .iter()
                    .all(|key| state.fills.get(*key).is_some_and(|v| !v.trim().is_empty()));
                if filled {
                    state.route = OVERVIEW_ROUTE.to_string();
                }
                true
            }
            "#finish" => {
                state.route = COMPLETE_ROUTE.to_string();
                state.cart.clear();
                true
            }
            "#cancel" => {
                state.route = if state.route == INFO_ROUTE {
                    CART_ROUTE.to_string()
                } else {
                    INVENTORY_ROUTE.to_string()
                };
                true
            }
            "#continue-shopping" | "#back-to-products" => {
                state.route = INVENTORY_ROUTE.to_string();
                true
            }
            _ => false,
        }
    }

    fn handle_item_click(state: &mut ShopState, container: &str, name: &str, target: &str) -> bool {
        if !Self::item_present(state, container, name) {
            return false;
        }
        match (container, target) {
            (".inventory_item", "button.btn_inventory") => {
                if let Some(pos) = state.cart.iter().position(|n| n == name) {
                    state.cart.remove(pos);
                } else {
                    state.cart.push(name.to_string());
                }
                true
            }
            (".cart_item", "button.cart_button") => {
                if let Some(pos) = state.cart.iter().position(|n| n == name) {
                    state.cart.remove(pos);
                }
                true
            }
            _ => false,
        }
    }
}

#[async_trait]
impl UiDriver for FakeStorefront {
    async fn navigate(&self, url: &str) -> VitrinaResult<()> {
        let mut state = self.state.lock().unwrap();
        let route = url.strip_prefix(BASE_URL).unwrap_or("/");
        let route = if route.is_empty() { "/" } else { route };
        if route == LOGIN_ROUTE {
            state.logged_in = false;
            state.login_error = false;
        }
        state.route = route.to_string();
        Ok(())
    }

    async fn current_url(&self) -> VitrinaResult<String> {
        let state = self.state.lock().unwrap();
        Ok(format!("{BASE_URL}{}", state.route))
    }

    async fn query_count(&self, locator: &Locator) -> VitrinaResult<usize> {
        let state = self.state.lock().unwrap();
        let count = match locator.selector() {
            Selector::Css(css) => match css.as_str() {
                ".inventory_item" => {
                    if state.route == INVENTORY_ROUTE {
                        state.catalog.len()
                    } else {
                        0
                    }
                }
                ".cart_item" => {
                    if FakeStorefront::on_listing_route(&state.route) {
                        state.cart.len()
                    } else {
                        0
                    }
                }
                other => usize::from(FakeStorefront::css_visible(&state, other)),
            },
            Selector::Item {
                container, name, ..
            } => usize::from(FakeStorefront::item_present(&state, container, name)),
            Selector::CssWithText { .. } => 0,
        };
        Ok(count)
    }

    async fn is_visible(&self, locator: &Locator) -> VitrinaResult<bool> {
        let state = self.state.lock().unwrap();
        let visible = match locator.selector() {
            Selector::Css(css) => FakeStorefront::css_visible(&state, css),
            Selector::Item {
                container, name, ..
            } => FakeStorefront::item_present(&state, container, name),
            Selector::CssWithText { .. } => false,
        };
        Ok(visible)
    }

    async fn is_enabled(&self, _locator: &Locator) -> VitrinaResult<bool> {
        Ok(true)
    }

    async fn text_content(&self, locator: &Locator) -> VitrinaResult<Option<String>> {
        let state = self.state.lock().unwrap();
        let text = match locator.selector() {
            Selector::Css(css) => FakeStorefront::css_text(&state, css),
            Selector::Item {
                container,
                name,
                target,
                ..
            } => {
                let target = target.as_deref().unwrap_or("");
                FakeStorefront::item_text(&state, container, name, target)
            }
            Selector::CssWithText { .. } => None,
        };
        Ok(text)
    }

    async fn click(&self, locator: &Locator) -> VitrinaResult<()> {
        let mut state = self.state.lock().unwrap();
        let handled = match locator.selector() {
            Selector::Css(css) => FakeStorefront::handle_css_click(&mut state, css),
            Selector::Item {
                container,
                name,
                target,
                ..
            } => {
                let target = target.as_deref().unwrap_or("");
                FakeStorefront::handle_item_click(&mut state, container, name, target)
            }
            Selector::CssWithText { .. } => false,
        };
        if handled {
            Ok(())
        } else {
            Err(VitrinaError::Driver {
                message: format!("nothing to click for {locator}"),
            })
        }
    }

    async fn fill(&self, locator: &Locator, text: &str) -> VitrinaResult<()> {
        let mut state = self.state.lock().unwrap();
        if let Selector::Css(css) = locator.selector() {
            state.fills.insert(css.clone(), text.to_string());
            Ok(())
        } else {
            Err(VitrinaError::Driver {
                message: format!("cannot fill {locator}"),
            })
        }
    }

    async fn screenshot(&self) -> VitrinaResult<Vec<u8>> {
        Ok(b"\x89PNG\r\n\x1a\n fake".to_vec())
    }

    async fn close(&self) -> VitrinaResult<()> {
        Ok(())
    }
}

/// Config tuned for fast in-memory runs
pub fn test_config() -> SuiteConfig {
    SuiteConfig::new()
        .with_wait_timeout(500)
        .with_poll_interval(10)
        .with_snapshots(false)
}

/// A fake storefront wired through the action layer with a capturing logger
pub fn storefront_harness() -> (Arc<FakeStorefront>, Arc<CapturingLogger>, Arc<Actions>) {
    let driver = Arc::new(FakeStorefront::new());
    let log = Arc::new(CapturingLogger::new());
    let actions = Arc::new(Actions::new(driver.clone(), log.clone(), &test_config()));
    (driver, log, actions)
}
