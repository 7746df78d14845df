//! Vitrina: resilient page-object layer for storefront end-to-end tests.
//!
//! Vitrina (Spanish: "shop display window") wraps single UI interactions —
//! click, fill, wait, navigate, read — with bounded waiting, verification
//! logging, and failure-time diagnostic snapshots, and builds page objects
//! for a demo storefront's login, inventory, cart, and checkout flows on
//! top of that one wrapper.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Test scenario                                                   │
//! │      │                                                           │
//! │      ▼                                                           │
//! │  Page objects (LoginPage, InventoryPage, CartPage, Checkout*)    │
//! │      │ composition, fixed locator sets                           │
//! │      ▼                                                           │
//! │  Actions (bounded waits, log → snapshot → propagate)             │
//! │      │                                                           │
//! │      ▼                                                           │
//! │  UiDriver (ChromiumDriver via CDP, or a scripted fake)           │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failure handling is uniform: every failing action records a structured
//! `fail` event and captures a best-effort page snapshot before the error
//! reaches the caller. Visibility and route checks are queries — they
//! degrade to `false` with a warning instead of aborting the flow.
//!
//! # Example
//!
//! ```ignore
//! let config = SuiteConfig::from_env();
//! let driver = Arc::new(ChromiumDriver::launch(&config).await?);
//! let actions = Arc::new(Actions::new(driver, Arc::new(TracingLogger::new()), &config));
//!
//! let login = LoginPage::new(actions.clone(), &config);
//! login.open().await?;
//! login.login("standard_user", "secret_sauce").await?;
//!
//! let inventory = InventoryPage::new(actions.clone());
//! assert!(inventory.verify_loaded().await);
//! inventory.add_to_cart("Sauce Labs Fleece Jacket").await?;
//! ```

#![warn(missing_docs)]

mod action;
#[cfg(feature = "browser")]
mod browser;
mod config;
mod data;
mod driver;
mod locator;
mod logger;
mod price;
mod result;
mod snapshot;

/// Page abstractions for the demo storefront
pub mod pages;

pub use action::Actions;
#[cfg(feature = "browser")]
pub use browser::ChromiumDriver;
pub use config::{
    SuiteConfig, DEFAULT_BASE_URL, DEFAULT_NAVIGATION_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_WAIT_TIMEOUT_MS,
};
pub use data::{Credentials, DataSource, ProductRecord, TestData};
pub use driver::{MockDriver, UiDriver};
pub use locator::{Locator, Selector};
pub use logger::{
    init_tracing, CapturingLogger, Severity, TracingLogger, VerificationEvent, VerificationLog,
};
pub use pages::{
    CartPage, CheckoutCompletePage, CheckoutInfoPage, CheckoutOverviewPage, InventoryPage,
    ItemDetails, LoginPage, ORDER_CONFIRMATION,
};
pub use price::{parse_price, round2, OrderSummary, Reconciler, TAX_RATE};
pub use result::{VitrinaError, VitrinaResult};
pub use snapshot::SnapshotSink;
