//! Credential and product data providers.
//!
//! The suite treats its data source as an opaque provider: credentials are
//! looked up by index, products by name. The JSON-backed [`TestData`]
//! implementation is the default carrier; anything satisfying [`DataSource`]
//! can stand in.

use crate::result::{VitrinaError, VitrinaResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A login credential row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account username
    pub username: String,
    /// Account password
    pub password: String,
    /// What this account is for (e.g. "standard user")
    #[serde(default)]
    pub description: String,
}

/// A known product and its listed price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product name as displayed
    pub name: String,
    /// Listed price in dollars
    pub price: f64,
}

/// Lookup contract consumed by test scenarios
pub trait DataSource: Send + Sync {
    /// Credentials by row index
    fn credentials(&self, index: usize) -> Option<Credentials>;

    /// Product by exact display name
    fn product(&self, name: &str) -> Option<ProductRecord>;
}

/// JSON-backed test data set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestData {
    /// Credential rows, index-addressable
    #[serde(default)]
    pub credentials: Vec<Credentials>,
    /// Known products
    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

impl TestData {
    /// Parse a data set from a JSON string
    pub fn from_json(json: &str) -> VitrinaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a data set from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> VitrinaResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Built-in data set for the demo storefront.
    ///
    /// `VITRINA_USERNAME` / `VITRINA_PASSWORD` override the first credential
    /// row, so CI can inject real secrets without touching files.
    #[must_use]
    pub fn builtin() -> Self {
        let username =
            std::env::var("VITRINA_USERNAME").unwrap_or_else(|_| "standard_user".to_string());
        let password =
            std::env::var("VITRINA_PASSWORD").unwrap_or_else(|_| "secret_sauce".to_string());

        Self {
            credentials: vec![
                Credentials {
                    username,
                    password,
                    description: "standard user".to_string(),
                },
                Credentials {
                    username: "locked_out_user".to_string(),
                    password: "secret_sauce".to_string(),
                    description: "locked out user".to_string(),
                },
            ],
            products: vec![
                ProductRecord {
                    name: "Sauce Labs Backpack".to_string(),
                    price: 29.99,
                },
                ProductRecord {
                    name: "Sauce Labs Bike Light".to_string(),
                    price: 9.99,
                },
                ProductRecord {
                    name: "Sauce Labs Bolt T-Shirt".to_string(),
                    price: 15.99,
                },
                ProductRecord {
                    name: "Sauce Labs Fleece Jacket".to_string(),
                    price: 49.99,
                },
                ProductRecord {
                    name: "Sauce Labs Onesie".to_string(),
                    price: 7.99,
                },
                ProductRecord {
                    name: "Test.allTheThings() T-Shirt (Red)".to_string(),
                    price: 15.99,
                },
            ],
        }
    }

    /// Credentials by index, failing with context when absent
    pub fn require_credentials(&self, index: usize) -> VitrinaResult<Credentials> {
        self.credentials(index)
            .ok_or_else(|| VitrinaError::InvalidInput {
                message: format!("no credential row at index {index}"),
            })
    }
}

impl DataSource for TestData {
    fn credentials(&self, index: usize) -> Option<Credentials> {
        self.credentials.get(index).cloned()
    }

    fn product(&self, name: &str) -> Option<ProductRecord> {
        self.products.iter().find(|p| p.name == name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_standard_user() {
        let data = TestData::builtin();
        let creds = data.credentials(0).unwrap();
        assert!(!creds.username.is_empty());
        assert!(!creds.password.is_empty());
    }

    #[test]
    fn test_product_lookup_is_exact() {
        let data = TestData::builtin();
        let jacket = data.product("Sauce Labs Fleece Jacket").unwrap();
        assert_eq!(jacket.price, 49.99);

        assert!(data.product("Sauce Labs Fleece").is_none());
        assert!(data.product("sauce labs fleece jacket").is_none());
    }

    #[test]
    fn test_missing_index() {
        let data = TestData::builtin();
        assert!(data.credentials(99).is_none());
        assert!(data.require_credentials(99).is_err());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "credentials": [
                {"username": "u1", "password": "p1", "description": "first"}
            ],
            "products": [
                {"name": "Widget", "price": 1.25}
            ]
        }"#;
        let data = TestData::from_json(json).unwrap();
        assert_eq!(data.credentials(0).unwrap().username, "u1");
        assert_eq!(data.product("Widget").unwrap().price, 1.25);
    }

    #[test]
    fn test_from_json_defaults_missing_sections() {
        let data = TestData::from_json("{}").unwrap();
        assert!(data.credentials.is_empty());
        assert!(data.products.is_empty());
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(TestData::from_json("not json").is_err());
    }
}
