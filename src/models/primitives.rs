//! Primitive types and newtypes for type-safe API interactions.
//!
//! This module provides strongly-typed wrappers around string identifiers
//! to prevent mixing up different types of IDs at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A strongly-typed purchase order ID.
///
/// # Example
///
/// ```
/// use walmart_rs::PurchaseOrderId;
///
/// let id = PurchaseOrderId::new("108915114139071");
/// println!("Order: {}", id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseOrderId(String);

impl PurchaseOrderId {
    /// Create a new purchase order ID from a string.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the purchase order ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PurchaseOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PurchaseOrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for PurchaseOrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PurchaseOrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A seller stock keeping unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    /// Create a new SKU.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the SKU as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Sku {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Sku {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Environment configuration for the Walmart Marketplace API.
///
/// Any base URL can be used with the client; this enum only names the
/// two public hosts.
///
/// # Example
///
/// ```
/// use walmart_rs::Environment;
///
/// let env = Environment::Sandbox;
/// println!("API URL: {}", env.api_base_url());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Production marketplace.
    #[default]
    Production,
    /// Sandbox environment for integration testing.
    Sandbox,
}

impl Environment {
    /// Get the base URL for REST API requests.
    pub fn api_base_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://marketplace.walmartapis.com",
            Environment::Sandbox => "https://sandbox.walmartapis.com",
        }
    }

    /// Returns `true` if this is the production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Sandbox => write!(f, "sandbox"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_order_id() {
        let id = PurchaseOrderId::new("108915114139071");
        assert_eq!(id.as_str(), "108915114139071");
        assert_eq!(id.to_string(), "108915114139071");
    }

    #[test]
    fn test_sku_serializes_transparently() {
        let sku: Sku = "ABC-123".into();
        assert_eq!(serde_json::to_string(&sku).unwrap(), "\"ABC-123\"");
    }

    #[test]
    fn test_environment_urls() {
        assert_eq!(
            Environment::Production.api_base_url(),
            "https://marketplace.walmartapis.com"
        );
        assert_eq!(
            Environment::Sandbox.api_base_url(),
            "https://sandbox.walmartapis.com"
        );
        assert!(!Environment::Sandbox.is_production());
    }
}
