//! Shared test data: the literal strings the remote application emits,
//! catalog product names, and generators for unique test identities.
//!
//! The strings in [`messages`] are a contract with the deployed site;
//! scenarios assert on them verbatim.

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pages::cart::OrderDetails;
use crate::pages::contact::ContactMessage;

/// Default deployment of the storefront demo.
pub const DEFAULT_BASE_URL: &str = "https://www.demoblaze.com/";

/// Dialog and panel texts emitted by the remote application.
pub mod messages {
    /// Alert after a product is added to the cart.
    pub const PRODUCT_ADDED: &str = "Product added";
    /// Alert after a successful registration.
    pub const SIGNUP_OK: &str = "Sign up successful";
    /// Alert when registering a username that is taken.
    pub const USER_EXISTS: &str = "already exist";
    /// Success panel headline after checkout.
    pub const PURCHASE_OK: &str = "Thank you for your purchase!";
    /// Alert after the contact form is sent.
    pub const CONTACT_OK: &str = "Thanks for the message!!";
}

/// Product names present in the demo catalog.
pub mod products {
    /// A phone from the default grid.
    pub const SAMSUNG_GALAXY_S6: &str = "Samsung galaxy s6";
    /// A second phone, for multi-item carts.
    pub const NOKIA_LUMIA_1520: &str = "Nokia lumia 1520";
    /// A laptop, reachable through the category filter.
    pub const MACBOOK_AIR: &str = "MacBook air";
    /// A monitor, reachable through the category filter.
    pub const APPLE_MONITOR_24: &str = "Apple monitor 24";
}

/// A username known to be taken on the shared deployment, for the
/// duplicate-registration scenario.
pub const EXISTING_USERNAME: &str = "sathish_demo_user";

/// Pattern matching the credential-rejection alerts the login flow can
/// raise.
#[must_use]
pub fn login_rejection() -> Regex {
    Regex::new("Wrong password|User does not exist").expect("literal pattern is valid")
}

/// Credentials pair for the auth flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Account username
    pub username: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Generate credentials unique per call.
    ///
    /// The deployment enforces globally unique usernames and scenarios run
    /// concurrently, so collisions must be impossible, not just unlikely
    /// within one process.
    #[must_use]
    pub fn unique(prefix: &str) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self {
            username: format!("{prefix}_{}", &suffix[..12]),
            password: format!("pw_{}", &suffix[12..24]),
        }
    }
}

/// A checkout payload accepted by the order form.
#[must_use]
pub fn sample_order(name: &str) -> OrderDetails {
    OrderDetails {
        name: name.to_string(),
        country: "Norway".to_string(),
        city: "Oslo".to_string(),
        card_number: "4111 1111 1111 1111".to_string(),
        expiry_month: "10".to_string(),
        expiry_year: "2027".to_string(),
    }
}

/// A well-formed contact message.
#[must_use]
pub fn sample_contact() -> ContactMessage {
    ContactMessage {
        email: "shopper@example.com".to_string(),
        name: "Vitrina Shopper".to_string(),
        message: "Is the galaxy s6 back in stock?".to_string(),
    }
}

/// A contact message with every field empty, for validation scenarios.
#[must_use]
pub fn empty_contact() -> ContactMessage {
    ContactMessage {
        email: String::new(),
        name: String::new(),
        message: String::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn unique_credentials_differ_across_calls() {
        let a = Credentials::unique("vitrina");
        let b = Credentials::unique("vitrina");
        assert_ne!(a.username, b.username);
        assert_ne!(a.password, b.password);
    }

    #[test]
    fn unique_credentials_keep_the_prefix() {
        let creds = Credentials::unique("smoke");
        assert!(creds.username.starts_with("smoke_"));
        assert!(!creds.password.is_empty());
    }

    #[test]
    fn rejection_pattern_matches_both_alerts() {
        let pattern = login_rejection();
        assert!(pattern.is_match("Wrong password."));
        assert!(pattern.is_match("User does not exist."));
        assert!(!pattern.is_match("Sign up successful."));
    }

    #[test]
    fn contract_strings_are_pinned() {
        // These literals belong to the remote application; a mismatch here
        // means the contract moved, not that the constant is wrong.
        assert_eq!(messages::PRODUCT_ADDED, "Product added");
        assert_eq!(messages::USER_EXISTS, "already exist");
        assert_eq!(messages::PURCHASE_OK, "Thank you for your purchase!");
        assert_eq!(messages::CONTACT_OK, "Thanks for the message!!");
        assert_eq!(products::SAMSUNG_GALAXY_S6, "Samsung galaxy s6");
        assert_eq!(EXISTING_USERNAME, "sathish_demo_user");
    }

    #[test]
    fn sample_order_fills_every_field() {
        let order = sample_order("Test Shopper");
        assert_eq!(order.name, "Test Shopper");
        assert!(!order.country.is_empty());
        assert!(!order.city.is_empty());
        assert!(!order.card_number.is_empty());
        assert!(!order.expiry_month.is_empty());
        assert!(!order.expiry_year.is_empty());
    }

    #[test]
    fn empty_contact_is_empty() {
        let msg = empty_contact();
        assert!(msg.email.is_empty());
        assert!(msg.name.is_empty());
        assert!(msg.message.is_empty());
    }
}
