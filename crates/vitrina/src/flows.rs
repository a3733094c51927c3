//! Named scenario flows.
//!
//! Each flow is an independent procedure over a fresh driver handle; the
//! CLI orchestrator and the live test suite both run them through
//! [`crate::scenario::Scenario`]. Assertions go through [`crate::check`]
//! so failures propagate with diagnostics instead of panicking.

use futures::future::BoxFuture;

use crate::check::{ensure, ensure_contains, ensure_eq};
use crate::driver::DriverHandle;
use crate::fixture::{self, messages, products, Credentials};
use crate::pages::auth::AuthPage;
use crate::pages::cart::CartPage;
use crate::pages::contact::ContactPage;
use crate::pages::home::{Category, HomePage};
use crate::pages::product::ProductPage;
use crate::result::VitrinaResult;

/// Register a fresh identity, then sign in with it.
pub async fn register_then_login(driver: DriverHandle) -> VitrinaResult<()> {
    let home = HomePage::new(driver.clone());
    let auth = AuthPage::new(driver);
    let credentials = Credentials::unique("vitrina");

    home.load().await?;
    home.open_signup().await?;
    let outcome = auth
        .register(&credentials.username, &credentials.password)
        .await?;
    ensure_contains(outcome.text(), messages::SIGNUP_OK)?;

    home.open_login().await?;
    let login = auth
        .login(&credentials.username, &credentials.password)
        .await?;
    ensure(login.logged_in, "expected a logged-in landmark after login")?;

    let banner = auth.logged_in_user().await.unwrap_or_default();
    ensure_contains(&banner, &credentials.username)?;

    auth.logout().await
}

/// Registering a taken username is answered with a rejection alert.
pub async fn duplicate_registration(driver: DriverHandle) -> VitrinaResult<()> {
    let home = HomePage::new(driver.clone());
    let auth = AuthPage::new(driver);

    home.load().await?;
    home.open_signup().await?;
    let outcome = auth
        .register(fixture::EXISTING_USERNAME, "Password123")
        .await?;
    ensure(!outcome.is_accepted(), "a taken username must be rejected")?;
    ensure_contains(outcome.text(), messages::USER_EXISTS)
}

/// Add one phone to the cart and find exactly it there.
pub async fn add_product_to_cart(driver: DriverHandle) -> VitrinaResult<()> {
    let home = HomePage::new(driver.clone());
    let product = ProductPage::new(driver.clone());
    let cart = CartPage::new(driver);

    home.load().await?;
    home.open_product(products::SAMSUNG_GALAXY_S6).await?;
    product.add_to_cart().await?;
    product.go_to_cart().await?;

    cart.load().await?;
    ensure_eq(&1, &cart.item_count().await?, "cart size")?;
    ensure(
        cart.verify_item_in_cart(products::SAMSUNG_GALAXY_S6).await?,
        "the added product should sit in the cart",
    )?;
    cart.remove_all().await
}

/// Removing a named item shrinks the cart by exactly one and drops the
/// name; clearing the rest terminates at zero.
pub async fn remove_item_from_cart(driver: DriverHandle) -> VitrinaResult<()> {
    let home = HomePage::new(driver.clone());
    let product = ProductPage::new(driver.clone());
    let cart = CartPage::new(driver);

    home.load().await?;
    home.open_product(products::SAMSUNG_GALAXY_S6).await?;
    product.add_to_cart().await?;
    product.go_home().await?;
    home.open_product(products::NOKIA_LUMIA_1520).await?;
    product.add_to_cart().await?;
    product.go_to_cart().await?;

    cart.load().await?;
    ensure_eq(&2, &cart.item_count().await?, "cart size before removal")?;

    cart.remove_by_name(products::SAMSUNG_GALAXY_S6).await?;
    ensure_eq(&1, &cart.item_count().await?, "cart size after removal")?;
    ensure(
        !cart.verify_item_in_cart(products::SAMSUNG_GALAXY_S6).await?,
        "the removed name must no longer appear",
    )?;

    cart.remove_all().await?;
    ensure_eq(&0, &cart.item_count().await?, "cart size after clearing")
}

/// Every category filter yields a non-empty grid of titled products.
pub async fn category_filters(driver: DriverHandle) -> VitrinaResult<()> {
    let home = HomePage::new(driver);
    home.load().await?;

    for category in Category::all() {
        home.select_category(category).await?;
        let count = home.product_count().await?;
        ensure(count > 0, format!("{category} grid should not be empty"))?;
        let titles = home.product_titles().await?;
        ensure_eq(&count, &titles.len(), "one title per card")?;
        ensure(
            titles.iter().all(|title| !title.is_empty()),
            "every product title should be non-empty",
        )?;
    }
    Ok(())
}

/// Reading the cart twice without mutation gives equal sequences, and the
/// displayed total matches the line-item sum within tolerance.
pub async fn cart_total_consistency(driver: DriverHandle) -> VitrinaResult<()> {
    let home = HomePage::new(driver.clone());
    let product = ProductPage::new(driver.clone());
    let cart = CartPage::new(driver);

    home.load().await?;
    home.open_product(products::SAMSUNG_GALAXY_S6).await?;
    product.add_to_cart().await?;
    product.go_home().await?;
    home.open_product(products::NOKIA_LUMIA_1520).await?;
    product.add_to_cart().await?;
    product.go_to_cart().await?;

    cart.load().await?;
    let first = cart.items().await?;
    let second = cart.items().await?;
    ensure(first == second, "items() must be idempotent between mutations")?;
    ensure(
        cart.verify_total_price().await?,
        "displayed total should match the line-item sum",
    )?;
    cart.remove_all().await
}

/// Guest checkout: no login, straight to a purchase confirmation.
pub async fn guest_checkout(driver: DriverHandle) -> VitrinaResult<()> {
    let home = HomePage::new(driver.clone());
    let product = ProductPage::new(driver.clone());
    let cart = CartPage::new(driver);

    home.load().await?;
    home.open_product(products::SAMSUNG_GALAXY_S6).await?;
    product.add_to_cart().await?;
    product.go_to_cart().await?;

    cart.load().await?;
    cart.place_order().await?;
    cart.fill_order_form(&fixture::sample_order("Vitrina Shopper"))
        .await?;
    cart.complete_purchase().await?;
    let confirmation = cart.confirm_purchase().await?;
    ensure_contains(&confirmation, messages::PURCHASE_OK)
}

/// Submitting the contact form empty still raises a dialog with some text.
pub async fn contact_empty_submission(driver: DriverHandle) -> VitrinaResult<()> {
    let home = HomePage::new(driver.clone());
    let contact = ContactPage::new(driver);

    home.load().await?;
    home.open_contact().await?;
    let text = contact.send(&fixture::empty_contact()).await?;
    ensure(!text.is_empty(), "the validation dialog should carry text")
}

/// A well-formed contact message is thanked.
pub async fn contact_valid_submission(driver: DriverHandle) -> VitrinaResult<()> {
    let home = HomePage::new(driver.clone());
    let contact = ContactPage::new(driver);

    home.load().await?;
    home.open_contact().await?;
    let text = contact.send(&fixture::sample_contact()).await?;
    ensure_contains(&text, messages::CONTACT_OK)
}

/// Entry point signature shared by every flow in the registry.
pub type FlowFn = fn(DriverHandle) -> BoxFuture<'static, VitrinaResult<()>>;

/// A registered flow: name, one-line description, entry point.
#[derive(Clone)]
pub struct Flow {
    /// Scenario name, stable across runs
    pub name: &'static str,
    /// One-line description for listings
    pub description: &'static str,
    run: FlowFn,
}

impl std::fmt::Debug for Flow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Flow").field("name", &self.name).finish()
    }
}

impl Flow {
    const fn new(name: &'static str, description: &'static str, run: FlowFn) -> Self {
        Self {
            name,
            description,
            run,
        }
    }

    /// Start the flow on the given handle.
    #[must_use]
    pub fn invoke(&self, driver: DriverHandle) -> BoxFuture<'static, VitrinaResult<()>> {
        (self.run)(driver)
    }
}

/// Every flow the suite ships, in a stable order.
#[must_use]
pub fn all() -> Vec<Flow> {
    vec![
        Flow::new(
            "register_then_login",
            "register a fresh identity, then sign in with it",
            |d| Box::pin(register_then_login(d)),
        ),
        Flow::new(
            "duplicate_registration",
            "registering a taken username is rejected",
            |d| Box::pin(duplicate_registration(d)),
        ),
        Flow::new(
            "add_product_to_cart",
            "one phone lands in the cart, exactly once",
            |d| Box::pin(add_product_to_cart(d)),
        ),
        Flow::new(
            "remove_item_from_cart",
            "named removal shrinks the cart by one; clearing reaches zero",
            |d| Box::pin(remove_item_from_cart(d)),
        ),
        Flow::new(
            "category_filters",
            "every category filter yields a non-empty, titled grid",
            |d| Box::pin(category_filters(d)),
        ),
        Flow::new(
            "cart_total_consistency",
            "items() is idempotent and the total matches the line sum",
            |d| Box::pin(cart_total_consistency(d)),
        ),
        Flow::new(
            "guest_checkout",
            "checkout without login confirms the purchase",
            |d| Box::pin(guest_checkout(d)),
        ),
        Flow::new(
            "contact_empty_submission",
            "an all-empty contact form still raises a dialog",
            |d| Box::pin(contact_empty_submission(d)),
        ),
        Flow::new(
            "contact_valid_submission",
            "a well-formed contact message is thanked",
            |d| Box::pin(contact_valid_submission(d)),
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn flow_names_are_unique() {
        let flows = all();
        let names: HashSet<&str> = flows.iter().map(|flow| flow.name).collect();
        assert_eq!(names.len(), flows.len());
    }

    #[test]
    fn every_flow_is_described() {
        for flow in all() {
            assert!(!flow.description.is_empty(), "{} lacks a description", flow.name);
        }
    }

    #[test]
    fn the_registry_covers_the_suite() {
        let names: Vec<&str> = all().iter().map(|flow| flow.name).collect();
        assert!(names.contains(&"register_then_login"));
        assert!(names.contains(&"guest_checkout"));
        assert!(names.contains(&"contact_empty_submission"));
    }
}
