//! Home page: navigation entry point, product grid, category filter,
//! carousel.

use serde::{Deserialize, Serialize};

use crate::driver::DriverHandle;
use crate::result::{VitrinaError, VitrinaResult};
use crate::wait::{NAVIGATION_TIMEOUT, PROBE_TIMEOUT, STANDARD_TIMEOUT};

const PRODUCT_CARDS: &str = "#tbodyid .card";
const PRODUCT_LINKS: &str = "#tbodyid .card-title a";
const PRODUCT_PRICES: &str = "#tbodyid .card h5";
const CATEGORY_LINKS: &str = ".list-group a";
const CAROUSEL: &str = "#carouselExampleIndicators";

const NAV_CART: &str = "#cartur";
const NAV_LOGIN: &str = "#login2";
const NAV_SIGNUP: &str = "#signin2";
const NAV_CONTACT: &str = "a[data-target='#exampleModal']";
const NAV_LOGOUT: &str = "#logout2";

const LOGIN_MODAL: &str = "#logInModal";
const SIGNUP_MODAL: &str = "#signInModal";
const CONTACT_MODAL: &str = "#exampleModal";

const PRODUCT_URL_MARKER: &str = "prod.html";
const CART_URL_MARKER: &str = "cart.html";
const CART_LANDMARK: &str = "button[data-target='#orderModal']";

/// Product categories of the sidebar filter.
///
/// A closed set; unknown labels are rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Phone listings
    Phones,
    /// Laptop listings
    Laptops,
    /// Monitor listings
    Monitors,
}

impl Category {
    /// Visible label of the filter link.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Phones => "Phones",
            Self::Laptops => "Laptops",
            Self::Monitors => "Monitors",
        }
    }

    /// All categories.
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![Self::Phones, Self::Laptops, Self::Monitors]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = VitrinaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Phones" | "phones" => Ok(Self::Phones),
            "Laptops" | "laptops" => Ok(Self::Laptops),
            "Monitors" | "monitors" => Ok(Self::Monitors),
            other => Err(VitrinaError::InvalidArgument {
                message: format!("unknown category {other:?}"),
            }),
        }
    }
}

/// The storefront's landing page.
#[derive(Debug, Clone)]
pub struct HomePage {
    driver: DriverHandle,
}

impl HomePage {
    /// Bind the page to a driver handle.
    #[must_use]
    pub fn new(driver: DriverHandle) -> Self {
        Self { driver }
    }

    /// Navigate to the application root and wait for the product grid.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::NavigationTimeout`] if the grid landmark
    /// never appears.
    pub async fn load(&self) -> VitrinaResult<()> {
        self.driver.navigate("", NAVIGATION_TIMEOUT).await?;
        self.driver
            .wait_visible(PRODUCT_CARDS, STANDARD_TIMEOUT)
            .await
            .map_err(|_| VitrinaError::NavigationTimeout {
                url: self.driver.base_url().to_string(),
                ms: u64::try_from(STANDARD_TIMEOUT.as_millis()).unwrap_or(u64::MAX),
            })?;
        Ok(())
    }

    /// Apply a category filter and wait for the grid to re-populate.
    ///
    /// The filter repaints the grid asynchronously; completion is detected
    /// as a card count stable across two consecutive polls.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter link is missing or the grid never
    /// settles.
    pub async fn select_category(&self, category: Category) -> VitrinaResult<()> {
        self.driver
            .click_text(CATEGORY_LINKS, category.label())
            .await?;
        let count = self
            .driver
            .wait_stable_count(PRODUCT_CARDS, STANDARD_TIMEOUT)
            .await?;
        tracing::debug!(category = %category, count, "category filter applied");
        Ok(())
    }

    /// Number of products in the rendered grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be read.
    pub async fn product_count(&self) -> VitrinaResult<usize> {
        self.driver.count(PRODUCT_CARDS).await
    }

    /// Titles of the rendered products, in grid order.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be read.
    pub async fn product_titles(&self) -> VitrinaResult<Vec<String>> {
        self.driver.texts(PRODUCT_LINKS).await
    }

    /// Display prices of the rendered products, in grid order.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be read.
    pub async fn product_prices(&self) -> VitrinaResult<Vec<String>> {
        self.driver.texts(PRODUCT_PRICES).await
    }

    /// Open a product's detail view by its exact visible title.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::NotFound`] if no product carries that title,
    /// or [`VitrinaError::NavigationTimeout`] if the detail view is never
    /// reached.
    pub async fn open_product(&self, name: &str) -> VitrinaResult<()> {
        // The grid re-renders after navigations and filters; the exact-text
        // lookup must not run against a half-rendered grid.
        self.driver
            .wait_visible(PRODUCT_CARDS, STANDARD_TIMEOUT)
            .await?;
        self.driver.click_text(PRODUCT_LINKS, name).await?;
        self.driver
            .wait_url_contains(PRODUCT_URL_MARKER, STANDARD_TIMEOUT)
            .await
    }

    /// Open the cart view.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart URL is never reached.
    pub async fn open_cart(&self) -> VitrinaResult<()> {
        self.driver.click(NAV_CART, STANDARD_TIMEOUT).await?;
        self.driver
            .wait_url_contains(CART_URL_MARKER, STANDARD_TIMEOUT)
            .await?;
        self.driver
            .wait_visible(CART_LANDMARK, STANDARD_TIMEOUT)
            .await?;
        Ok(())
    }

    /// Open the login modal.
    ///
    /// # Errors
    ///
    /// Returns an error if the modal never turns visible.
    pub async fn open_login(&self) -> VitrinaResult<()> {
        self.driver.click(NAV_LOGIN, STANDARD_TIMEOUT).await?;
        self.driver
            .wait_visible(LOGIN_MODAL, STANDARD_TIMEOUT)
            .await?;
        Ok(())
    }

    /// Open the signup modal.
    ///
    /// # Errors
    ///
    /// Returns an error if the modal never turns visible.
    pub async fn open_signup(&self) -> VitrinaResult<()> {
        self.driver.click(NAV_SIGNUP, STANDARD_TIMEOUT).await?;
        self.driver
            .wait_visible(SIGNUP_MODAL, STANDARD_TIMEOUT)
            .await?;
        Ok(())
    }

    /// Open the contact modal.
    ///
    /// # Errors
    ///
    /// Returns an error if the modal never turns visible.
    pub async fn open_contact(&self) -> VitrinaResult<()> {
        self.driver.click(NAV_CONTACT, STANDARD_TIMEOUT).await?;
        self.driver
            .wait_visible(CONTACT_MODAL, STANDARD_TIMEOUT)
            .await?;
        Ok(())
    }

    /// Whether the carousel region is rendered. Bounded probe.
    pub async fn carousel_visible(&self) -> bool {
        self.driver.probe_visible(CAROUSEL, PROBE_TIMEOUT).await
    }

    /// Whether a session is signed in. Bounded probe for the logout
    /// affordance; returns `false` on timeout instead of failing.
    pub async fn is_logged_in(&self) -> bool {
        self.driver.probe_visible(NAV_LOGOUT, PROBE_TIMEOUT).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn category_labels() {
        assert_eq!(Category::Phones.label(), "Phones");
        assert_eq!(Category::Laptops.label(), "Laptops");
        assert_eq!(Category::Monitors.label(), "Monitors");
    }

    #[test]
    fn category_parses_known_labels() {
        assert_eq!(Category::from_str("Phones").unwrap(), Category::Phones);
        assert_eq!(Category::from_str("laptops").unwrap(), Category::Laptops);
    }

    #[test]
    fn category_rejects_unknown_labels() {
        let err = Category::from_str("Tablets").unwrap_err();
        assert!(matches!(err, VitrinaError::InvalidArgument { .. }));
        assert!(err.to_string().contains("Tablets"));
    }

    #[test]
    fn all_categories_are_listed_once() {
        let all = Category::all();
        assert_eq!(all.len(), 3);
        assert!(all.contains(&Category::Monitors));
    }

    #[test]
    fn category_display_matches_label() {
        assert_eq!(Category::Monitors.to_string(), "Monitors");
    }
}
