//! Product detail page: reads the listing and adds it to the cart.

use serde::{Deserialize, Serialize};

use crate::driver::DriverHandle;
use crate::fixture::messages;
use crate::result::{VitrinaError, VitrinaResult};
use crate::wait::{DIALOG_TIMEOUT, STANDARD_TIMEOUT};

const TITLE: &str = ".name";
const PRICE: &str = ".price-container";
const DESCRIPTION: &str = "#more-information p";
const ADD_TO_CART: &str = "a[onclick^='addToCart']";

const NAV_HOME: &str = "a.nav-link[href='index.html']";
const NAV_CART: &str = "#cartur";

const HOME_URL_MARKER: &str = "index.html";
const CART_URL_MARKER: &str = "cart.html";

/// What the detail view shows for one product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetails {
    /// Product title
    pub title: String,
    /// Display price, as rendered
    pub price: String,
    /// Marketing description
    pub description: String,
}

/// One product's detail view.
#[derive(Debug, Clone)]
pub struct ProductPage {
    driver: DriverHandle,
}

impl ProductPage {
    /// Bind the page to a driver handle.
    #[must_use]
    pub fn new(driver: DriverHandle) -> Self {
        Self { driver }
    }

    /// Read title, price, and description.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::NotVisible`] for whichever element never
    /// renders.
    pub async fn details(&self) -> VitrinaResult<ProductDetails> {
        Ok(ProductDetails {
            title: self.driver.text(TITLE, STANDARD_TIMEOUT).await?,
            price: self.driver.text(PRICE, STANDARD_TIMEOUT).await?,
            description: self.driver.text(DESCRIPTION, STANDARD_TIMEOUT).await?,
        })
    }

    /// Add the product to the cart and settle the confirmation alert.
    ///
    /// The observer is registered before the click; registering after it
    /// can miss the dialog.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::UnexpectedDialog`] if the alert does not
    /// carry the confirmation text, or [`VitrinaError::DialogTimeout`] if
    /// no alert fires.
    pub async fn add_to_cart(&self) -> VitrinaResult<()> {
        let observer = self.driver.expect_dialog().await?;
        self.driver.click(ADD_TO_CART, STANDARD_TIMEOUT).await?;
        let dialog = observer.accept(DIALOG_TIMEOUT).await?;
        if dialog.contains(messages::PRODUCT_ADDED) {
            Ok(())
        } else {
            Err(VitrinaError::UnexpectedDialog {
                expected: messages::PRODUCT_ADDED.to_string(),
                actual: dialog.message,
            })
        }
    }

    /// Go back to the product grid.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::NavigationTimeout`] if the home URL is never
    /// reached.
    pub async fn go_home(&self) -> VitrinaResult<()> {
        self.driver.click(NAV_HOME, STANDARD_TIMEOUT).await?;
        self.driver
            .wait_url_contains(HOME_URL_MARKER, STANDARD_TIMEOUT)
            .await
    }

    /// Go to the cart view.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::NavigationTimeout`] if the cart URL is never
    /// reached.
    pub async fn go_to_cart(&self) -> VitrinaResult<()> {
        self.driver.click(NAV_CART, STANDARD_TIMEOUT).await?;
        self.driver
            .wait_url_contains(CART_URL_MARKER, STANDARD_TIMEOUT)
            .await
    }
}
