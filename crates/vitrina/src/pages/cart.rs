//! Cart page: line items, totals, removal, and the checkout flow
//! (`Viewing -> OrderModalOpen -> Submitted -> Confirmed`).

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::driver::DriverHandle;
use crate::result::{VitrinaError, VitrinaResult};
use crate::wait::{NAVIGATION_TIMEOUT, STANDARD_TIMEOUT};

const URL_MARKER: &str = "cart.html";
const ROWS: &str = "#tbodyid tr";
const DELETE_LINKS: &str = "#tbodyid tr td a";
const TOTAL: &str = "#totalp";

const PLACE_ORDER: &str = "button[data-target='#orderModal']";
const ORDER_MODAL: &str = "#orderModal";
const ORDER_NAME: &str = "#name";
const ORDER_COUNTRY: &str = "#country";
const ORDER_CITY: &str = "#city";
const ORDER_CARD: &str = "#card";
const ORDER_MONTH: &str = "#month";
const ORDER_YEAR: &str = "#year";
const PURCHASE: &str = "button[onclick='purchaseOrder()']";

const SUCCESS_PANEL: &str = ".sweet-alert";
const SUCCESS_HEADLINE: &str = ".sweet-alert h2";
const SUCCESS_OK: &str = "button.confirm";

/// Upper bound on removal attempts, so a deletion that silently fails
/// cannot loop forever.
const MAX_REMOVE_ITERATIONS: usize = 25;

/// Reads every cart row as `{name, price}` pairs, row order preserved.
const ROWS_QUERY: &str = "Array.from(document.querySelectorAll('#tbodyid tr')).map(tr => { \
     const td = tr.querySelectorAll('td'); \
     return { name: td[1] ? td[1].textContent.trim() : '', \
              price: td[2] ? td[2].textContent.trim() : '' }; })";

/// One row of the cart table.
///
/// Rows have no identity beyond name and price; duplicate names are legal
/// and handled positionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product name as rendered in the row
    pub name: String,
    /// Display price as rendered in the row
    pub price: String,
}

/// Checkout payload for the order form. Passed verbatim; any validation is
/// the remote application's business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetails {
    /// Buyer name
    pub name: String,
    /// Buyer country
    pub country: String,
    /// Buyer city
    pub city: String,
    /// Credit card number
    pub card_number: String,
    /// Card expiry month
    pub expiry_month: String,
    /// Card expiry year
    pub expiry_year: String,
}

/// Parse a display price, keeping digits and the decimal point.
///
/// Accepts "$360", "790", and annotated forms like "$360 *includes tax".
/// Unparseable text reads as zero.
#[must_use]
pub fn parse_price(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

/// Absolute-tolerance comparison absorbing display rounding.
#[must_use]
pub fn totals_match(expected: f64, displayed: f64) -> bool {
    (expected - displayed).abs() <= 0.01
}

/// Row-count rule preserving a quirk of the remote application: it can
/// render a single all-empty placeholder row for an empty cart.
#[must_use]
pub fn effective_count(lines: &[CartLine]) -> usize {
    match lines {
        [only] if only.name.is_empty() && only.price.is_empty() => 0,
        _ => lines.len(),
    }
}

/// The cart view and its checkout flow.
#[derive(Debug, Clone)]
pub struct CartPage {
    driver: DriverHandle,
}

impl CartPage {
    /// Bind the page to a driver handle.
    #[must_use]
    pub fn new(driver: DriverHandle) -> Self {
        Self { driver }
    }

    /// Navigate to the cart and wait for its table to settle.
    ///
    /// The table populates asynchronously after the page loads, so arrival
    /// is the row count holding steady across two consecutive polls rather
    /// than a fixed sleep.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart URL is never reached or the table never
    /// settles.
    pub async fn load(&self) -> VitrinaResult<()> {
        if !self.driver.current_url().await?.contains(URL_MARKER) {
            self.driver.navigate(URL_MARKER, NAVIGATION_TIMEOUT).await?;
        }
        self.driver
            .wait_url_contains(URL_MARKER, STANDARD_TIMEOUT)
            .await?;
        self.driver
            .wait_visible(PLACE_ORDER, STANDARD_TIMEOUT)
            .await?;
        self.driver
            .wait_stable_count(ROWS, STANDARD_TIMEOUT)
            .await?;
        Ok(())
    }

    /// The rows currently in the cart, in table order.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read.
    pub async fn items(&self) -> VitrinaResult<Vec<CartLine>> {
        self.driver.eval_json(ROWS_QUERY).await
    }

    /// Number of items in the cart, placeholder row excluded.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read.
    pub async fn item_count(&self) -> VitrinaResult<usize> {
        Ok(effective_count(&self.items().await?))
    }

    /// Whether a product with the given name sits in the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read.
    pub async fn verify_item_in_cart(&self, name: &str) -> VitrinaResult<bool> {
        Ok(self.items().await?.iter().any(|line| line.name == name))
    }

    /// Remove the first row matching the given name and wait for the row
    /// count to drop by exactly one.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::NotFound`] if no row carries that name.
    pub async fn remove_by_name(&self, name: &str) -> VitrinaResult<()> {
        let lines = self.items().await?;
        let index = lines
            .iter()
            .position(|line| line.name == name)
            .ok_or_else(|| VitrinaError::NotFound {
                what: format!("cart row {name:?}"),
            })?;

        let before = self.driver.count(ROWS).await?;
        self.driver.click_nth(DELETE_LINKS, index).await?;
        self.driver
            .wait_count(ROWS, STANDARD_TIMEOUT, move |count| count + 1 == before)
            .await?;
        tracing::debug!(name, "cart row removed");
        Ok(())
    }

    /// Remove rows until the cart is empty, bounded by a maximum number of
    /// iterations.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::Timeout`] if rows remain after the bound.
    pub async fn remove_all(&self) -> VitrinaResult<()> {
        let started = Instant::now();
        for _ in 0..MAX_REMOVE_ITERATIONS {
            if self.item_count().await? == 0 {
                return Ok(());
            }
            let before = self.driver.count(ROWS).await?;
            self.driver.click_nth(DELETE_LINKS, 0).await?;
            self.driver
                .wait_count(ROWS, STANDARD_TIMEOUT, move |count| count < before)
                .await?;
        }
        Err(VitrinaError::Timeout {
            waited_for: format!("cart to empty within {MAX_REMOVE_ITERATIONS} removals"),
            ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        })
    }

    /// Open the order modal.
    ///
    /// # Errors
    ///
    /// Returns an error if the modal never turns visible.
    pub async fn place_order(&self) -> VitrinaResult<()> {
        self.driver.click(PLACE_ORDER, STANDARD_TIMEOUT).await?;
        self.driver
            .wait_visible(ORDER_MODAL, STANDARD_TIMEOUT)
            .await?;
        Ok(())
    }

    /// Populate the six order-form fields verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if a field never renders.
    pub async fn fill_order_form(&self, details: &OrderDetails) -> VitrinaResult<()> {
        self.driver
            .fill(ORDER_NAME, &details.name, STANDARD_TIMEOUT)
            .await?;
        self.driver
            .fill(ORDER_COUNTRY, &details.country, STANDARD_TIMEOUT)
            .await?;
        self.driver
            .fill(ORDER_CITY, &details.city, STANDARD_TIMEOUT)
            .await?;
        self.driver
            .fill(ORDER_CARD, &details.card_number, STANDARD_TIMEOUT)
            .await?;
        self.driver
            .fill(ORDER_MONTH, &details.expiry_month, STANDARD_TIMEOUT)
            .await?;
        self.driver
            .fill(ORDER_YEAR, &details.expiry_year, STANDARD_TIMEOUT)
            .await?;
        Ok(())
    }

    /// Submit the order and wait for the success panel.
    ///
    /// The confirmation here is an in-page panel, not a native dialog.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::PurchaseTimeout`] if the panel never shows.
    pub async fn complete_purchase(&self) -> VitrinaResult<()> {
        self.driver.click(PURCHASE, STANDARD_TIMEOUT).await?;
        self.driver
            .wait_visible(SUCCESS_PANEL, STANDARD_TIMEOUT)
            .await
            .map_err(|_| VitrinaError::PurchaseTimeout {
                ms: u64::try_from(STANDARD_TIMEOUT.as_millis()).unwrap_or(u64::MAX),
            })?;
        Ok(())
    }

    /// Read the success panel's headline, dismiss the panel, and return the
    /// text for the caller to assert on.
    ///
    /// # Errors
    ///
    /// Returns an error if the panel cannot be read or dismissed.
    pub async fn confirm_purchase(&self) -> VitrinaResult<String> {
        let text = self.driver.text(SUCCESS_HEADLINE, STANDARD_TIMEOUT).await?;
        self.driver.click(SUCCESS_OK, STANDARD_TIMEOUT).await?;
        Ok(text)
    }

    /// Sum of the parsed line prices.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read.
    pub async fn expected_total(&self) -> VitrinaResult<f64> {
        Ok(self
            .items()
            .await?
            .iter()
            .map(|line| parse_price(&line.price))
            .sum())
    }

    /// The total the page displays.
    ///
    /// # Errors
    ///
    /// Returns an error if the total element cannot be read.
    pub async fn displayed_total(&self) -> VitrinaResult<f64> {
        Ok(parse_price(&self.driver.text(TOTAL, STANDARD_TIMEOUT).await?))
    }

    /// Whether the displayed total matches the line-item sum within the
    /// 0.01 display-rounding tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if either total cannot be read.
    pub async fn verify_total_price(&self) -> VitrinaResult<bool> {
        let expected = self.expected_total().await?;
        let displayed = self.displayed_total().await?;
        tracing::debug!(expected, displayed, "cart totals");
        Ok(totals_match(expected, displayed))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn line(name: &str, price: &str) -> CartLine {
        CartLine {
            name: name.to_string(),
            price: price.to_string(),
        }
    }

    mod price_tests {
        use super::*;

        #[test]
        fn parses_bare_and_prefixed_prices() {
            assert_eq!(parse_price("790"), 790.0);
            assert_eq!(parse_price("$360"), 360.0);
            assert_eq!(parse_price("$1099.99"), 1099.99);
        }

        #[test]
        fn strips_annotations() {
            assert_eq!(parse_price("$360 *includes tax"), 360.0);
        }

        #[test]
        fn garbage_reads_as_zero() {
            assert_eq!(parse_price(""), 0.0);
            assert_eq!(parse_price("free"), 0.0);
        }

        #[test]
        fn tolerance_is_absolute() {
            assert!(totals_match(1100.0, 1100.009));
            assert!(totals_match(1100.009, 1100.0));
            assert!(!totals_match(1100.0, 1100.02));
        }

        proptest! {
            #[test]
            fn parse_price_reads_rendered_cents(cents in 0u64..1_000_000u64) {
                let price = cents as f64 / 100.0;
                let rendered = format!("${price:.2}");
                prop_assert!((parse_price(&rendered) - price).abs() < 1e-9);
            }
        }
    }

    mod count_tests {
        use super::*;

        #[test]
        fn empty_table_counts_zero() {
            assert_eq!(effective_count(&[]), 0);
        }

        #[test]
        fn placeholder_row_counts_zero() {
            assert_eq!(effective_count(&[line("", "")]), 0);
        }

        #[test]
        fn a_single_real_row_counts_one() {
            assert_eq!(effective_count(&[line("Samsung galaxy s6", "360")]), 1);
        }

        #[test]
        fn duplicate_names_count_per_row() {
            let lines = [
                line("Samsung galaxy s6", "360"),
                line("Samsung galaxy s6", "360"),
            ];
            assert_eq!(effective_count(&lines), 2);
        }

        #[test]
        fn a_priced_row_without_a_name_still_counts() {
            // Only the fully empty single row is the placeholder.
            assert_eq!(effective_count(&[line("", "360")]), 1);
        }
    }

    mod total_tests {
        use super::*;

        #[test]
        fn line_prices_sum() {
            let lines = [line("Samsung galaxy s6", "360"), line("MacBook air", "700")];
            let total: f64 = lines.iter().map(|l| parse_price(&l.price)).sum();
            assert_eq!(total, 1060.0);
            assert!(totals_match(total, 1060.0));
        }
    }
}
