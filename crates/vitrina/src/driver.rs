//! Driver handle: the capability surface page components consume.
//!
//! A [`DriverHandle`] represents one exclusive browser tab. Page components
//! depend on nothing else; every query reads the remote document fresh, and
//! every wait is a bounded poll with the budget of its operation class.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams,
};
use chromiumoxide::{Element, Page};
use serde::de::DeserializeOwned;

use crate::dialog::DialogObserver;
use crate::locator;
use crate::result::{VitrinaError, VitrinaResult};
use crate::wait::{Deadline, POLL_INTERVAL, SETTLE_INTERVAL};

/// Join a base URL and a path, normalizing the slash between them.
fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Capability object for one isolated browser tab.
///
/// Cheap to clone; clones address the same tab.
#[derive(Clone)]
pub struct DriverHandle {
    page: Arc<Page>,
    base_url: String,
}

impl std::fmt::Debug for DriverHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverHandle")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl DriverHandle {
    pub(crate) fn new(page: Arc<Page>, base_url: impl Into<String>) -> Self {
        Self {
            page,
            base_url: base_url.into(),
        }
    }

    /// Root URL of the application under test.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path under the application root.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Navigate to a path under the application root and wait for the load.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::NavigationTimeout`] if the load does not
    /// finish within the budget.
    pub async fn navigate(&self, path: &str, timeout: Duration) -> VitrinaResult<()> {
        let url = self.url_for(path);
        tracing::debug!(%url, "navigate");
        let ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        tokio::time::timeout(timeout, async {
            self.page.goto(url.as_str()).await?;
            self.page.wait_for_navigation().await?;
            Ok::<_, VitrinaError>(())
        })
        .await
        .map_err(|_| VitrinaError::NavigationTimeout {
            url: url.clone(),
            ms,
        })??;
        Ok(())
    }

    /// Current URL of the tab.
    ///
    /// # Errors
    ///
    /// Returns an error if the tab is gone.
    pub async fn current_url(&self) -> VitrinaResult<String> {
        Ok(self.page.url().await?.unwrap_or_default())
    }

    /// Wait until the current URL contains the given marker.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::NavigationTimeout`] naming the marker if it
    /// is never reached.
    pub async fn wait_url_contains(&self, marker: &str, timeout: Duration) -> VitrinaResult<()> {
        let deadline = Deadline::after(timeout);
        loop {
            if self.current_url().await?.contains(marker) {
                return Ok(());
            }
            if deadline.expired() {
                return Err(VitrinaError::NavigationTimeout {
                    url: marker.to_string(),
                    ms: deadline.budget_ms(),
                });
            }
            deadline.tick(POLL_INTERVAL).await;
        }
    }

    /// Wait for an element to exist in the document.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::NotVisible`] if it never appears.
    pub async fn wait_present(&self, selector: &str, timeout: Duration) -> VitrinaResult<Element> {
        let deadline = Deadline::after(timeout);
        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                return Ok(element);
            }
            if deadline.expired() {
                return Err(VitrinaError::NotVisible {
                    selector: selector.to_string(),
                    ms: deadline.budget_ms(),
                });
            }
            deadline.tick(POLL_INTERVAL).await;
        }
    }

    /// Wait for an element to be present and rendered visible.
    ///
    /// Presence is not enough for this application: its modals sit hidden
    /// in the document until opened.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::NotVisible`] if it never renders.
    pub async fn wait_visible(&self, selector: &str, timeout: Duration) -> VitrinaResult<Element> {
        let deadline = Deadline::after(timeout);
        let query = locator::visibility_query(selector);
        loop {
            if self.eval_json::<bool>(&query).await.unwrap_or(false) {
                if let Ok(element) = self.page.find_element(selector).await {
                    return Ok(element);
                }
            }
            if deadline.expired() {
                return Err(VitrinaError::NotVisible {
                    selector: selector.to_string(),
                    ms: deadline.budget_ms(),
                });
            }
            deadline.tick(POLL_INTERVAL).await;
        }
    }

    /// Bounded probe: whether the element turns visible within the budget.
    ///
    /// Swallows the timeout and returns `false`; absence is an expected
    /// outcome for probes, not an error.
    pub async fn probe_visible(&self, selector: &str, timeout: Duration) -> bool {
        self.wait_visible(selector, timeout).await.is_ok()
    }

    /// Number of elements currently matching the selector.
    ///
    /// # Errors
    ///
    /// Returns an error if the query cannot be evaluated.
    pub async fn count(&self, selector: &str) -> VitrinaResult<usize> {
        self.eval_json(&locator::count_query(selector)).await
    }

    /// Wait until the match count is unchanged across two consecutive
    /// polls, then return it.
    ///
    /// This is the settle condition for the application's asynchronously
    /// populated tables; it replaces fixed sleeps.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::Timeout`] if the count never settles.
    pub async fn wait_stable_count(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> VitrinaResult<usize> {
        let deadline = Deadline::after(timeout);
        let mut last = self.count(selector).await?;
        loop {
            deadline.tick(SETTLE_INTERVAL).await;
            let next = self.count(selector).await?;
            if next == last {
                return Ok(next);
            }
            last = next;
            if deadline.expired() {
                return Err(VitrinaError::Timeout {
                    waited_for: format!("stable count of {selector}"),
                    ms: deadline.budget_ms(),
                });
            }
        }
    }

    /// Wait until the match count satisfies the predicate, then return it.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::Timeout`] if it never does.
    pub async fn wait_count<F>(
        &self,
        selector: &str,
        timeout: Duration,
        predicate: F,
    ) -> VitrinaResult<usize>
    where
        F: Fn(usize) -> bool,
    {
        let deadline = Deadline::after(timeout);
        loop {
            let count = self.count(selector).await?;
            if predicate(count) {
                return Ok(count);
            }
            if deadline.expired() {
                return Err(VitrinaError::Timeout {
                    waited_for: format!("count of {selector} to change"),
                    ms: deadline.budget_ms(),
                });
            }
            deadline.tick(POLL_INTERVAL).await;
        }
    }

    /// Trimmed text of the first match, waiting for it to render.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::NotVisible`] if the element never renders.
    pub async fn text(&self, selector: &str, timeout: Duration) -> VitrinaResult<String> {
        let element = self.wait_visible(selector, timeout).await?;
        Ok(element
            .inner_text()
            .await?
            .unwrap_or_default()
            .trim()
            .to_string())
    }

    /// Trimmed text of every current match; reads, never waits.
    ///
    /// # Errors
    ///
    /// Returns an error if the query cannot be evaluated.
    pub async fn texts(&self, selector: &str) -> VitrinaResult<Vec<String>> {
        self.eval_json(&locator::texts_query(selector)).await
    }

    /// Click the first match after waiting for it to render.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::NotVisible`] if it never renders.
    pub async fn click(&self, selector: &str, timeout: Duration) -> VitrinaResult<()> {
        let element = self.wait_visible(selector, timeout).await?;
        element.click().await?;
        tracing::debug!(selector, "click");
        Ok(())
    }

    /// Click the nth current match.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::NotFound`] if fewer elements match.
    pub async fn click_nth(&self, selector: &str, index: usize) -> VitrinaResult<()> {
        let elements = self.page.find_elements(selector).await?;
        let element = elements.get(index).ok_or_else(|| VitrinaError::NotFound {
            what: format!("{selector} [{index}]"),
        })?;
        element.click().await?;
        tracing::debug!(selector, index, "click nth");
        Ok(())
    }

    /// Click the match whose trimmed text equals `text` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::NotFound`] if no match carries that text.
    pub async fn click_text(&self, selector: &str, text: &str) -> VitrinaResult<()> {
        let elements = self.page.find_elements(selector).await?;
        for element in &elements {
            if element.inner_text().await?.unwrap_or_default().trim() == text {
                element.click().await?;
                tracing::debug!(selector, text, "click by text");
                return Ok(());
            }
        }
        Err(VitrinaError::NotFound {
            what: format!("{selector} with text {text:?}"),
        })
    }

    /// Clear a field and type the value into it, verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::NotVisible`] if the field never renders.
    pub async fn fill(&self, selector: &str, value: &str, timeout: Duration) -> VitrinaResult<()> {
        let element = self.wait_visible(selector, timeout).await?;
        element.focus().await?;
        element
            .call_js_fn("function() { this.value = ''; }", false)
            .await?;
        element.type_str(value).await?;
        Ok(())
    }

    /// Register a one-shot observer for the next native dialog.
    ///
    /// Must be called before the action that triggers the dialog.
    ///
    /// # Errors
    ///
    /// Returns an error if the event subscription fails.
    pub async fn expect_dialog(&self) -> VitrinaResult<DialogObserver> {
        DialogObserver::register(Arc::clone(&self.page)).await
    }

    /// Evaluate a JavaScript expression and deserialize its JSON result.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails or the result does not fit `T`.
    pub async fn eval_json<T: DeserializeOwned>(&self, expression: &str) -> VitrinaResult<T> {
        let result = self.page.evaluate(expression).await?;
        result
            .into_value::<T>()
            .map_err(|e| VitrinaError::Driver {
                message: e.to_string(),
            })
    }

    /// Capture a PNG screenshot of the tab to the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if capture or the write fails.
    pub async fn screenshot(&self, path: &Path) -> VitrinaResult<()> {
        let params = CaptureScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();
        let response = self.page.execute(params).await?;

        use base64::Engine;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&response.data)
            .map_err(|e| VitrinaError::Driver {
                message: e.to_string(),
            })?;
        tokio::fs::write(path, bytes).await?;
        tracing::debug!(path = %path.display(), "screenshot saved");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(
            join_url("https://shop.example.com/", "cart.html"),
            "https://shop.example.com/cart.html"
        );
        assert_eq!(
            join_url("https://shop.example.com", "/cart.html"),
            "https://shop.example.com/cart.html"
        );
        assert_eq!(
            join_url("https://shop.example.com", "cart.html"),
            "https://shop.example.com/cart.html"
        );
    }

    #[test]
    fn join_url_with_empty_path_targets_the_root() {
        assert_eq!(
            join_url("https://shop.example.com/", ""),
            "https://shop.example.com/"
        );
    }
}
