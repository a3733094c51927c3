//! JavaScript query builders evaluated in the page by the driver.
//!
//! Selectors are embedded with Rust's debug formatting, which yields a
//! double-quoted, escaped string that is also a valid JavaScript string
//! literal.

/// Query returning how many elements match the selector.
#[must_use]
pub fn count_query(css: &str) -> String {
    format!("document.querySelectorAll({css:?}).length")
}

/// Query returning whether the first match is rendered and visible.
///
/// Presence in the DOM is not enough for the modals of the application
/// under test; they sit hidden in the document until opened.
#[must_use]
pub fn visibility_query(css: &str) -> String {
    format!(
        "(() => {{ const el = document.querySelector({css:?}); \
         if (!el) return false; \
         const r = el.getBoundingClientRect(); \
         return r.width > 0 && r.height > 0 && \
         getComputedStyle(el).visibility !== 'hidden'; }})()"
    )
}

/// Query returning the trimmed text content of every match, as a JSON array.
#[must_use]
pub fn texts_query(css: &str) -> String {
    format!(
        "Array.from(document.querySelectorAll({css:?})).map(el => el.textContent.trim())"
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn count_query_embeds_the_selector() {
        let query = count_query("#tbodyid tr");
        assert_eq!(query, "document.querySelectorAll(\"#tbodyid tr\").length");
    }

    #[test]
    fn quotes_in_selectors_are_escaped() {
        let query = count_query("a[data-target='#exampleModal']");
        assert!(query.contains("a[data-target='#exampleModal']"));
        // The embedded literal must stay double-quoted so the inner single
        // quotes survive.
        assert!(query.contains("querySelectorAll(\"a[data-target="));
    }

    #[test]
    fn visibility_query_guards_against_missing_elements() {
        let query = visibility_query(".sweet-alert");
        assert!(query.contains("if (!el) return false"));
        assert!(query.contains("getBoundingClientRect"));
    }

    #[test]
    fn texts_query_trims_content() {
        let query = texts_query(".card-title a");
        assert!(query.contains("textContent.trim()"));
    }
}
