//! Contact modal: fill, send, and local validation. Stateless per call.

use serde::{Deserialize, Serialize};

use crate::driver::DriverHandle;
use crate::result::{VitrinaError, VitrinaResult};
use crate::wait::{DIALOG_TIMEOUT, PROBE_TIMEOUT, STANDARD_TIMEOUT};

const MODAL: &str = "#exampleModal";
const EMAIL: &str = "#recipient-email";
const NAME: &str = "#recipient-name";
const MESSAGE: &str = "#message-text";
const SEND: &str = "button[onclick='send()']";

/// A message for the contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    /// Sender email
    pub email: String,
    /// Sender name
    pub name: String,
    /// Message body
    pub message: String,
}

/// Result of local validation: every violated rule, never just the first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactValidation {
    /// Whether the message passes every rule
    pub valid: bool,
    /// One entry per violated rule
    pub errors: Vec<String>,
}

/// Check a message against the local rules, collecting every violation.
///
/// The `@` rule applies to non-empty emails only; an empty email reports
/// its emptiness once.
#[must_use]
pub fn validate_message(message: &ContactMessage) -> ContactValidation {
    let mut errors = Vec::new();

    if message.email.is_empty() {
        errors.push("email must not be empty".to_string());
    } else if !message.email.contains('@') {
        errors.push("email must contain '@'".to_string());
    }

    if message.name.is_empty() {
        errors.push("name must not be empty".to_string());
    }

    if message.message.is_empty() {
        errors.push("message must not be empty".to_string());
    }

    ContactValidation {
        valid: errors.is_empty(),
        errors,
    }
}

/// The contact modal.
#[derive(Debug, Clone)]
pub struct ContactPage {
    driver: DriverHandle,
}

impl ContactPage {
    /// Bind the page to a driver handle.
    #[must_use]
    pub fn new(driver: DriverHandle) -> Self {
        Self { driver }
    }

    /// Populate the form fields verbatim. The modal must already be open.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::PreconditionFailed`] if the modal is not
    /// open.
    pub async fn fill(&self, message: &ContactMessage) -> VitrinaResult<()> {
        if !self.driver.probe_visible(MODAL, PROBE_TIMEOUT).await {
            return Err(VitrinaError::PreconditionFailed {
                message: "contact modal is not open".to_string(),
            });
        }
        self.driver
            .fill(EMAIL, &message.email, STANDARD_TIMEOUT)
            .await?;
        self.driver
            .fill(NAME, &message.name, STANDARD_TIMEOUT)
            .await?;
        self.driver
            .fill(MESSAGE, &message.message, STANDARD_TIMEOUT)
            .await?;
        Ok(())
    }

    /// Fill and submit the form, returning the alert text for the caller
    /// to assert on. This method decides nothing about pass or fail.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::DialogTimeout`] if no alert answers the
    /// submission.
    pub async fn send(&self, message: &ContactMessage) -> VitrinaResult<String> {
        self.fill(message).await?;
        let observer = self.driver.expect_dialog().await?;
        self.driver.click(SEND, STANDARD_TIMEOUT).await?;
        let dialog = observer.accept(DIALOG_TIMEOUT).await?;
        Ok(dialog.message)
    }

    /// Local presence/format checks for the given message.
    #[must_use]
    pub fn validate(&self, message: &ContactMessage) -> ContactValidation {
        validate_message(message)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn message(email: &str, name: &str, body: &str) -> ContactMessage {
        ContactMessage {
            email: email.to_string(),
            name: name.to_string(),
            message: body.to_string(),
        }
    }

    #[test]
    fn a_well_formed_message_is_valid() {
        let result = validate_message(&message("a@example.com", "Ada", "hello"));
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn all_empty_fields_enumerate_every_violation() {
        let result = validate_message(&message("", "", ""));
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 3);
    }

    #[test]
    fn a_malformed_email_is_its_own_violation() {
        let result = validate_message(&message("not-an-email", "Ada", "hello"));
        assert!(!result.valid);
        assert_eq!(result.errors, vec!["email must contain '@'".to_string()]);
    }

    #[test]
    fn violations_accumulate_across_fields() {
        let result = validate_message(&message("not-an-email", "Ada", ""));
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn empty_email_reports_emptiness_once() {
        let result = validate_message(&message("", "Ada", "hello"));
        assert_eq!(result.errors, vec!["email must not be empty".to_string()]);
    }
}
